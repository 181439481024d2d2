//! Turn and phase coherence invariant.

use super::Invariant;
use crate::game::Game;
use crate::phases::Phase;

/// Invariant: the turn counter only advances while the match is
/// active, and the recorded last move matches the parity of the turn
/// it was made on.
pub struct TurnParityInvariant;

impl Invariant<Game> for TurnParityInvariant {
    fn holds(game: &Game) -> bool {
        match game.phase() {
            Phase::Setup | Phase::Locked => {
                game.turn() == 0 && game.last_move().is_none() && game.outcome().is_none()
            }
            Phase::Active => {
                game.outcome().is_none()
                    && (game.turn() == 0
                        || game
                            .last_move()
                            .is_some_and(|record| record.side.moves_on(game.turn() - 1)))
            }
            Phase::Finished => game.outcome().is_some(),
        }
    }

    fn description() -> &'static str {
        "turns advance only while active, and the last move matches turn parity"
    }
}
