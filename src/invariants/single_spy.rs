//! Secret-role uniqueness invariant.

use super::Invariant;
use crate::game::Game;
use crate::phases::SideStatus;
use crate::types::{Side, UnitKind};

/// Invariant: at most one secret-role unit per side, always a Runner,
/// and exactly one once the side's setup is locked (until it is
/// captured, which ends the match anyway).
pub struct SingleSpyInvariant;

impl Invariant<Game> for SingleSpyInvariant {
    fn holds(game: &Game) -> bool {
        Side::BOTH.into_iter().all(|side| {
            let mut spies = game
                .units()
                .filter(|u| u.owner() == side && u.secret_role());
            let first = spies.next();
            let lone = spies.next().is_none();
            let runner_only = first.is_none_or(|u| u.kind() == UnitKind::Runner);
            let locked_has_spy = game.side_status(side) == SideStatus::Placing
                || game.outcome().is_some()
                || first.is_some();
            lone && runner_only && locked_has_spy
        })
    }

    fn description() -> &'static str {
        "each side fields at most one secret-role unit, and it is a Runner"
    }
}
