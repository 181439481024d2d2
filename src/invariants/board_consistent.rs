//! Board consistency invariant: grid cell <-> unit position.

use super::Invariant;
use crate::game::Game;

/// Invariant: the derived grid and the canonical unit list agree.
///
/// Every live unit's cell holds that unit's id, and no cell is
/// occupied without a matching live unit.
pub struct BoardConsistentInvariant;

impl Invariant<Game> for BoardConsistentInvariant {
    fn holds(game: &Game) -> bool {
        let cells_match = game
            .units()
            .all(|unit| game.board().at(unit.position()) == Some(unit.id()));
        let no_stray_cells = game.board().occupied().count() == game.units().count();
        cells_match && no_stray_cells
    }

    fn description() -> &'static str {
        "every unit's recorded position matches its board cell, one unit per cell"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::types::{Side, UnitKind};

    #[test]
    fn test_holds_for_empty_game() {
        assert!(BoardConsistentInvariant::holds(&Game::new()));
    }

    #[test]
    fn test_holds_through_placement_and_retraction() {
        let mut game = Game::new();
        let pos = Position::new(3, 1).unwrap();
        game.place_unit(Side::First, UnitKind::Guardian, pos, false)
            .unwrap();
        assert!(BoardConsistentInvariant::holds(&game));

        game.remove_unit(Side::First, pos).unwrap();
        assert!(BoardConsistentInvariant::holds(&game));
    }
}
