//! Per-kind legal-move generation.
//!
//! No move ever targets an occupied square; capture happens only
//! through encirclement, never by landing.

use crate::board::Board;
use crate::position::{COLS, Position, ROWS};
use crate::types::{Unit, UnitKind};
use std::collections::VecDeque;
use tracing::instrument;

/// Produces every square the unit could legally move to this turn,
/// ignoring turn ownership (the state machine's concern).
#[instrument(skip(unit, board), fields(kind = %unit.kind(), from = %unit.position()))]
pub fn legal_destinations(unit: &Unit, board: &Board) -> Vec<Position> {
    match unit.kind() {
        UnitKind::Runner => runner_destinations(unit.position(), board),
        UnitKind::Guardian => guardian_destinations(unit.position(), board),
    }
}

/// Rook-style slide: each cardinal direction contributes every empty
/// square strictly before the first occupied square or board edge.
fn runner_destinations(origin: Position, board: &Board) -> Vec<Position> {
    let mut moves = Vec::new();
    for (dr, dc) in Position::ORTHOGONAL {
        let mut cursor = origin;
        while let Some(next) = cursor.offset(dr, dc) {
            if !board.is_empty(next) {
                break;
            }
            moves.push(next);
            cursor = next;
        }
    }
    moves
}

/// One orthogonal step into an empty square, unioned with every empty
/// square reachable from the origin by chaining empty diagonal steps.
///
/// The diagonal traversal is a breadth-first search that may change
/// diagonal direction mid-path, so a Guardian's diagonal range is a
/// whole connected region, not a single ray. This reachability is the
/// authoritative rule; do not narrow it to a bishop slide.
fn guardian_destinations(origin: Position, board: &Board) -> Vec<Position> {
    let mut moves: Vec<Position> = origin
        .orthogonal_neighbors()
        .filter(|pos| board.is_empty(*pos))
        .collect();

    let mut seen = [[false; COLS as usize]; ROWS as usize];
    seen[origin.row() as usize][origin.col() as usize] = true;
    let mut queue = VecDeque::from([origin]);

    while let Some(current) = queue.pop_front() {
        for (dr, dc) in Position::DIAGONAL {
            let Some(next) = current.offset(dr, dc) else {
                continue;
            };
            let visited = &mut seen[next.row() as usize][next.col() as usize];
            if *visited || !board.is_empty(next) {
                continue;
            }
            *visited = true;
            queue.push_back(next);
            moves.push(next);
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use std::collections::BTreeSet;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn runner(side: Side, at: Position) -> Unit {
        Unit::new(side, UnitKind::Runner, at, false)
    }

    fn destinations(unit: &Unit, others: &[Unit]) -> BTreeSet<Position> {
        let mut units: Vec<Unit> = others.to_vec();
        units.push(unit.clone());
        let board = Board::build(&units).unwrap();
        legal_destinations(unit, &board).into_iter().collect()
    }

    #[test]
    fn test_runner_slides_all_four_directions_on_empty_board() {
        let unit = runner(Side::First, pos(3, 2));
        let moves = destinations(&unit, &[]);
        // 7 along the column plus 5 along the row.
        assert_eq!(moves.len(), 12);
        assert!(!moves.contains(&pos(3, 2)));
        assert!(moves.contains(&pos(0, 2)));
        assert!(moves.contains(&pos(7, 2)));
        assert!(moves.contains(&pos(3, 0)));
        assert!(moves.contains(&pos(3, 5)));
    }

    #[test]
    fn test_runner_stops_before_first_obstruction() {
        let unit = runner(Side::First, pos(4, 2));
        let blockers = [
            runner(Side::Second, pos(4, 4)),
            runner(Side::First, pos(2, 2)),
        ];
        let moves = destinations(&unit, &blockers);
        let expected: BTreeSet<Position> = [
            pos(4, 3), // right, stops before (4, 4)
            pos(4, 1),
            pos(4, 0), // left to the edge
            pos(3, 2), // up, stops before (2, 2)
            pos(5, 2),
            pos(6, 2),
            pos(7, 2), // down to the edge
        ]
        .into_iter()
        .collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_guardian_orthogonal_is_distance_one_only() {
        let unit = Unit::new(Side::First, UnitKind::Guardian, pos(3, 3), false);
        let moves = destinations(&unit, &[]);
        assert!(moves.contains(&pos(2, 3)));
        assert!(moves.contains(&pos(4, 3)));
        assert!(moves.contains(&pos(3, 2)));
        assert!(moves.contains(&pos(3, 4)));
        // Two squares straight is not a legal step.
        assert!(!moves.contains(&pos(1, 3)));
        assert!(!moves.contains(&pos(3, 5)));
    }

    #[test]
    fn test_guardian_diagonal_region_changes_direction() {
        let unit = Unit::new(Side::First, UnitKind::Guardian, pos(0, 0), false);
        let moves = destinations(&unit, &[]);
        // (2, 0) is only reachable via (1, 1): a direction change.
        assert!(moves.contains(&pos(2, 0)));
        assert!(moves.contains(&pos(7, 5)));
    }

    #[test]
    fn test_guardian_diagonals_cannot_pass_occupied_squares() {
        let unit = Unit::new(Side::First, UnitKind::Guardian, pos(0, 0), false);
        let blocker = runner(Side::First, pos(1, 1));
        let moves = destinations(&unit, &[blocker]);
        // The only diagonal out of the corner is blocked.
        let expected: BTreeSet<Position> = [pos(0, 1), pos(1, 0)].into_iter().collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_no_destination_is_occupied() {
        let unit = Unit::new(Side::First, UnitKind::Guardian, pos(2, 2), false);
        let others = [
            runner(Side::Second, pos(1, 1)),
            runner(Side::Second, pos(2, 3)),
            runner(Side::First, pos(3, 2)),
        ];
        let board = {
            let mut all = others.to_vec();
            all.push(unit.clone());
            Board::build(&all).unwrap()
        };
        for dest in legal_destinations(&unit, &board) {
            assert!(board.is_empty(dest), "{dest} is occupied");
        }
    }
}
