//! Encirclement predicates and the post-move capture sweep.

use crate::board::Board;
use crate::position::Position;
use crate::types::{Side, Unit, UnitId, UnitKind};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Whether the unit's full neighbor set is blocked.
///
/// Runners are encircled when all 4 orthogonal neighbors are occupied
/// or off-board; Guardians need all 8. Board edges count as blocked,
/// so a cornered Runner is encircled by two units.
pub fn is_encircled(unit: &Unit, board: &Board) -> bool {
    let blocked = |(dr, dc): (i8, i8)| match unit.position().offset(dr, dc) {
        None => true,
        Some(neighbor) => !board.is_empty(neighbor),
    };
    match unit.kind() {
        UnitKind::Runner => Position::ORTHOGONAL.into_iter().all(blocked),
        UnitKind::Guardian => Position::ORTHOGONAL
            .into_iter()
            .chain(Position::DIAGONAL)
            .all(blocked),
    }
}

/// Sweeps the 3x3 neighborhood of `destination` after a move by
/// `mover` and removes every encircled enemy unit.
///
/// Removals take effect as candidates are found. The final captured
/// set does not depend on sweep order: each predicate reads only the
/// candidate's own neighbors, and removing one candidate never blocks
/// a square around another that was not already blocked.
#[instrument(skip(board, units), fields(%mover, %destination))]
pub fn resolve(
    mover: Side,
    destination: Position,
    board: &mut Board,
    units: &mut BTreeMap<UnitId, Unit>,
) -> Vec<Unit> {
    let mut captured = Vec::new();
    for dr in -1i8..=1 {
        for dc in -1i8..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let Some(pos) = destination.offset(dr, dc) else {
                continue;
            };
            let Some(id) = board.at(pos) else {
                continue;
            };
            let Some(neighbor) = units.get(&id) else {
                continue;
            };
            if neighbor.owner() == mover || !is_encircled(neighbor, board) {
                continue;
            }
            board.remove(pos);
            if let Some(unit) = units.remove(&id) {
                debug!(unit = %id, position = %pos, "captured by encirclement");
                captured.push(unit);
            }
        }
    }
    captured
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn unit(side: Side, kind: UnitKind, at: Position) -> Unit {
        Unit::new(side, kind, at, false)
    }

    fn world(units: Vec<Unit>) -> (Board, BTreeMap<UnitId, Unit>) {
        let board = Board::build(&units).unwrap();
        let map = units.into_iter().map(|u| (u.id(), u)).collect();
        (board, map)
    }

    #[test]
    fn test_runner_encircled_by_four_orthogonal_blockers() {
        let target = unit(Side::Second, UnitKind::Runner, pos(2, 2));
        let (board, _) = world(vec![
            target.clone(),
            unit(Side::First, UnitKind::Runner, pos(1, 2)),
            unit(Side::First, UnitKind::Runner, pos(3, 2)),
            unit(Side::First, UnitKind::Runner, pos(2, 1)),
            unit(Side::First, UnitKind::Runner, pos(2, 3)),
        ]);
        assert!(is_encircled(&target, &board));
    }

    #[test]
    fn test_guardian_needs_all_eight_neighbors_blocked() {
        let blockers = |target: Unit| {
            vec![
                target,
                unit(Side::First, UnitKind::Runner, pos(1, 2)),
                unit(Side::First, UnitKind::Runner, pos(3, 2)),
                unit(Side::First, UnitKind::Runner, pos(2, 1)),
                unit(Side::First, UnitKind::Runner, pos(2, 3)),
            ]
        };

        let guardian = unit(Side::Second, UnitKind::Guardian, pos(2, 2));
        let (board, _) = world(blockers(guardian.clone()));
        // Same four blockers that doom a Runner leave a Guardian free.
        assert!(!is_encircled(&guardian, &board));

        let mut full = blockers(guardian.clone());
        full.extend([
            unit(Side::First, UnitKind::Runner, pos(1, 1)),
            unit(Side::First, UnitKind::Runner, pos(1, 3)),
            unit(Side::First, UnitKind::Runner, pos(3, 1)),
            unit(Side::First, UnitKind::Runner, pos(3, 3)),
        ]);
        let (board, _) = world(full);
        assert!(is_encircled(&guardian, &board));
    }

    #[test]
    fn test_board_edges_count_as_blocked() {
        let target = unit(Side::Second, UnitKind::Runner, pos(0, 0));
        let (board, _) = world(vec![
            target.clone(),
            unit(Side::First, UnitKind::Runner, pos(0, 1)),
            unit(Side::First, UnitKind::Runner, pos(1, 0)),
        ]);
        assert!(is_encircled(&target, &board));
    }

    #[test]
    fn test_encirclement_is_monotonic_under_added_units() {
        let target = unit(Side::Second, UnitKind::Runner, pos(0, 0));
        let mut units = vec![
            target.clone(),
            unit(Side::First, UnitKind::Runner, pos(0, 1)),
            unit(Side::First, UnitKind::Runner, pos(1, 0)),
        ];
        let (board, _) = world(units.clone());
        assert!(is_encircled(&target, &board));

        units.push(unit(Side::First, UnitKind::Guardian, pos(5, 5)));
        let (board, _) = world(units);
        assert!(is_encircled(&target, &board));
    }

    #[test]
    fn test_resolve_captures_encircled_neighbor() {
        let target = unit(Side::Second, UnitKind::Runner, pos(2, 2));
        let (mut board, mut units) = world(vec![
            target.clone(),
            unit(Side::First, UnitKind::Runner, pos(1, 2)),
            unit(Side::First, UnitKind::Runner, pos(3, 2)),
            unit(Side::First, UnitKind::Runner, pos(2, 1)),
            unit(Side::First, UnitKind::Runner, pos(2, 3)),
        ]);

        let captured = resolve(Side::First, pos(2, 3), &mut board, &mut units);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].id(), target.id());
        assert!(board.is_empty(pos(2, 2)));
        assert!(!units.contains_key(&target.id()));
    }

    #[test]
    fn test_resolve_spares_own_units_and_distant_enemies() {
        // An encircled unit of the mover's own side next to the
        // destination, and an encircled enemy far away from it.
        let own = unit(Side::First, UnitKind::Runner, pos(0, 0));
        let distant = unit(Side::Second, UnitKind::Runner, pos(7, 5));
        let (mut board, mut units) = world(vec![
            own.clone(),
            unit(Side::Second, UnitKind::Runner, pos(0, 1)),
            unit(Side::First, UnitKind::Runner, pos(1, 0)),
            distant.clone(),
            unit(Side::First, UnitKind::Runner, pos(7, 4)),
            unit(Side::First, UnitKind::Runner, pos(6, 5)),
        ]);

        let captured = resolve(Side::First, pos(1, 0), &mut board, &mut units);
        assert!(captured.is_empty());
        assert!(units.contains_key(&own.id()));
        assert!(units.contains_key(&distant.id()));
    }

    #[test]
    fn test_resolve_captures_every_qualifying_candidate() {
        // Two enemy Runners flank the destination column, each walled
        // in independently, so both fall in the same sweep.
        let left = unit(Side::Second, UnitKind::Runner, pos(7, 0));
        let right = unit(Side::Second, UnitKind::Runner, pos(7, 2));
        let (mut board, mut units) = world(vec![
            left.clone(),
            right.clone(),
            unit(Side::First, UnitKind::Runner, pos(6, 0)),
            unit(Side::First, UnitKind::Runner, pos(6, 2)),
            unit(Side::First, UnitKind::Runner, pos(7, 3)),
            unit(Side::First, UnitKind::Runner, pos(7, 1)),
        ]);

        let captured = resolve(Side::First, pos(7, 1), &mut board, &mut units);
        let ids: Vec<UnitId> = captured.iter().map(Unit::id).collect();
        assert_eq!(captured.len(), 2);
        assert!(ids.contains(&left.id()));
        assert!(ids.contains(&right.id()));
    }
}
