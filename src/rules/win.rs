//! Infiltration win scan.
//!
//! Only the scan-based condition lives here. The complementary win,
//! capturing the opponent's secret-role unit, is an event the state
//! machine detects in the capture sweep's result.

use crate::board::Board;
use crate::position::{COLS, Position};
use crate::types::{Side, Unit, UnitId, UnitKind};
use std::collections::BTreeMap;
use tracing::instrument;

/// Scans each side's goal row for that side's secret-role Runner.
///
/// Returns the infiltrating side, if any. Callers check this after a
/// move and apply it for the moving side only.
#[instrument(skip(board, units))]
pub fn check_infiltration(board: &Board, units: &BTreeMap<UnitId, Unit>) -> Option<Side> {
    Side::BOTH.into_iter().find(|&side| {
        let goal = side.goal_row();
        (0..COLS)
            .filter_map(|col| Position::new(goal, col))
            .filter_map(|pos| board.at(pos))
            .filter_map(|id| units.get(&id))
            .any(|unit| {
                unit.owner() == side && unit.kind() == UnitKind::Runner && unit.secret_role()
            })
    })
}
