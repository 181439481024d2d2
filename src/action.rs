//! First-class records of accepted moves.
//!
//! Accepted moves are domain events: they are serialized for
//! persistence, replayed into UI highlighting, and logged for
//! debugging.

use crate::phases::Outcome;
use crate::position::Position;
use crate::types::{Side, Unit, UnitId};
use serde::{Deserialize, Serialize};

/// A move that was validated and applied.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{side} moved {from} -> {to}")]
pub struct MoveRecord {
    /// The side that moved.
    pub side: Side,
    /// The unit that moved.
    pub unit: UnitId,
    /// Square the unit left.
    pub from: Position,
    /// Square the unit now occupies.
    pub to: Position,
}

/// Everything a caller needs to relay after an accepted move:
/// the move itself, the units the capture sweep removed, and the
/// outcome if the move ended the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The accepted move.
    pub record: MoveRecord,
    /// Enemy units removed by encirclement, in sweep order.
    pub captured: Vec<Unit>,
    /// Set when this move won the match.
    pub outcome: Option<Outcome>,
}
