//! Match phases and terminal outcomes.

use crate::types::Side;
use serde::{Deserialize, Serialize};

/// Phase of the match as a whole.
///
/// Derived from the per-side lock status and the outcome: the match is
/// `Locked` while exactly one side has finished setup, `Active` once
/// both have, and `Finished` the instant a win condition fires.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Phase {
    /// Both sides are still placing units.
    Setup,
    /// One side has locked its setup and is waiting on the opponent.
    Locked,
    /// Both sides locked; moves alternate by turn parity.
    Active,
    /// A win condition fired. Terminal.
    Finished,
}

/// Setup progress of a single side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum SideStatus {
    /// Still placing (or retracting) units.
    Placing,
    /// Setup confirmed; formation is final.
    Locked,
}

/// Why the match ended.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum WinReason {
    /// The winner's secret-role unit reached its goal row.
    Infiltration,
    /// The loser's secret-role unit was captured by encirclement.
    SpyCaptured,
}

/// Terminal result of a finished match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{winner} wins by {reason}")]
pub struct Outcome {
    winner: Side,
    reason: WinReason,
}

impl Outcome {
    /// Creates an outcome.
    pub fn new(winner: Side, reason: WinReason) -> Self {
        Self { winner, reason }
    }

    /// The side that won.
    pub fn winner(&self) -> Side {
        self.winner
    }

    /// Why it won.
    pub fn reason(&self) -> WinReason {
        self.reason
    }
}
