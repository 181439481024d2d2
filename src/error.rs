//! Typed rejections for engine commands.
//!
//! Every caller-reachable invalid input is a rejection, never a panic,
//! and a rejected command leaves the match state untouched.

use crate::phases::Phase;
use crate::position::Position;
use crate::types::{Side, UnitId, UnitKind};

/// How a command referred to a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum UnitRef {
    /// By id, as in move proposals.
    #[display("unit {}", _0)]
    Id(UnitId),
    /// By square, as in setup retraction.
    #[display("unit at {}", _0)]
    At(Position),
}

/// Setup quota failures, for precise placement feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum QuotaViolation {
    /// Every unit of this kind is already on the board.
    #[display("all {} placements are used", _0)]
    KindExhausted(UnitKind),
    /// The side already placed its secret-role unit.
    #[display("the secret-role unit is already placed")]
    SpyAlreadyPlaced,
    /// Only a Runner may carry the secret role.
    #[display("only a Runner may carry the secret role")]
    SpyMustBeRunner,
    /// A lock attempt with too few or too many units of a kind.
    #[display("{placed} of {required} {kind}s placed")]
    Incomplete {
        /// Kind whose count is off.
        kind: UnitKind,
        /// Units of that kind currently placed.
        placed: usize,
        /// The exact quota.
        required: usize,
    },
    /// A lock attempt with no secret-role unit.
    #[display("no secret-role unit placed")]
    MissingSpy,
}

impl std::error::Error for QuotaViolation {}

/// Rejection returned by every mutating or unit-addressed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum CommandError {
    /// The operation is not allowed in the match's current phase.
    #[display("operation not allowed in the {} phase", _0)]
    OutOfPhase(Phase),
    /// Turn parity does not match the proposing side.
    #[display("it is not {}'s turn", _0)]
    NotYourTurn(Side),
    /// The referenced unit does not exist.
    #[display("{} does not exist", _0)]
    UnitNotFound(UnitRef),
    /// The referenced unit is not owned by the caller.
    #[display("{} does not belong to {}", _0, _1)]
    NotOwner(UnitRef, Side),
    /// The destination is not in the unit's legal set, or the setup
    /// placement targets an occupied square.
    #[display("{} is not a legal destination", _0)]
    IllegalDestination(Position),
    /// Setup placement outside the side's home rows.
    #[display("{} is outside {}'s home rows", _0, _1)]
    TerritoryViolation(Position, Side),
    /// Placement or lock attempt fails a per-kind or secret-role quota.
    #[display("quota violation: {}", _0)]
    #[from]
    QuotaViolation(QuotaViolation),
    /// Locking would leave one of the side's own units encircled.
    #[display("locking would leave the unit at {} encircled", _0)]
    SelfEncirclement(Position),
    /// Markings go on enemy units only.
    #[display("cannot mark your own unit {}", _0)]
    MarkingOwnUnit(UnitId),
    /// Mutating command after the outcome was decided.
    #[display("the match is already finished")]
    MatchAlreadyFinished,
}

impl std::error::Error for CommandError {}
