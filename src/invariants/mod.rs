//! First-class invariants over the match state.
//!
//! Invariants are logical properties that must hold after every
//! accepted command. They are testable independently and double as
//! documentation of the engine's guarantees.

use crate::game::Game;

pub mod board_consistent;
pub mod single_spy;
pub mod turn_parity;

pub use board_consistent::BoardConsistentInvariant;
pub use single_spy::SingleSpyInvariant;
pub use turn_parity::TurnParityInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All match invariants as a composable set.
pub type MatchInvariants = (
    BoardConsistentInvariant,
    SingleSpyInvariant,
    TurnParityInvariant,
);

/// Panics in debug builds if any match invariant is violated.
///
/// Called after every accepted command; release builds skip the scan.
pub(crate) fn assert_invariants(game: &Game) {
    #[cfg(debug_assertions)]
    if let Err(violations) = MatchInvariants::check_all(game) {
        panic!("invariant violation after accepted command: {violations:?}");
    }
    #[cfg(not(debug_assertions))]
    let _ = game;
}
