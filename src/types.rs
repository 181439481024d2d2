//! Core domain types: sides, unit kinds, and units.

use crate::position::{Position, ROWS};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use uuid::Uuid;

/// A player in the match.
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
pub enum Side {
    /// Sets up on rows 0-3 and moves on even turns.
    First,
    /// Sets up on rows 4-7 and moves on odd turns.
    Second,
}

impl Side {
    /// Both sides, First first.
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Rows this side may place units on during setup.
    pub fn home_rows(self) -> RangeInclusive<u8> {
        match self {
            Side::First => 0..=3,
            Side::Second => 4..=ROWS - 1,
        }
    }

    /// The row this side's secret-role unit must reach to win.
    pub fn goal_row(self) -> u8 {
        match self {
            Side::First => 0,
            Side::Second => ROWS - 1,
        }
    }

    /// Whether this side moves on the given turn number.
    pub fn moves_on(self, turn: u32) -> bool {
        match self {
            Side::First => turn % 2 == 0,
            Side::Second => turn % 2 == 1,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// Kind of mobile unit, fixed for the unit's lifetime.
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
    strum::EnumIter,
)]
pub enum UnitKind {
    /// Slides orthogonally until blocked; encircled when all 4
    /// orthogonal neighbors are blocked.
    Runner,
    /// Steps one square orthogonally or chains empty diagonal hops;
    /// encircled only when all 8 neighbors are blocked.
    Guardian,
}

impl UnitKind {
    /// How many units of this kind a side places during setup.
    ///
    /// The Runner quota includes the one secret-role Runner.
    pub fn quota(self) -> usize {
        match self {
            UnitKind::Runner => 7,
            UnitKind::Guardian => 2,
        }
    }
}

/// Spy-suspicion annotation a player cycles on enemy units.
///
/// Pure bookkeeping for the players' deduction; has no effect on the
/// rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Marking {
    /// No annotation.
    #[default]
    None,
    /// Flagged as a possible spy.
    Suspected,
    /// Written off (for example, believed captured-proof or decoy).
    Condemned,
}

/// Opaque match-unique unit identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct UnitId(Uuid);

impl UnitId {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A mobile unit: a match-lifetime entity created during setup,
/// repositioned by accepted moves, and removed permanently on capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    id: UnitId,
    owner: Side,
    kind: UnitKind,
    position: Position,
    secret_role: bool,
    #[serde(default)]
    marking: Marking,
}

impl Unit {
    /// Creates a unit with a fresh id and no marking.
    pub fn new(owner: Side, kind: UnitKind, position: Position, secret_role: bool) -> Self {
        Self {
            id: UnitId::fresh(),
            owner,
            kind,
            position,
            secret_role,
            marking: Marking::None,
        }
    }

    /// Returns the unit's id.
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Returns the owning side.
    pub fn owner(&self) -> Side {
        self.owner
    }

    /// Returns the unit kind.
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Returns the current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether this unit carries the hidden win-condition role.
    pub fn secret_role(&self) -> bool {
        self.secret_role
    }

    /// Returns the current annotation.
    pub fn marking(&self) -> Marking {
        self.marking
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn set_marking(&mut self, marking: Marking) {
        self.marking = marking;
    }
}
