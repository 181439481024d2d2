//! The match state machine.
//!
//! A [`Game`] owns the canonical unit list and the derived board, and
//! gates every engine operation by phase and turn. All commands are
//! synchronous and all-or-nothing: a rejected command returns a
//! [`CommandError`] and leaves the state byte-for-byte unchanged.
//!
//! One `Game` is the unit of serialization. Hosts must process
//! commands for a given match one at a time; across matches there is
//! no shared state.

use crate::action::{MoveOutcome, MoveRecord};
use crate::board::{Board, BoardError};
use crate::error::{CommandError, QuotaViolation, UnitRef};
use crate::invariants;
use crate::phases::{Outcome, Phase, SideStatus, WinReason};
use crate::position::{COLS, Position, ROWS};
use crate::rules;
use crate::types::{Marking, Side, Unit, UnitId, UnitKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// Complete state of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    status: [SideStatus; 2],
    turn: u32,
    units: BTreeMap<UnitId, Unit>,
    board: Board,
    last_move: Option<MoveRecord>,
    outcome: Option<Outcome>,
}

impl Game {
    /// Creates a match with both sides in setup.
    #[instrument]
    pub fn new() -> Self {
        Self {
            status: [SideStatus::Placing, SideStatus::Placing],
            turn: 0,
            units: BTreeMap::new(),
            board: Board::new(),
            last_move: None,
            outcome: None,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Current phase, derived from lock status and outcome.
    pub fn phase(&self) -> Phase {
        if self.outcome.is_some() {
            Phase::Finished
        } else if self.status.iter().all(|s| *s == SideStatus::Locked) {
            Phase::Active
        } else if self.status.iter().any(|s| *s == SideStatus::Locked) {
            Phase::Locked
        } else {
            Phase::Setup
        }
    }

    /// Setup progress of one side.
    pub fn side_status(&self, side: Side) -> SideStatus {
        self.status[side.index()]
    }

    /// Turn counter; even turns belong to First, odd to Second.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The board view.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Iterates all live units.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Looks up a live unit by id.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// The most recent accepted move, for UI highlighting.
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.last_move
    }

    /// The terminal outcome, once a win condition fired.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Legal destinations for a unit, ignoring turn ownership.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnitNotFound`] if the unit is not alive.
    pub fn legal_moves(&self, unit: UnitId) -> Result<Vec<Position>, CommandError> {
        let unit = self
            .units
            .get(&unit)
            .ok_or(CommandError::UnitNotFound(UnitRef::Id(unit)))?;
        Ok(rules::legal_destinations(unit, &self.board))
    }

    /// Renders the board as one character per square, row by row:
    /// `r`/`g` for First's Runners and Guardians, `R`/`G` for
    /// Second's, `.` for empty.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity((ROWS as usize) * (COLS as usize + 1));
        for row in 0..ROWS {
            for col in 0..COLS {
                let glyph = Position::new(row, col)
                    .and_then(|pos| self.board.at(pos))
                    .and_then(|id| self.units.get(&id))
                    .map(|unit| match (unit.owner(), unit.kind()) {
                        (Side::First, UnitKind::Runner) => 'r',
                        (Side::First, UnitKind::Guardian) => 'g',
                        (Side::Second, UnitKind::Runner) => 'R',
                        (Side::Second, UnitKind::Guardian) => 'G',
                    })
                    .unwrap_or('.');
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    // ─────────────────────────────────────────────────────────────
    //  Setup commands
    // ─────────────────────────────────────────────────────────────

    /// Places a unit during setup.
    ///
    /// Valid only while the side is still placing, only on the side's
    /// home rows, only on an empty square, and only within the
    /// per-kind and secret-role quotas.
    #[instrument(skip(self))]
    pub fn place_unit(
        &mut self,
        side: Side,
        kind: UnitKind,
        position: Position,
        secret_role: bool,
    ) -> Result<UnitId, CommandError> {
        self.ensure_placing(side)?;
        if !side.home_rows().contains(&position.row()) {
            return Err(CommandError::TerritoryViolation(position, side));
        }
        if !self.board.is_empty(position) {
            return Err(CommandError::IllegalDestination(position));
        }
        let placed = self.side_units(side).filter(|u| u.kind() == kind).count();
        if placed >= kind.quota() {
            return Err(QuotaViolation::KindExhausted(kind).into());
        }
        if secret_role {
            if kind != UnitKind::Runner {
                return Err(QuotaViolation::SpyMustBeRunner.into());
            }
            if self.side_units(side).any(Unit::secret_role) {
                return Err(QuotaViolation::SpyAlreadyPlaced.into());
            }
        }

        let unit = Unit::new(side, kind, position, secret_role);
        let id = unit.id();
        self.board.place(&unit);
        self.units.insert(id, unit);
        debug!(%side, %kind, %position, "unit placed");
        invariants::assert_invariants(self);
        Ok(id)
    }

    /// Retracts a previously placed unit during setup.
    ///
    /// Returns the retracted unit so callers can restock their
    /// placement tray.
    #[instrument(skip(self))]
    pub fn remove_unit(&mut self, side: Side, position: Position) -> Result<Unit, CommandError> {
        self.ensure_placing(side)?;
        let id = self
            .board
            .at(position)
            .ok_or(CommandError::UnitNotFound(UnitRef::At(position)))?;
        let owner = self.units[&id].owner();
        if owner != side {
            return Err(CommandError::NotOwner(UnitRef::At(position), side));
        }

        self.board.remove(position);
        let unit = self
            .units
            .remove(&id)
            .expect("board cell maps to a live unit");
        debug!(%side, %position, "unit retracted");
        invariants::assert_invariants(self);
        Ok(unit)
    }

    /// Locks the side's setup; the match goes active once both sides
    /// are locked.
    ///
    /// Succeeds only if every quota is met exactly, the secret-role
    /// unit is placed, and no unit is encircled by the side's own
    /// formation.
    #[instrument(skip(self))]
    pub fn lock_setup(&mut self, side: Side) -> Result<Phase, CommandError> {
        self.ensure_placing(side)?;
        for kind in UnitKind::iter() {
            let placed = self.side_units(side).filter(|u| u.kind() == kind).count();
            if placed != kind.quota() {
                return Err(QuotaViolation::Incomplete {
                    kind,
                    placed,
                    required: kind.quota(),
                }
                .into());
            }
        }
        if !self.side_units(side).any(Unit::secret_role) {
            return Err(QuotaViolation::MissingSpy.into());
        }

        // Self-encirclement is judged against the side's own partial
        // board: only the side's units block, per placement rules.
        let own_board =
            Board::build(self.side_units(side)).expect("placements occupy distinct cells");
        if let Some(unit) = self
            .side_units(side)
            .find(|u| rules::is_encircled(u, &own_board))
        {
            return Err(CommandError::SelfEncirclement(unit.position()));
        }

        self.status[side.index()] = SideStatus::Locked;
        let phase = self.phase();
        info!(%side, %phase, "setup locked");
        invariants::assert_invariants(self);
        Ok(phase)
    }

    // ─────────────────────────────────────────────────────────────
    //  Active-phase commands
    // ─────────────────────────────────────────────────────────────

    /// Proposes a move; on acceptance applies it, sweeps for captures,
    /// and evaluates both win conditions.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn propose_move(
        &mut self,
        side: Side,
        unit: UnitId,
        destination: Position,
    ) -> Result<MoveOutcome, CommandError> {
        if self.outcome.is_some() {
            return Err(CommandError::MatchAlreadyFinished);
        }
        let phase = self.phase();
        if phase != Phase::Active {
            return Err(CommandError::OutOfPhase(phase));
        }
        if !side.moves_on(self.turn) {
            return Err(CommandError::NotYourTurn(side));
        }
        let mover = self
            .units
            .get(&unit)
            .ok_or(CommandError::UnitNotFound(UnitRef::Id(unit)))?;
        if mover.owner() != side {
            return Err(CommandError::NotOwner(UnitRef::Id(unit), side));
        }
        if !rules::legal_destinations(mover, &self.board).contains(&destination) {
            return Err(CommandError::IllegalDestination(destination));
        }

        // Validation complete; apply.
        let from = mover.position();
        self.board.apply_move(from, destination);
        if let Some(moved) = self.units.get_mut(&unit) {
            moved.set_position(destination);
        }

        let captured = rules::resolve(side, destination, &mut self.board, &mut self.units);

        // Capturing the opponent's secret-role unit wins on the spot;
        // otherwise the mover may have walked its own spy home.
        let outcome = if captured.iter().any(Unit::secret_role) {
            Some(Outcome::new(side, WinReason::SpyCaptured))
        } else {
            rules::check_infiltration(&self.board, &self.units)
                .filter(|infiltrator| *infiltrator == side)
                .map(|infiltrator| Outcome::new(infiltrator, WinReason::Infiltration))
        };

        let record = MoveRecord {
            side,
            unit,
            from,
            to: destination,
        };
        self.last_move = Some(record);
        self.turn += 1;
        if let Some(outcome) = outcome {
            self.outcome = Some(outcome);
            info!(%outcome, "match finished");
        }
        invariants::assert_invariants(self);

        Ok(MoveOutcome {
            record,
            captured,
            outcome,
        })
    }

    /// Stores a spy-suspicion annotation on an enemy unit.
    ///
    /// Rules-inert bookkeeping; valid while the match is unfinished.
    #[instrument(skip(self))]
    pub fn set_marking(
        &mut self,
        side: Side,
        unit: UnitId,
        marking: Marking,
    ) -> Result<(), CommandError> {
        if self.outcome.is_some() {
            return Err(CommandError::MatchAlreadyFinished);
        }
        let target = self
            .units
            .get_mut(&unit)
            .ok_or(CommandError::UnitNotFound(UnitRef::Id(unit)))?;
        if target.owner() == side {
            return Err(CommandError::MarkingOwnUnit(unit));
        }
        target.set_marking(marking);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Persistence seam
    // ─────────────────────────────────────────────────────────────

    /// Extracts a serializable snapshot of the whole match state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            turn: self.turn,
            units: self.units.values().cloned().collect(),
            last_move: self.last_move,
            outcome: self.outcome,
        }
    }

    /// Rebuilds a match from a snapshot, reconstructing the derived
    /// board.
    ///
    /// # Errors
    ///
    /// [`BoardError::DuplicatePosition`] if the snapshot's unit list
    /// puts two units on one square.
    pub fn restore(snapshot: Snapshot) -> Result<Self, BoardError> {
        let board = Board::build(snapshot.units.iter())?;
        Ok(Self {
            status: snapshot.status,
            turn: snapshot.turn,
            units: snapshot
                .units
                .into_iter()
                .map(|unit| (unit.id(), unit))
                .collect(),
            board,
            last_move: snapshot.last_move,
            outcome: snapshot.outcome,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Helpers
    // ─────────────────────────────────────────────────────────────

    fn side_units(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(move |u| u.owner() == side)
    }

    fn ensure_placing(&self, side: Side) -> Result<(), CommandError> {
        if self.outcome.is_some() {
            return Err(CommandError::MatchAlreadyFinished);
        }
        let phase = self.phase();
        let placing = matches!(phase, Phase::Setup | Phase::Locked)
            && self.status[side.index()] == SideStatus::Placing;
        if placing {
            Ok(())
        } else {
            Err(CommandError::OutOfPhase(phase))
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable image of a [`Game`], the engine's only persistence
/// format. The derived board is omitted and rebuilt on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Per-side setup progress, indexed First then Second.
    pub status: [SideStatus; 2],
    /// Turn counter.
    pub turn: u32,
    /// Every live unit.
    pub units: Vec<Unit>,
    /// Most recent accepted move.
    pub last_move: Option<MoveRecord>,
    /// Terminal outcome, if decided.
    pub outcome: Option<Outcome>,
}
