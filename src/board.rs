//! Derived board grid over the canonical unit list.

use crate::position::{COLS, Position, ROWS};
use crate::types::{Unit, UnitId};

type Cells = [[Option<UnitId>; COLS as usize]; ROWS as usize];

/// The 8x6 grid, holding at most one unit id per cell.
///
/// The board is a derived view: the unit list is canonical and the
/// grid is kept synchronized on every mutation. The invariant
/// "grid cell <-> unit position" is enforced by [`crate::Game`] and
/// checked by [`crate::invariants::BoardConsistentInvariant`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: Cells,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from a unit list.
    ///
    /// # Errors
    ///
    /// Fails if two units share a position. The state machine never
    /// produces such a list; this surfaces programmer errors and
    /// corrupt snapshots at the restore seam.
    pub fn build<'a, I>(units: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = &'a Unit>,
    {
        let mut board = Self::new();
        for unit in units {
            let cell = board.cell_mut(unit.position());
            if cell.is_some() {
                return Err(BoardError::DuplicatePosition(unit.position()));
            }
            *cell = Some(unit.id());
        }
        Ok(board)
    }

    /// Returns the id of the unit on `pos`, if any.
    pub fn at(&self, pos: Position) -> Option<UnitId> {
        self.cells[pos.row() as usize][pos.col() as usize]
    }

    /// Whether `pos` holds no unit.
    ///
    /// Out-of-range squares cannot be named by a [`Position`] and are
    /// treated as blocked wherever a signed offset walks off the board.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.at(pos).is_none()
    }

    /// Iterates the occupied squares in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, UnitId)> {
        Position::all().filter_map(|pos| self.at(pos).map(|id| (pos, id)))
    }

    /// Places a unit on its cell. Caller guarantees the cell is empty.
    pub(crate) fn place(&mut self, unit: &Unit) {
        *self.cell_mut(unit.position()) = Some(unit.id());
    }

    /// Clears the old cell and sets the new one. Caller has already
    /// validated legality.
    pub(crate) fn apply_move(&mut self, from: Position, to: Position) {
        let id = self.cell_mut(from).take();
        *self.cell_mut(to) = id;
    }

    /// Clears a cell; used by the capture sweep and setup retraction.
    pub(crate) fn remove(&mut self, pos: Position) {
        *self.cell_mut(pos) = None;
    }

    fn cell_mut(&mut self, pos: Position) -> &mut Option<UnitId> {
        &mut self.cells[pos.row() as usize][pos.col() as usize]
    }
}

/// Errors constructing a board from a unit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// Two units in the list occupy the same square.
    #[display("two units occupy {}", _0)]
    DuplicatePosition(Position),
}

impl std::error::Error for BoardError {}
