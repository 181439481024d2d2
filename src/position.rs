//! Board coordinates for the 8x6 grid.

use serde::{Deserialize, Serialize};

/// Number of rows on the board.
pub const ROWS: u8 = 8;

/// Number of columns on the board.
pub const COLS: u8 = 6;

/// A square on the board.
///
/// Rows run 0..8 from First's edge to Second's edge, columns run 0..6
/// left to right. A `Position` is validated on construction and is
/// always in bounds; off-board squares are represented by the absence
/// of a `Position` (see [`Position::offset`]).
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
#[display("({row}, {col})")]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Unit offsets to the four orthogonal neighbors.
    pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    /// Unit offsets to the four diagonal neighbors.
    pub const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

    /// Creates a position, or `None` if the coordinates are off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < ROWS && col < COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Returns the row (0..8).
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0..6).
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Offsets by a signed delta, returning `None` off the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if (0..ROWS as i16).contains(&row) && (0..COLS as i16).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Iterates the in-bounds orthogonal neighbors.
    pub fn orthogonal_neighbors(self) -> impl Iterator<Item = Position> {
        Self::ORTHOGONAL
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Iterates the in-bounds diagonal neighbors.
    pub fn diagonal_neighbors(self) -> impl Iterator<Item = Position> {
        Self::DIAGONAL
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Iterates all in-bounds neighbors of the 3x3 block around `self`.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        self.orthogonal_neighbors().chain(self.diagonal_neighbors())
    }

    /// Iterates every square on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Self { row, col }))
    }
}

impl From<Position> for (u8, u8) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl TryFrom<(u8, u8)> for Position {
    type Error = String;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(row, col)
            .ok_or_else(|| format!("position ({row}, {col}) is off the {ROWS}x{COLS} board"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Position::new(7, 5).is_some());
        assert!(Position::new(8, 0).is_none());
        assert!(Position::new(0, 6).is_none());
    }

    #[test]
    fn test_offset_stops_at_edges() {
        let corner = Position::new(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Position::new(1, 1));
    }

    #[test]
    fn test_corner_has_two_orthogonal_and_one_diagonal_neighbor() {
        let corner = Position::new(7, 5).unwrap();
        assert_eq!(corner.orthogonal_neighbors().count(), 2);
        assert_eq!(corner.diagonal_neighbors().count(), 1);
        assert_eq!(corner.neighbors().count(), 3);
    }

    #[test]
    fn test_all_covers_the_board() {
        assert_eq!(Position::all().count(), (ROWS as usize) * (COLS as usize));
    }

    #[test]
    fn test_serde_round_trip_validates_bounds() {
        let pos = Position::new(3, 4).unwrap();
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, "[3,4]");
        assert_eq!(serde_json::from_str::<Position>(&json).unwrap(), pos);
        assert!(serde_json::from_str::<Position>("[9,0]").is_err());
    }
}
