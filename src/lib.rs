//! Rules engine for a two-player hidden-spy encirclement game on an
//! 8x6 board.
//!
//! Each side secretly assigns one of its Runners the spy role, then
//! wins either by walking that unit onto its goal row or by capturing
//! the opponent's spy. Capture is never by landing: a unit falls the
//! moment its type-specific neighbor set is fully blocked.
//!
//! The crate is the rules core only. Persistence, realtime
//! notification, identity, and transport are external collaborators
//! that drive the engine through [`Game`]'s commands and read back
//! [`Snapshot`]s; the engine trusts the `side` argument it is handed
//! and expects hosts to serialize commands per match.
//!
//! # Example
//!
//! ```
//! use masquerade::{Game, Phase, Position, Side, UnitKind};
//!
//! # fn main() -> Result<(), masquerade::CommandError> {
//! let mut game = Game::new();
//! let square = Position::new(2, 0).expect("on the board");
//! game.place_unit(Side::First, UnitKind::Runner, square, true)?;
//! assert_eq!(game.phase(), Phase::Setup);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod error;
mod game;
mod phases;
mod position;
mod types;

// Public rule and invariant surfaces
pub mod invariants;
pub mod rules;

// Crate-level exports - accepted-move events
pub use action::{MoveOutcome, MoveRecord};

// Crate-level exports - board view
pub use board::{Board, BoardError};

// Crate-level exports - command rejections
pub use error::{CommandError, QuotaViolation, UnitRef};

// Crate-level exports - the match state machine
pub use game::{Game, Snapshot};

// Crate-level exports - phases and outcomes
pub use phases::{Outcome, Phase, SideStatus, WinReason};

// Crate-level exports - geometry
pub use position::{COLS, Position, ROWS};

// Crate-level exports - domain types
pub use types::{Marking, Side, Unit, UnitId, UnitKind};
