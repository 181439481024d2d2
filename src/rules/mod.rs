//! Pure rules: legal-move generation, capture resolution, and the
//! infiltration win scan. Everything here is a function of a board and
//! a unit list; the state machine in [`crate::Game`] decides when each
//! rule applies.

pub mod capture;
pub mod movement;
pub mod win;

pub use capture::{is_encircled, resolve};
pub use movement::legal_destinations;
pub use win::check_infiltration;
