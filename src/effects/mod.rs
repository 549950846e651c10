//! Status effects: types and per-turn processing.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
