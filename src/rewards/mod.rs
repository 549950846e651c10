//! Rarity rolls, drop gates and reward bundle generation.

pub mod drops;
pub mod generation;
pub mod rarity;
pub mod types;

pub use drops::*;
pub use generation::*;
pub use rarity::*;
pub use types::*;
