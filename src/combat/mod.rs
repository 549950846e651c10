//! Turn resolution, special abilities and battle session types.

pub mod logic;
pub mod specials;
pub mod types;

pub use logic::*;
pub use specials::{InterceptContext, InterceptHandler, Interception, SpecialRegistry};
pub use types::*;
