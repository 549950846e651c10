//! Shared constants, scaling curves, configuration and errors.

pub mod config;
pub mod constants;
pub mod error;
pub mod scaling;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use scaling::*;
