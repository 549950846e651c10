//! Battle Engine - turn-based combat resolution and procedural rewards
//!
//! Resolves simultaneous two-party combat turns with status effects and
//! special abilities, scores finished battles, and generates floor-scaled
//! loot. Callers own all state; every random decision goes through an
//! injected `rand::Rng`.

pub mod catalog;
pub mod combat;
pub mod core;
pub mod effects;
pub mod engine;
pub mod rating;
pub mod rewards;
pub mod simulator;

pub use crate::core::{EngineConfig, EngineError, EngineResult};
pub use engine::{BattleEngine, VictorySummary};
