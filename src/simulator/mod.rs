//! Battle balance simulator for Monte Carlo analysis.
//!
//! Run thousands of seeded battles to analyze:
//! - Win rates and battle length per floor and encounter type
//! - Rating grade distribution
//! - Gold, experience and drop rates per victory
//! - Weapon rarity distribution
//!
//! The simulator drives `BattleEngine` directly, so results match real
//! battle resolution.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{BattleRecord, SimReport};
pub use runner::{run_simulation, sim_player};
