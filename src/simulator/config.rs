//! Simulation configuration.

use crate::combat::types::BattleType;
use crate::rewards::types::Division;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of battles to simulate
    pub num_battles: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Floor every battle takes place on
    pub floor: u32,

    pub battle_type: BattleType,

    pub division: Division,

    /// Turns per battle before it counts as a timeout
    pub max_turns: u32,

    /// Fight only this catalog monster (None = pick per battle)
    pub monster: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_battles: 1000,
            seed: None,
            floor: 1,
            battle_type: BattleType::Explore,
            division: Division::Base,
            max_turns: 100,
            monster: None,
        }
    }
}

impl SimConfig {
    /// Quick config for checking boss balance on one floor
    pub fn boss_test(floor: u32) -> Self {
        Self {
            num_battles: 200,
            floor,
            battle_type: BattleType::FloorBoss,
            ..Default::default()
        }
    }

    /// Quick config for loot analysis
    pub fn loot_analysis(num_battles: u32, floor: u32) -> Self {
        Self {
            num_battles,
            floor,
            battle_type: BattleType::Mimic,
            division: Division::Premium,
            ..Default::default()
        }
    }
}
