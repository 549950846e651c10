//! Runtime-tunable engine configuration.
//!
//! Every field has a default taken from `core::constants`, so a partial JSON
//! document only needs to name the knobs it changes.

use super::constants::*;
use super::error::{EngineError, EngineResult};
use crate::rewards::types::Division;
use serde::{Deserialize, Serialize};

/// Top-level configuration for a `BattleEngine`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub economy: EconomyConfig,
    pub flee: FleeConfig,
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json).map_err(|source| EngineError::InvalidData {
            what: "engine config",
            source,
        })
    }
}

/// Division multipliers applied to gold and drop-gate chances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub free_multiplier: f64,
    pub base_multiplier: f64,
    pub premium_multiplier: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            free_multiplier: DIVISION_FREE_MULTIPLIER,
            base_multiplier: DIVISION_BASE_MULTIPLIER,
            premium_multiplier: DIVISION_PREMIUM_MULTIPLIER,
        }
    }
}

impl EconomyConfig {
    /// Multiplier for a division. Negative or non-finite values count as 0.
    pub fn multiplier(&self, division: Division) -> f64 {
        let value = match division {
            Division::Free => self.free_multiplier,
            Division::Base => self.base_multiplier,
            Division::Premium => self.premium_multiplier,
        };
        if value.is_finite() {
            value.max(0.0)
        } else {
            0.0
        }
    }
}

/// Thresholds for the "stronger opponent" flee penalty.
///
/// An opponent counts as stronger when any one threshold is met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleeConfig {
    pub strong_floor: u32,
    pub strong_max_health: u32,
    pub strong_ability_count: usize,
    pub strong_penalty_percent: u32,
    pub weak_penalty_percent: u32,
}

impl Default for FleeConfig {
    fn default() -> Self {
        Self {
            strong_floor: FLEE_STRONG_FLOOR_THRESHOLD,
            strong_max_health: FLEE_STRONG_HEALTH_THRESHOLD,
            strong_ability_count: FLEE_STRONG_ABILITY_THRESHOLD,
            strong_penalty_percent: FLEE_PENALTY_STRONG_PERCENT,
            weak_penalty_percent: FLEE_PENALTY_WEAK_PERCENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_division_multipliers() {
        let economy = EconomyConfig::default();
        assert_eq!(economy.multiplier(Division::Free), 0.8);
        assert_eq!(economy.multiplier(Division::Base), 1.0);
        assert_eq!(economy.multiplier(Division::Premium), 1.25);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EngineConfig::from_json(r#"{ "economy": { "premium_multiplier": 2.0 } }"#).unwrap();
        assert_eq!(config.economy.premium_multiplier, 2.0);
        assert_eq!(config.economy.base_multiplier, DIVISION_BASE_MULTIPLIER);
        assert_eq!(config.flee, FleeConfig::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(
            EngineConfig::from_json("{}").unwrap(),
            EngineConfig::default()
        );
    }

    #[test]
    fn test_malformed_json_is_invalid_data() {
        let err = EngineConfig::from_json("{ economy: ").unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidData {
                what: "engine config",
                ..
            }
        ));
        assert!(!err.is_protocol_violation());
    }

    #[test]
    fn test_negative_multiplier_clamped() {
        let economy = EconomyConfig {
            free_multiplier: -1.0,
            ..EconomyConfig::default()
        };
        assert_eq!(economy.multiplier(Division::Free), 0.0);
    }
}
