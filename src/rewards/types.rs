use crate::combat::types::BattleType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
    Mythical = 5,
}

impl Rarity {
    /// All tiers in selection order, common first.
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythical,
    ];

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythical => "Mythical",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// A player's economic tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Division {
    Free,
    Base,
    Premium,
}

impl Division {
    pub fn name(&self) -> &'static str {
        match self {
            Division::Free => "free",
            Division::Base => "base",
            Division::Premium => "premium",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Division {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(Division::Free),
            "base" => Ok(Division::Base),
            "premium" => Ok(Division::Premium),
            other => Err(format!("unknown division '{other}'")),
        }
    }
}

/// Loot categories gated by their own drop chance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropCategory {
    Weapon,
    Item,
}

/// A concrete weapon drop. Provenance fields are informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponInstance {
    pub instance_id: Uuid,
    pub weapon_id: String,
    pub name: String,
    pub rarity: Rarity,
    pub found_on_floor: u32,
    pub found_in: BattleType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBundle {
    pub gold: u64,
    pub weapons: Vec<WeaponInstance>,
    pub items: Vec<String>,
    pub experience: u64,
    pub special_rewards: Vec<String>,
}

impl RewardBundle {
    pub fn is_empty(&self) -> bool {
        self.gold == 0
            && self.experience == 0
            && self.weapons.is_empty()
            && self.items.is_empty()
            && self.special_rewards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        for pair in Rarity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Rarity::Mythical.index(), 5);
    }

    #[test]
    fn test_rarity_name() {
        assert_eq!(Rarity::Common.name(), "Common");
        assert_eq!(Rarity::Mythical.name(), "Mythical");
    }

    #[test]
    fn test_division_parse() {
        assert_eq!("premium".parse::<Division>(), Ok(Division::Premium));
        assert_eq!("BASE".parse::<Division>(), Ok(Division::Base));
        assert!("gold".parse::<Division>().is_err());
        assert_eq!(Division::Free.to_string(), "free");
    }

    #[test]
    fn test_empty_bundle() {
        assert!(RewardBundle::default().is_empty());
        let bundle = RewardBundle {
            gold: 1,
            ..RewardBundle::default()
        };
        assert!(!bundle.is_empty());
    }
}
