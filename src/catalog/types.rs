use crate::effects::EffectChance;
use crate::rewards::types::Rarity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    #[default]
    Physical,
    Magic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDef {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub damage: u32,
    #[serde(default)]
    pub mana_cost: u32,
    #[serde(default)]
    pub health_cost: u32,
    #[serde(default)]
    pub damage_type: DamageType,
    /// Ignores the target's armor
    #[serde(default)]
    pub pierce: bool,
    #[serde(default)]
    pub effects: Vec<EffectChance>,
}

/// Ability or spell definition. Spells live in their own catalog table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub damage: u32,
    #[serde(default)]
    pub heal: u32,
    #[serde(default)]
    pub mana_cost: u32,
    #[serde(default)]
    pub health_cost: u32,
    #[serde(default)]
    pub damage_type: DamageType,
    #[serde(default)]
    pub pierce: bool,
    /// Effects rolled onto the user
    #[serde(default)]
    pub self_effects: Vec<EffectChance>,
    /// Effects rolled onto the opponent
    #[serde(default)]
    pub target_effects: Vec<EffectChance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub description: String,
}

/// Monster template. Stats are floor-0 values, scaled on spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterDef {
    pub id: String,
    pub name: String,
    pub health: u32,
    #[serde(default)]
    pub mana: u32,
    #[serde(default)]
    pub armor: u32,
    #[serde(default)]
    pub weapons: Vec<String>,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub spells: Vec<String>,
}
