//! Static content catalogs keyed by id.
//!
//! Catalogs are immutable once built. The engine only reads them; content can
//! come from the built-in tables in `data` or from a JSON document.

pub mod data;
pub mod types;

pub use types::*;

use crate::core::error::{EngineError, EngineResult};
use crate::rewards::types::Rarity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serialized catalog layout: plain lists, indexed by id on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    pub weapons: Vec<WeaponDef>,
    pub abilities: Vec<SkillDef>,
    pub spells: Vec<SkillDef>,
    pub items: Vec<ItemDef>,
    pub monsters: Vec<MonsterDef>,
}

/// Id-indexed content tables. BTreeMap keeps iteration order stable, which
/// keeps seeded reward rolls reproducible.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    weapons: BTreeMap<String, WeaponDef>,
    abilities: BTreeMap<String, SkillDef>,
    spells: BTreeMap<String, SkillDef>,
    items: BTreeMap<String, ItemDef>,
    monsters: BTreeMap<String, MonsterDef>,
}

impl Catalog {
    /// Catalog with the built-in content tables.
    pub fn builtin() -> Self {
        Self::from_data(CatalogData {
            weapons: data::builtin_weapons(),
            abilities: data::builtin_abilities(),
            spells: data::builtin_spells(),
            items: data::builtin_items(),
            monsters: data::builtin_monsters(),
        })
    }

    /// Index catalog data by id. Later duplicates replace earlier ones.
    pub fn from_data(data: CatalogData) -> Self {
        Self {
            weapons: data
                .weapons
                .into_iter()
                .map(|w| (w.id.clone(), w))
                .collect(),
            abilities: data
                .abilities
                .into_iter()
                .map(|a| (a.id.clone(), a))
                .collect(),
            spells: data.spells.into_iter().map(|s| (s.id.clone(), s)).collect(),
            items: data.items.into_iter().map(|i| (i.id.clone(), i)).collect(),
            monsters: data
                .monsters
                .into_iter()
                .map(|m| (m.id.clone(), m))
                .collect(),
        }
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        let data: CatalogData =
            serde_json::from_str(json).map_err(|source| EngineError::InvalidData {
                what: "catalog",
                source,
            })?;
        Ok(Self::from_data(data))
    }

    pub fn weapon(&self, id: &str) -> Option<&WeaponDef> {
        self.weapons.get(id)
    }

    pub fn ability(&self, id: &str) -> Option<&SkillDef> {
        self.abilities.get(id)
    }

    pub fn spell(&self, id: &str) -> Option<&SkillDef> {
        self.spells.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn monster(&self, id: &str) -> Option<&MonsterDef> {
        self.monsters.get(id)
    }

    pub fn monsters(&self) -> impl Iterator<Item = &MonsterDef> {
        self.monsters.values()
    }

    /// Weapons of one rarity tier, in id order.
    pub fn weapons_of_rarity(&self, rarity: Rarity) -> Vec<&WeaponDef> {
        self.weapons
            .values()
            .filter(|w| w.rarity == rarity)
            .collect()
    }

    /// Items of one rarity tier, in id order.
    pub fn items_of_rarity(&self, rarity: Rarity) -> Vec<&ItemDef> {
        self.items.values().filter(|i| i.rarity == rarity).collect()
    }
}
