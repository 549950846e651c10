//! Built-in weapon, ability, spell, item and monster definitions.

use super::types::{DamageType, ItemDef, MonsterDef, SkillDef, WeaponDef};
use crate::core::constants::{
    ACCEPTING_FATE_ABILITY_ID, COUNTER_ABILITY_ID, DODGE_ABILITY_ID, IMMORTAL_ABILITY_ID,
    SILENCE_SPELL_ID,
};
use crate::effects::{EffectChance, EffectKind};
use crate::rewards::types::Rarity;

fn weapon(id: &str, name: &str, rarity: Rarity, damage: u32) -> WeaponDef {
    WeaponDef {
        id: id.to_string(),
        name: name.to_string(),
        rarity,
        damage,
        mana_cost: 0,
        health_cost: 0,
        damage_type: DamageType::Physical,
        pierce: false,
        effects: Vec::new(),
    }
}

fn skill(id: &str, name: &str) -> SkillDef {
    SkillDef {
        id: id.to_string(),
        name: name.to_string(),
        damage: 0,
        heal: 0,
        mana_cost: 0,
        health_cost: 0,
        damage_type: DamageType::Physical,
        pierce: false,
        self_effects: Vec::new(),
        target_effects: Vec::new(),
    }
}

fn spell(id: &str, name: &str, mana_cost: u32) -> SkillDef {
    SkillDef {
        mana_cost,
        damage_type: DamageType::Magic,
        ..skill(id, name)
    }
}

fn item(id: &str, name: &str, rarity: Rarity, description: &str) -> ItemDef {
    ItemDef {
        id: id.to_string(),
        name: name.to_string(),
        rarity,
        description: description.to_string(),
    }
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn builtin_weapons() -> Vec<WeaponDef> {
    use EffectKind::*;
    vec![
        // Common
        weapon("rusty_sword", "Rusty Sword", Rarity::Common, 8),
        weapon("wooden_club", "Wooden Club", Rarity::Common, 7),
        WeaponDef {
            pierce: true,
            ..weapon("short_bow", "Short Bow", Rarity::Common, 6)
        },
        // Uncommon
        WeaponDef {
            effects: vec![EffectChance::new(Bleeding, 10, 3, 3)],
            ..weapon("iron_sword", "Iron Sword", Rarity::Uncommon, 12)
        },
        WeaponDef {
            pierce: true,
            ..weapon("hunting_bow", "Hunting Bow", Rarity::Uncommon, 10)
        },
        WeaponDef {
            effects: vec![EffectChance::new(Poison, 25, 3, 4)],
            ..weapon("poison_dagger", "Poison Dagger", Rarity::Uncommon, 9)
        },
        // Rare
        WeaponDef {
            effects: vec![EffectChance::new(Burning, 20, 2, 5)],
            ..weapon("flame_blade", "Flame Blade", Rarity::Rare, 16)
        },
        WeaponDef {
            effects: vec![EffectChance::new(BrokenArmor, 15, 3, 0)],
            ..weapon("war_hammer", "War Hammer", Rarity::Rare, 18)
        },
        WeaponDef {
            mana_cost: 5,
            damage_type: DamageType::Magic,
            effects: vec![EffectChance::new(Frozen, 10, 1, 0)],
            ..weapon("frost_staff", "Frost Staff", Rarity::Rare, 14)
        },
        // Epic
        WeaponDef {
            health_cost: 3,
            effects: vec![EffectChance::new(HealthDrain, 25, 3, 4)],
            ..weapon("vampiric_scythe", "Vampiric Scythe", Rarity::Epic, 20)
        },
        WeaponDef {
            pierce: true,
            effects: vec![EffectChance::new(Paralyzed, 15, 1, 0)],
            ..weapon("thunder_spear", "Thunder Spear", Rarity::Epic, 22)
        },
        // Legendary
        WeaponDef {
            effects: vec![
                EffectChance::new(Burning, 30, 3, 6),
                EffectChance::new(Bleeding, 20, 3, 4),
            ],
            ..weapon(
                "dragonbone_greatsword",
                "Dragonbone Greatsword",
                Rarity::Legendary,
                30,
            )
        },
        WeaponDef {
            mana_cost: 10,
            damage_type: DamageType::Magic,
            effects: vec![EffectChance::new(Decay, 30, 4, 5)],
            ..weapon("soulreaver", "Soulreaver", Rarity::Legendary, 28)
        },
        // Mythical
        WeaponDef {
            effects: vec![
                EffectChance::new(BrokenArmor, 50, 3, 0),
                EffectChance::new(Stunned, 10, 1, 0),
            ],
            ..weapon("worldsplitter", "Worldsplitter", Rarity::Mythical, 45)
        },
    ]
}

pub fn builtin_abilities() -> Vec<SkillDef> {
    use EffectKind::*;
    vec![
        skill(COUNTER_ABILITY_ID, "Counter"),
        skill(DODGE_ABILITY_ID, "Dodge"),
        skill(ACCEPTING_FATE_ABILITY_ID, "Accepting Fate"),
        skill(IMMORTAL_ABILITY_ID, "Immortal"),
        SkillDef {
            damage: 15,
            mana_cost: 5,
            ..skill("power_strike", "Power Strike")
        },
        SkillDef {
            heal: 20,
            mana_cost: 8,
            self_effects: vec![EffectChance::guaranteed(Regenerating, 3, 4)],
            ..skill("second_wind", "Second Wind")
        },
        SkillDef {
            mana_cost: 6,
            self_effects: vec![EffectChance::guaranteed(Empowered, 3, 0)],
            ..skill("battle_cry", "Battle Cry")
        },
        SkillDef {
            damage: 8,
            mana_cost: 10,
            target_effects: vec![EffectChance::new(Stunned, 30, 1, 0)],
            ..skill("shield_bash", "Shield Bash")
        },
        SkillDef {
            damage: 6,
            mana_cost: 4,
            target_effects: vec![EffectChance::new(Bleeding, 60, 3, 3)],
            ..skill("rend", "Rend")
        },
    ]
}

pub fn builtin_spells() -> Vec<SkillDef> {
    use EffectKind::*;
    vec![
        SkillDef {
            damage: 20,
            target_effects: vec![EffectChance::new(Burning, 30, 2, 5)],
            ..spell("fireball", "Fireball", 12)
        },
        SkillDef {
            damage: 14,
            target_effects: vec![EffectChance::new(Frozen, 20, 1, 0)],
            ..spell("frost_bolt", "Frost Bolt", 10)
        },
        SkillDef {
            heal: 10,
            self_effects: vec![EffectChance::guaranteed(HealingRain, 3, 6)],
            ..spell("healing_rain", "Healing Rain", 15)
        },
        SkillDef {
            damage: 12,
            target_effects: vec![EffectChance::new(HealthDrain, 50, 3, 4)],
            ..spell("drain_life", "Drain Life", 14)
        },
        SkillDef {
            self_effects: vec![EffectChance::guaranteed(ManaRegenerating, 3, 6)],
            ..spell("arcane_surge", "Arcane Surge", 0)
        },
        SkillDef {
            target_effects: vec![
                EffectChance::new(Weakened, 60, 2, 0),
                EffectChance::new(Decay, 40, 3, 3),
            ],
            ..spell("curse", "Curse", 9)
        },
        spell(SILENCE_SPELL_ID, "Silence", 8),
    ]
}

/// Loot items. No mythical entries exist, so that tier never yields an item.
pub fn builtin_items() -> Vec<ItemDef> {
    vec![
        item(
            "health_potion",
            "Health Potion",
            Rarity::Common,
            "Restores 30 health",
        ),
        item(
            "mana_potion",
            "Mana Potion",
            Rarity::Common,
            "Restores 20 mana",
        ),
        item("bandage", "Bandage", Rarity::Common, "Stops bleeding"),
        item(
            "elixir_of_vigor",
            "Elixir of Vigor",
            Rarity::Uncommon,
            "Restores 60 health",
        ),
        item(
            "smoke_bomb",
            "Smoke Bomb",
            Rarity::Uncommon,
            "Guarantees a clean escape",
        ),
        item(
            "phoenix_feather",
            "Phoenix Feather",
            Rarity::Rare,
            "Revives once",
        ),
        item(
            "scroll_of_teleport",
            "Scroll of Teleport",
            Rarity::Rare,
            "Skips a floor",
        ),
        item(
            "ancient_rune",
            "Ancient Rune",
            Rarity::Epic,
            "Empowers a weapon",
        ),
        item(
            "dragon_heart",
            "Dragon Heart",
            Rarity::Legendary,
            "Permanently raises max health",
        ),
    ]
}

pub fn builtin_monsters() -> Vec<MonsterDef> {
    vec![
        MonsterDef {
            id: "slime".to_string(),
            name: "Slime".to_string(),
            health: 30,
            mana: 0,
            armor: 0,
            weapons: ids(&["wooden_club"]),
            abilities: Vec::new(),
            spells: Vec::new(),
        },
        MonsterDef {
            id: "goblin".to_string(),
            name: "Goblin".to_string(),
            health: 40,
            mana: 10,
            armor: 1,
            weapons: ids(&["rusty_sword", "poison_dagger"]),
            abilities: ids(&["dodge"]),
            spells: Vec::new(),
        },
        MonsterDef {
            id: "skeleton_archer".to_string(),
            name: "Skeleton Archer".to_string(),
            health: 45,
            mana: 0,
            armor: 2,
            weapons: ids(&["short_bow", "hunting_bow"]),
            abilities: Vec::new(),
            spells: Vec::new(),
        },
        MonsterDef {
            id: "cave_troll".to_string(),
            name: "Cave Troll".to_string(),
            health: 90,
            mana: 20,
            armor: 4,
            weapons: ids(&["war_hammer"]),
            abilities: ids(&["power_strike", "counter", "shield_bash"]),
            spells: Vec::new(),
        },
        MonsterDef {
            id: "dark_mage".to_string(),
            name: "Dark Mage".to_string(),
            health: 55,
            mana: 80,
            armor: 0,
            weapons: ids(&["frost_staff"]),
            abilities: Vec::new(),
            spells: ids(&["fireball", "curse", "drain_life", "silence"]),
        },
        MonsterDef {
            id: "mimic".to_string(),
            name: "Mimic".to_string(),
            health: 70,
            mana: 20,
            armor: 3,
            weapons: ids(&["rusty_sword"]),
            abilities: ids(&["rend", "counter"]),
            spells: Vec::new(),
        },
        MonsterDef {
            id: "floor_guardian".to_string(),
            name: "Floor Guardian".to_string(),
            health: 150,
            mana: 60,
            armor: 5,
            weapons: ids(&["flame_blade", "thunder_spear"]),
            abilities: ids(&["battle_cry", "power_strike", "accepting_fate"]),
            spells: ids(&["frost_bolt"]),
        },
    ]
}
