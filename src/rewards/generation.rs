//! Reward bundle assembly for a won battle.

use super::drops::{drop_chance, roll_drop};
use super::rarity::roll_rarity;
use super::types::{Division, DropCategory, RewardBundle, WeaponInstance};
use crate::catalog::Catalog;
use crate::combat::types::BattleType;
use crate::core::config::EconomyConfig;
use crate::core::constants::*;
use crate::core::scaling::scale_by_floor;
use crate::rating::{Grade, PerformanceRating};
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

/// Floor-0 (gold, experience) for an encounter type.
pub fn base_rewards(battle_type: BattleType) -> (f64, f64) {
    match battle_type {
        BattleType::FloorBoss => FLOOR_BOSS_BASE_REWARDS,
        BattleType::Mimic => MIMIC_BASE_REWARDS,
        BattleType::Detected => DETECTED_BASE_REWARDS,
        BattleType::Explore => EXPLORE_BASE_REWARDS,
        BattleType::Pvp => PVP_BASE_REWARDS,
    }
}

/// Gold for a win. Never negative.
pub fn roll_gold(
    floor: u32,
    battle_type: BattleType,
    rating: &PerformanceRating,
    division_multiplier: f64,
    rng: &mut impl Rng,
) -> u64 {
    let (base_gold, _) = base_rewards(battle_type);
    let variance = rng.gen_range(GOLD_VARIANCE_MIN..=GOLD_VARIANCE_MAX);
    let gold = scale_by_floor(base_gold, floor, GOLD_FLOOR_RATE)
        * rating.reward_multiplier()
        * division_multiplier.max(0.0)
        * variance;
    gold.round().max(0.0) as u64
}

/// Experience for a win. Division does not affect experience.
pub fn experience_for(floor: u32, battle_type: BattleType, rating: &PerformanceRating) -> u64 {
    let (_, base_xp) = base_rewards(battle_type);
    let xp = scale_by_floor(base_xp, floor, XP_FLOOR_RATE) * rating.reward_multiplier();
    xp.round().max(0.0) as u64
}

/// Fixed rewards that do not depend on any drop roll.
pub fn special_rewards(
    floor: u32,
    battle_type: BattleType,
    rating: &PerformanceRating,
) -> Vec<String> {
    let mut rewards = Vec::new();
    match battle_type {
        BattleType::FloorBoss => {
            if floor > 0 && floor % MILESTONE_FLOOR_INTERVAL == 0 {
                rewards.push(MILESTONE_CHEST_REWARD.to_string());
            }
            if rating.grade >= Grade::S {
                rewards.push(BOSS_TROPHY_REWARD.to_string());
            }
        }
        BattleType::Mimic => rewards.push(MIMIC_ESSENCE_REWARD.to_string()),
        BattleType::Explore | BattleType::Detected | BattleType::Pvp => {}
    }
    rewards
}

fn roll_weapon(
    floor: u32,
    battle_type: BattleType,
    catalog: &Catalog,
    rng: &mut impl Rng,
) -> Option<WeaponInstance> {
    let rarity = roll_rarity(floor, rng);
    let candidates = catalog.weapons_of_rarity(rarity);
    if candidates.is_empty() {
        debug!(
            rarity = rarity.name(),
            floor,
            "No weapons in rolled rarity tier"
        );
        return None;
    }
    let weapon = candidates[rng.gen_range(0..candidates.len())];
    Some(WeaponInstance {
        instance_id: instance_id_from(rng),
        weapon_id: weapon.id.clone(),
        name: weapon.name.clone(),
        rarity,
        found_on_floor: floor,
        found_in: battle_type,
    })
}

fn roll_item(floor: u32, catalog: &Catalog, rng: &mut impl Rng) -> Option<String> {
    let rarity = roll_rarity(floor, rng);
    let candidates = catalog.items_of_rarity(rarity);
    if candidates.is_empty() {
        debug!(
            rarity = rarity.name(),
            floor,
            "No items in rolled rarity tier"
        );
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())].id.clone())
}

/// Build the reward bundle for a won battle.
///
/// Gold always drops. Weapons and items each pass their own drop gate, then
/// roll a rarity tier and pick uniformly within it. Division scales gold and
/// the drop gates only, never rarity.
pub fn generate_rewards(
    floor: u32,
    battle_type: BattleType,
    rating: &PerformanceRating,
    division: Division,
    catalog: &Catalog,
    economy: &EconomyConfig,
    rng: &mut impl Rng,
) -> RewardBundle {
    let division_multiplier = economy.multiplier(division);
    let mut bundle = RewardBundle {
        gold: roll_gold(floor, battle_type, rating, division_multiplier, rng),
        experience: experience_for(floor, battle_type, rating),
        special_rewards: special_rewards(floor, battle_type, rating),
        ..RewardBundle::default()
    };

    let weapon_chance = drop_chance(
        DropCategory::Weapon,
        floor,
        battle_type,
        rating,
        division_multiplier,
    );
    if roll_drop(weapon_chance, rng) {
        bundle
            .weapons
            .extend(roll_weapon(floor, battle_type, catalog, rng));
    }

    let item_chance = drop_chance(
        DropCategory::Item,
        floor,
        battle_type,
        rating,
        division_multiplier,
    );
    if roll_drop(item_chance, rng) {
        bundle.items.extend(roll_item(floor, catalog, rng));
    }

    debug!(
        floor,
        battle_type = %battle_type,
        division = %division,
        rating = %rating,
        gold = bundle.gold,
        weapons = bundle.weapons.len(),
        items = bundle.items.len(),
        "Generated rewards"
    );

    bundle
}

/// Weapon instance id drawn from the injected rng, so seeded runs are reproducible.
pub fn instance_id_from(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}
