use super::types::DropCategory;
use crate::combat::types::BattleType;
use crate::core::constants::*;
use crate::core::scaling::floor_curve;
use crate::rating::PerformanceRating;
use rand::Rng;

/// Flat drop-chance bonus by encounter type.
pub fn battle_type_drop_bonus(battle_type: BattleType) -> f64 {
    match battle_type {
        BattleType::FloorBoss => DROP_BONUS_FLOOR_BOSS,
        BattleType::Mimic => DROP_BONUS_MIMIC,
        BattleType::Detected => DROP_BONUS_DETECTED,
        BattleType::Explore => DROP_BONUS_EXPLORE,
        BattleType::Pvp => DROP_BONUS_PVP,
    }
}

pub fn base_drop_chance(category: DropCategory) -> f64 {
    match category {
        DropCategory::Weapon => WEAPON_DROP_BASE_CHANCE,
        DropCategory::Item => ITEM_DROP_BASE_CHANCE,
    }
}

/// Probability that a category drops at all.
///
/// (base + floor bonus + battle-type bonus + rating bonus) x division
/// multiplier, capped at `DROP_CHANCE_MAX`.
pub fn drop_chance(
    category: DropCategory,
    floor: u32,
    battle_type: BattleType,
    rating: &PerformanceRating,
    division_multiplier: f64,
) -> f64 {
    let chance = base_drop_chance(category)
        + DROP_CHANCE_PER_FLOOR_CURVE * floor_curve(floor)
        + battle_type_drop_bonus(battle_type)
        + rating.drop_bonus();
    (chance * division_multiplier.max(0.0)).clamp(0.0, DROP_CHANCE_MAX)
}

pub fn roll_drop(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::Grade;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn average() -> PerformanceRating {
        PerformanceRating::with_grade(Grade::C)
    }

    #[test]
    fn test_boss_beats_explore() {
        let rating = average();
        let explore = drop_chance(DropCategory::Weapon, 1, BattleType::Explore, &rating, 1.0);
        let boss = drop_chance(DropCategory::Weapon, 1, BattleType::FloorBoss, &rating, 1.0);
        assert!(
            explore < boss,
            "explore {explore} should be below boss {boss}"
        );
    }

    #[test]
    fn test_battle_type_bonus_ordering() {
        let boss = battle_type_drop_bonus(BattleType::FloorBoss);
        let mimic = battle_type_drop_bonus(BattleType::Mimic);
        let detected = battle_type_drop_bonus(BattleType::Detected);
        let explore = battle_type_drop_bonus(BattleType::Explore);
        assert!(boss > mimic && mimic > detected && detected > explore);
        assert_eq!(battle_type_drop_bonus(BattleType::Pvp), 0.0);
    }

    #[test]
    fn test_weapon_floor_one_value() {
        // 0.10 + 0.002 + 0 + 0.03
        let rating = average();
        let chance = drop_chance(DropCategory::Weapon, 1, BattleType::Explore, &rating, 1.0);
        assert!((chance - 0.132).abs() < 1e-9, "got {chance}");
    }

    #[test]
    fn test_chance_capped() {
        let best = PerformanceRating::with_grade(Grade::SPlus);
        let chance = drop_chance(
            DropCategory::Item,
            10_000,
            BattleType::FloorBoss,
            &best,
            5.0,
        );
        assert_eq!(chance, DROP_CHANCE_MAX);
    }

    #[test]
    fn test_division_scales_chance() {
        let free = drop_chance(DropCategory::Item, 10, BattleType::Mimic, &average(), 0.8);
        let premium = drop_chance(DropCategory::Item, 10, BattleType::Mimic, &average(), 1.25);
        assert!(free < premium);
        assert_eq!(
            drop_chance(DropCategory::Item, 10, BattleType::Mimic, &average(), -1.0),
            0.0
        );
    }

    #[test]
    fn test_roll_drop_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let trials = 50_000;
        let hits = (0..trials).filter(|_| roll_drop(0.3, &mut rng)).count();
        let rate = hits as f64 / trials as f64;
        assert!((rate - 0.3).abs() < 0.01, "Expected ~30%, got {rate}");
        assert!(!roll_drop(0.0, &mut rng));
    }
}
