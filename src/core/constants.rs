// Floor scaling
pub const MAX_EFFECTIVE_FLOOR: u32 = 500;
pub const FLOOR_CURVE_EXPONENT: f64 = 0.75;

// Monster scaling (applied through scale_by_floor)
pub const MONSTER_HEALTH_FLOOR_RATE: f64 = 0.05;
pub const MONSTER_MANA_FLOOR_RATE: f64 = 0.02;
pub const MONSTER_POWER_FLOOR_RATE: f64 = 0.03;
pub const MONSTER_ARMOR_FLOOR_RATE: f64 = 0.02;

// Combat
pub const BASIC_ATTACK_ID: &str = "basic_attack";
pub const BASIC_ATTACK_DAMAGE: u32 = 5;
pub const BASE_CRIT_CHANCE_PERCENT: u32 = 10;
pub const EMPOWERED_CRIT_BONUS_PERCENT: u32 = 15;
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const EMPOWERED_DAMAGE_MULTIPLIER: f64 = 1.1;
pub const WEAKENED_DAMAGE_MULTIPLIER: f64 = 0.75;
pub const MIN_DAMAGE_AFTER_ARMOR: u32 = 1;

// Special interactions
pub const COUNTER_ABILITY_ID: &str = "counter";
pub const DODGE_ABILITY_ID: &str = "dodge";
pub const SILENCE_SPELL_ID: &str = "silence";
pub const ACCEPTING_FATE_ABILITY_ID: &str = "accepting_fate";
pub const IMMORTAL_ABILITY_ID: &str = "immortal";
pub const COUNTER_DAMAGE: u32 = 15;
pub const DODGE_HEAL: u32 = 5;
pub const SILENCE_SELF_DAMAGE: u32 = 10;
pub const DEATH_PREVENTION_HEALTH: u32 = 1;

// Flee penalty heuristic (defaults for FleeConfig)
pub const FLEE_STRONG_FLOOR_THRESHOLD: u32 = 5;
pub const FLEE_STRONG_HEALTH_THRESHOLD: u32 = 50;
pub const FLEE_STRONG_ABILITY_THRESHOLD: usize = 2;
pub const FLEE_PENALTY_STRONG_PERCENT: u32 = 10;
pub const FLEE_PENALTY_WEAK_PERCENT: u32 = 5;

// Division multipliers (defaults for EconomyConfig)
pub const DIVISION_FREE_MULTIPLIER: f64 = 0.8;
pub const DIVISION_BASE_MULTIPLIER: f64 = 1.0;
pub const DIVISION_PREMIUM_MULTIPLIER: f64 = 1.25;

// Rarity table: (base_chance_percent, increment_per_effective_floor, cap_percent)
// Index order: Common, Uncommon, Rare, Epic, Legendary, Mythical
pub const RARITY_TABLE: [(f64, f64, f64); 6] = [
    (60.0, 0.0, 60.0),    // Common
    (25.0, 0.03, 30.0),   // Uncommon
    (10.0, 0.03, 22.0),   // Rare
    (4.0, 0.02, 12.0),    // Epic
    (0.9, 0.004, 4.0),    // Legendary
    (0.1, 0.001, 1.0),    // Mythical
];

// Drop gating
pub const WEAPON_DROP_BASE_CHANCE: f64 = 0.10;
pub const ITEM_DROP_BASE_CHANCE: f64 = 0.20;
pub const DROP_CHANCE_PER_FLOOR_CURVE: f64 = 0.002;
pub const DROP_CHANCE_MAX: f64 = 0.85;
pub const DROP_BONUS_FLOOR_BOSS: f64 = 0.25;
pub const DROP_BONUS_MIMIC: f64 = 0.20;
pub const DROP_BONUS_DETECTED: f64 = 0.10;
pub const DROP_BONUS_EXPLORE: f64 = 0.0;
pub const DROP_BONUS_PVP: f64 = 0.0;

// Gold and experience
pub const GOLD_FLOOR_RATE: f64 = 0.08;
pub const GOLD_VARIANCE_MIN: f64 = 0.9;
pub const GOLD_VARIANCE_MAX: f64 = 1.1;
pub const XP_FLOOR_RATE: f64 = 0.06;

// Base gold / xp by battle type: (gold, xp)
pub const FLOOR_BOSS_BASE_REWARDS: (f64, f64) = (100.0, 120.0);
pub const MIMIC_BASE_REWARDS: (f64, f64) = (80.0, 60.0);
pub const DETECTED_BASE_REWARDS: (f64, f64) = (40.0, 45.0);
pub const EXPLORE_BASE_REWARDS: (f64, f64) = (25.0, 30.0);
pub const PVP_BASE_REWARDS: (f64, f64) = (30.0, 50.0);

// Special rewards
pub const MILESTONE_FLOOR_INTERVAL: u32 = 10;
pub const MILESTONE_CHEST_REWARD: &str = "milestone_chest";
pub const BOSS_TROPHY_REWARD: &str = "boss_trophy";
pub const MIMIC_ESSENCE_REWARD: &str = "mimic_essence";

// Performance rating axes (max points per axis)
pub const RATING_TURN_POINTS_MAX: u32 = 25;
pub const RATING_RATIO_POINTS_MAX: u32 = 25;
pub const RATING_RATIO_POINTS_PER_UNIT: f64 = 5.0;
pub const RATING_CRIT_POINTS_EACH: u32 = 5;
pub const RATING_CRIT_POINTS_MAX: u32 = 15;
pub const RATING_ABILITY_POINTS_EACH: u32 = 5;
pub const RATING_ABILITY_POINTS_MAX: u32 = 10;
pub const RATING_SPELL_POINTS_EACH: u32 = 5;
pub const RATING_SPELL_POINTS_MAX: u32 = 10;
pub const RATING_HEALTH_POINTS_MAX: u32 = 15;

// Turn efficiency tiers: (max_turns, points)
pub const RATING_TURN_TIERS: [(u32, u32); 5] = [(3, 25), (5, 20), (8, 15), (12, 10), (20, 5)];

// Ending health tiers: (min_fraction, points); any surviving health scores the last tier
pub const RATING_HEALTH_TIERS: [(f64, u32); 4] = [(0.9, 15), (0.7, 12), (0.5, 9), (0.25, 6)];
pub const RATING_HEALTH_SURVIVED_POINTS: u32 = 3;
