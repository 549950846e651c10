use super::types::Rarity;
use crate::core::constants::RARITY_TABLE;
use crate::core::scaling::effective_floor;
use rand::Rng;

/// Chance weight (percent) for a rarity tier on a floor.
///
/// Grows linearly with the effective floor and never exceeds the tier's cap.
pub fn calculate_rarity_chance(rarity: Rarity, floor: u32) -> f64 {
    let (base, increment, cap) = RARITY_TABLE[rarity.index()];
    (base + increment * effective_floor(floor) as f64).min(cap)
}

/// Unnormalized weights for every tier, common first.
pub fn rarity_weights(floor: u32) -> [f64; 6] {
    Rarity::ALL.map(|rarity| calculate_rarity_chance(rarity, floor))
}

/// Normalized selection probabilities, common first. Sums to 1.0.
pub fn rarity_distribution(floor: u32) -> [f64; 6] {
    let weights = rarity_weights(floor);
    let total: f64 = weights.iter().sum();
    weights.map(|w| w / total)
}

/// Roll a rarity tier for a floor.
///
/// One uniform draw over the total weight, then a cumulative walk from
/// common upward. The first tier whose running total reaches the draw wins.
pub fn roll_rarity(floor: u32, rng: &mut impl Rng) -> Rarity {
    let weights = rarity_weights(floor);
    let total: f64 = weights.iter().sum();
    let roll = rng.gen::<f64>() * total;

    let mut cumulative = 0.0;
    for (rarity, weight) in Rarity::ALL.into_iter().zip(weights) {
        cumulative += weight;
        if cumulative >= roll {
            return rarity;
        }
    }

    Rarity::Mythical
}
