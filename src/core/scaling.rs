//! Floor scaling functions shared by combat, gold and drop rates.
//!
//! Every floor-dependent number in the engine goes through `effective_floor`,
//! so the cap at `MAX_EFFECTIVE_FLOOR` applies to the whole system at once.

use super::constants::{FLOOR_CURVE_EXPONENT, MAX_EFFECTIVE_FLOOR};

/// Clamp a floor to the maximum effective floor.
pub fn effective_floor(floor: u32) -> u32 {
    floor.min(MAX_EFFECTIVE_FLOOR)
}

/// Diminishing-returns progress value for a floor.
///
/// floor 0: 0.0, floor 1: 1.0, floor 100: ~31.6, floor 500+: ~105.7
pub fn floor_curve(floor: u32) -> f64 {
    (effective_floor(floor) as f64).powf(FLOOR_CURVE_EXPONENT)
}

/// Scale a base value by floor depth.
///
/// # Arguments
/// * `base` - Value at floor 0 (negative inputs are treated as 0)
/// * `floor` - Progression depth (clamped to the effective cap)
/// * `rate` - Growth per unit of floor curve (negative inputs are treated as 0)
///
/// # Returns
/// `base * (1 + rate * floor_curve(floor))`, non-decreasing in `floor`
pub fn scale_by_floor(base: f64, floor: u32, rate: f64) -> f64 {
    let base = if base.is_finite() { base.max(0.0) } else { 0.0 };
    let rate = if rate.is_finite() { rate.max(0.0) } else { 0.0 };
    base * (1.0 + rate * floor_curve(floor))
}

/// Integer convenience wrapper around `scale_by_floor`, rounded to nearest.
pub fn scale_by_floor_u32(base: u32, floor: u32, rate: f64) -> u32 {
    scale_by_floor(base as f64, floor, rate)
        .round()
        .min(u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_floor_clamps_at_cap() {
        assert_eq!(effective_floor(0), 0);
        assert_eq!(effective_floor(42), 42);
        assert_eq!(effective_floor(MAX_EFFECTIVE_FLOOR), MAX_EFFECTIVE_FLOOR);
        assert_eq!(
            effective_floor(MAX_EFFECTIVE_FLOOR + 1),
            MAX_EFFECTIVE_FLOOR
        );
        assert_eq!(effective_floor(u32::MAX), MAX_EFFECTIVE_FLOOR);
    }

    #[test]
    fn test_floor_curve_values() {
        assert_eq!(floor_curve(0), 0.0);
        assert!((floor_curve(1) - 1.0).abs() < 1e-9);
        assert!((floor_curve(16) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_by_floor_monotonic() {
        let mut previous = scale_by_floor(10.0, 0, 0.1);
        for floor in 1..=600 {
            let current = scale_by_floor(10.0, floor, 0.1);
            assert!(
                current >= previous,
                "floor {floor}: {current} dropped below {previous}"
            );
            previous = current;
        }
    }

    #[test]
    fn test_scale_by_floor_identical_past_cap() {
        let at_cap = scale_by_floor(25.0, MAX_EFFECTIVE_FLOOR, 0.08);
        for floor in [501, 750, 10_000, u32::MAX] {
            assert_eq!(scale_by_floor(25.0, floor, 0.08), at_cap);
        }
    }

    #[test]
    fn test_scale_by_floor_coerces_negative_inputs() {
        assert_eq!(scale_by_floor(-10.0, 50, 0.1), 0.0);
        assert_eq!(scale_by_floor(10.0, 50, -1.0), 10.0);
        assert_eq!(scale_by_floor(f64::NAN, 50, 0.1), 0.0);
    }

    #[test]
    fn test_scale_by_floor_zero_rate_is_identity() {
        assert_eq!(scale_by_floor(33.0, 400, 0.0), 33.0);
    }

    #[test]
    fn test_scale_by_floor_u32_rounds() {
        // 10 * (1 + 0.05 * 1.0) = 10.5 -> 11
        assert_eq!(scale_by_floor_u32(10, 1, 0.05), 11);
        assert_eq!(scale_by_floor_u32(0, 300, 0.5), 0);
    }
}
