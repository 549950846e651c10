//! Post-battle performance scoring.
//!
//! Six independent axes add up to at most 100 points. The percentage of that
//! maximum maps to a letter grade, and the grade feeds reward generation.

use crate::combat::types::{BattleStats, Combatant, Side};
use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_RATING_POINTS: u32 = RATING_TURN_POINTS_MAX
    + RATING_RATIO_POINTS_MAX
    + RATING_CRIT_POINTS_MAX
    + RATING_ABILITY_POINTS_MAX
    + RATING_SPELL_POINTS_MAX
    + RATING_HEALTH_POINTS_MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
    S,
    SPlus,
}

impl Grade {
    /// Best grade first.
    pub const ALL: [Grade; 7] = [
        Grade::SPlus,
        Grade::S,
        Grade::A,
        Grade::B,
        Grade::C,
        Grade::D,
        Grade::F,
    ];

    pub fn from_percent(percent: f64) -> Self {
        match percent {
            p if p >= 90.0 => Grade::SPlus,
            p if p >= 80.0 => Grade::S,
            p if p >= 70.0 => Grade::A,
            p if p >= 60.0 => Grade::B,
            p if p >= 50.0 => Grade::C,
            p if p >= 40.0 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Grade::SPlus => "S+",
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::SPlus => "LEGENDARY",
            Grade::S => "EXCEPTIONAL",
            Grade::A => "GREAT",
            Grade::B => "GOOD",
            Grade::C => "AVERAGE",
            Grade::D => "POOR",
            Grade::F => "BARELY SURVIVED",
        }
    }

    /// Flat addition to weapon and item drop chances.
    pub fn drop_bonus(&self) -> f64 {
        match self {
            Grade::SPlus => 0.15,
            Grade::S => 0.12,
            Grade::A => 0.09,
            Grade::B => 0.06,
            Grade::C => 0.03,
            Grade::D => 0.01,
            Grade::F => 0.0,
        }
    }

    /// Multiplier on gold and experience.
    pub fn reward_multiplier(&self) -> f64 {
        match self {
            Grade::SPlus => 1.5,
            Grade::S => 1.35,
            Grade::A => 1.2,
            Grade::B => 1.1,
            Grade::C => 1.0,
            Grade::D => 0.9,
            Grade::F => 0.8,
        }
    }
}

/// Points earned on each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBreakdown {
    pub turn_efficiency: u32,
    pub damage_ratio: u32,
    pub critical_hits: u32,
    pub abilities: u32,
    pub spells: u32,
    pub health: u32,
}

impl RatingBreakdown {
    pub fn total(&self) -> u32 {
        self.turn_efficiency
            + self.damage_ratio
            + self.critical_hits
            + self.abilities
            + self.spells
            + self.health
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRating {
    pub grade: Grade,
    pub points: u32,
    pub percent: f64,
    pub breakdown: RatingBreakdown,
}

impl PerformanceRating {
    pub fn from_breakdown(breakdown: RatingBreakdown) -> Self {
        let points = breakdown.total().min(MAX_RATING_POINTS);
        let percent = points as f64 * 100.0 / MAX_RATING_POINTS as f64;
        Self {
            grade: Grade::from_percent(percent),
            points,
            percent,
            breakdown,
        }
    }

    /// A rating with a fixed grade and no breakdown, for callers that score elsewhere.
    pub fn with_grade(grade: Grade) -> Self {
        let percent = match grade {
            Grade::SPlus => 90.0,
            Grade::S => 80.0,
            Grade::A => 70.0,
            Grade::B => 60.0,
            Grade::C => 50.0,
            Grade::D => 40.0,
            Grade::F => 0.0,
        };
        Self {
            grade,
            points: (percent * MAX_RATING_POINTS as f64 / 100.0).round() as u32,
            percent,
            breakdown: RatingBreakdown::default(),
        }
    }

    pub fn drop_bonus(&self) -> f64 {
        self.grade.drop_bonus()
    }

    pub fn reward_multiplier(&self) -> f64 {
        self.grade.reward_multiplier()
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.grade.label(), self.grade.letter())
    }
}

fn turn_points(turns: u32) -> u32 {
    RATING_TURN_TIERS
        .iter()
        .find(|(max_turns, _)| turns <= *max_turns)
        .map_or(0, |(_, points)| *points)
}

fn ratio_points(dealt: u64, received: u64) -> u32 {
    if dealt == 0 {
        return 0;
    }
    if received == 0 {
        return RATING_RATIO_POINTS_MAX;
    }
    let ratio = dealt as f64 / received as f64;
    ((ratio * RATING_RATIO_POINTS_PER_UNIT) as u32).min(RATING_RATIO_POINTS_MAX)
}

fn health_points(fraction: f64) -> u32 {
    if fraction <= 0.0 {
        return 0;
    }
    RATING_HEALTH_TIERS
        .iter()
        .find(|(min_fraction, _)| fraction >= *min_fraction)
        .map_or(RATING_HEALTH_SURVIVED_POINTS, |(_, points)| *points)
}

fn capped(count: usize, each: u32, max: u32) -> u32 {
    (count as u32).saturating_mul(each).min(max)
}

/// Score one side of a battle.
///
/// Every axis reads the stats of `side`; `combatant` must be that side's
/// combatant and only supplies the ending health.
pub fn rate_battle(stats: &BattleStats, side: Side, combatant: &Combatant) -> PerformanceRating {
    let side = stats.side(side);
    let breakdown = RatingBreakdown {
        turn_efficiency: turn_points(stats.turns),
        damage_ratio: ratio_points(side.damage_dealt, side.damage_received),
        critical_hits: capped(
            side.critical_hits as usize,
            RATING_CRIT_POINTS_EACH,
            RATING_CRIT_POINTS_MAX,
        ),
        abilities: capped(
            side.distinct_abilities(),
            RATING_ABILITY_POINTS_EACH,
            RATING_ABILITY_POINTS_MAX,
        ),
        spells: capped(
            side.distinct_spells(),
            RATING_SPELL_POINTS_EACH,
            RATING_SPELL_POINTS_MAX,
        ),
        health: health_points(combatant.health_fraction()),
    };
    PerformanceRating::from_breakdown(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::SideStats;

    fn hero_at(health: u32) -> Combatant {
        let mut hero = Combatant::new("hero", "Hero", 100, 0);
        hero.current_health = health;
        hero
    }

    fn stats(turns: u32, dealt: u64, received: u64) -> BattleStats {
        BattleStats {
            turns,
            player: SideStats {
                damage_dealt: dealt,
                damage_received: received,
                ..SideStats::default()
            },
            opponent: SideStats::default(),
        }
    }

    #[test]
    fn test_max_points_is_100() {
        assert_eq!(MAX_RATING_POINTS, 100);
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_percent(95.0), Grade::SPlus);
        assert_eq!(Grade::from_percent(90.0), Grade::SPlus);
        assert_eq!(Grade::from_percent(89.9), Grade::S);
        assert_eq!(Grade::from_percent(70.0), Grade::A);
        assert_eq!(Grade::from_percent(60.0), Grade::B);
        assert_eq!(Grade::from_percent(50.0), Grade::C);
        assert_eq!(Grade::from_percent(40.0), Grade::D);
        assert_eq!(Grade::from_percent(39.9), Grade::F);
    }

    #[test]
    fn test_display_form() {
        assert_eq!(
            PerformanceRating::with_grade(Grade::C).to_string(),
            "AVERAGE (C)"
        );
        assert_eq!(
            PerformanceRating::with_grade(Grade::SPlus).to_string(),
            "LEGENDARY (S+)"
        );
    }

    #[test]
    fn test_with_grade_round_trips() {
        for grade in Grade::ALL {
            assert_eq!(PerformanceRating::with_grade(grade).grade, grade);
        }
    }

    #[test]
    fn test_turn_tiers() {
        assert_eq!(turn_points(1), 25);
        assert_eq!(turn_points(3), 25);
        assert_eq!(turn_points(4), 20);
        assert_eq!(turn_points(8), 15);
        assert_eq!(turn_points(12), 10);
        assert_eq!(turn_points(20), 5);
        assert_eq!(turn_points(21), 0);
    }

    #[test]
    fn test_ratio_points() {
        assert_eq!(ratio_points(0, 0), 0);
        assert_eq!(ratio_points(10, 0), 25);
        assert_eq!(ratio_points(20, 10), 10);
        assert_eq!(ratio_points(500, 10), 25);
        assert_eq!(ratio_points(5, 10), 2);
    }

    #[test]
    fn test_health_tiers() {
        assert_eq!(health_points(1.0), 15);
        assert_eq!(health_points(0.75), 12);
        assert_eq!(health_points(0.5), 9);
        assert_eq!(health_points(0.3), 6);
        assert_eq!(health_points(0.01), 3);
        assert_eq!(health_points(0.0), 0);
    }

    #[test]
    fn test_flawless_quick_win_is_top_grade() {
        let mut stats = stats(2, 100, 0);
        stats.player.critical_hits = 5;
        stats.player.abilities_used = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        stats.player.spells_used = ["x", "y"].iter().map(|s| s.to_string()).collect();
        let rating = rate_battle(&stats, Side::Player, &hero_at(100));
        assert_eq!(rating.points, 100);
        assert_eq!(rating.grade, Grade::SPlus);
        assert_eq!(rating.breakdown.critical_hits, RATING_CRIT_POINTS_MAX);
        assert_eq!(rating.breakdown.abilities, RATING_ABILITY_POINTS_MAX);
    }

    #[test]
    fn test_long_grind_is_low_grade() {
        let rating = rate_battle(&stats(30, 50, 100), Side::Player, &hero_at(10));
        assert_eq!(rating.breakdown.turn_efficiency, 0);
        assert_eq!(rating.breakdown.damage_ratio, 2);
        assert_eq!(rating.breakdown.health, 3);
        assert_eq!(rating.grade, Grade::F);
    }

    #[test]
    fn test_average_fight() {
        // 15 + 25 + 0 + 0 + 0 + 12 = 52
        let rating = rate_battle(&stats(6, 100, 20), Side::Player, &hero_at(80));
        assert_eq!(rating.points, 52);
        assert_eq!(rating.to_string(), "AVERAGE (C)");
    }

    #[test]
    fn test_opponent_side_uses_opponent_stats() {
        let mut stats = stats(3, 0, 40);
        stats.opponent.damage_dealt = 40;
        stats.opponent.abilities_used = ["dodge".to_string()].into_iter().collect();

        let opponent = rate_battle(&stats, Side::Opponent, &hero_at(100));
        assert_eq!(opponent.breakdown.damage_ratio, RATING_RATIO_POINTS_MAX);
        assert_eq!(opponent.breakdown.abilities, RATING_ABILITY_POINTS_EACH);
        assert_eq!(opponent.breakdown.health, 15);

        let player = rate_battle(&stats, Side::Player, &hero_at(100));
        assert_eq!(player.breakdown.damage_ratio, 0);
        assert_eq!(player.breakdown.abilities, 0);
    }

    #[test]
    fn test_grade_bonuses_are_monotonic() {
        for pair in Grade::ALL.windows(2) {
            assert!(pair[0].drop_bonus() > pair[1].drop_bonus());
            assert!(pair[0].reward_multiplier() > pair[1].reward_multiplier());
        }
        assert_eq!(Grade::F.drop_bonus(), 0.0);
    }
}
