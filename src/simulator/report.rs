//! Simulation report generation.

use super::config::SimConfig;
use crate::combat::types::{BattleOutcome, BattleType};
use crate::rating::Grade;
use crate::rewards::types::{Division, Rarity, RewardBundle};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of one simulated battle.
#[derive(Debug, Clone)]
pub struct BattleRecord {
    pub monster_id: String,
    /// None when the battle hit the turn cap
    pub outcome: Option<BattleOutcome>,
    pub turns: u32,
    pub grade: Option<Grade>,
    pub rewards: Option<RewardBundle>,
}

/// Aggregated results from multiple simulated battles.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_battles: u32,
    pub floor: u32,
    pub battle_type: BattleType,
    pub division: Division,

    pub victories: u32,
    pub defeats: u32,
    pub draws: u32,
    pub timeouts: u32,
    pub win_rate: f64,
    pub avg_turns: f64,

    // Per victory
    pub avg_gold: f64,
    pub avg_experience: f64,
    pub weapon_drop_rate: f64,
    pub item_drop_rate: f64,

    // Distribution data
    pub grade_distribution: BTreeMap<String, u32>,
    pub weapon_rarity_distribution: BTreeMap<String, u32>,
    pub special_rewards: BTreeMap<String, u32>,
    pub wins_by_monster: BTreeMap<String, (u32, u32)>,
}

fn ratio(part: f64, whole: u32) -> f64 {
    if whole == 0 { 0.0 } else { part / whole as f64 }
}

impl SimReport {
    pub fn from_records(config: &SimConfig, records: Vec<BattleRecord>) -> Self {
        let num_battles = records.len() as u32;
        let count = |outcome: Option<BattleOutcome>| {
            records.iter().filter(|r| r.outcome == outcome).count() as u32
        };
        let victories = count(Some(BattleOutcome::Victory));
        let defeats = count(Some(BattleOutcome::Defeat));
        let draws = count(Some(BattleOutcome::Draw));
        let timeouts = count(None);

        let total_turns: u64 = records.iter().map(|r| r.turns as u64).sum();
        let rewards: Vec<&RewardBundle> = records
            .iter()
            .filter_map(|r| r.rewards.as_ref())
            .collect();
        let total_gold: u64 = rewards.iter().map(|b| b.gold).sum();
        let total_experience: u64 = rewards.iter().map(|b| b.experience).sum();
        let weapon_wins = rewards.iter().filter(|b| !b.weapons.is_empty()).count();
        let item_wins = rewards.iter().filter(|b| !b.items.is_empty()).count();

        let mut grade_distribution = BTreeMap::new();
        for grade in records.iter().filter_map(|r| r.grade) {
            *grade_distribution
                .entry(grade.letter().to_string())
                .or_insert(0) += 1;
        }

        let mut weapon_rarity_distribution = BTreeMap::new();
        let mut special_rewards = BTreeMap::new();
        for bundle in &rewards {
            for weapon in &bundle.weapons {
                *weapon_rarity_distribution
                    .entry(weapon.rarity.name().to_string())
                    .or_insert(0) += 1;
            }
            for special in &bundle.special_rewards {
                *special_rewards.entry(special.clone()).or_insert(0) += 1;
            }
        }

        let mut wins_by_monster: BTreeMap<String, (u32, u32)> = BTreeMap::new();
        for record in &records {
            let entry = wins_by_monster
                .entry(record.monster_id.clone())
                .or_default();
            entry.1 += 1;
            if record.outcome == Some(BattleOutcome::Victory) {
                entry.0 += 1;
            }
        }

        Self {
            num_battles,
            floor: config.floor,
            battle_type: config.battle_type,
            division: config.division,
            victories,
            defeats,
            draws,
            timeouts,
            win_rate: ratio(victories as f64, num_battles),
            avg_turns: ratio(total_turns as f64, num_battles),
            avg_gold: ratio(total_gold as f64, victories),
            avg_experience: ratio(total_experience as f64, victories),
            weapon_drop_rate: ratio(weapon_wins as f64, victories),
            item_drop_rate: ratio(item_wins as f64, victories),
            grade_distribution,
            weapon_rarity_distribution,
            special_rewards,
            wins_by_monster,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Battles: {} on floor {} ({}, {} division)\n\n",
            self.num_battles, self.floor, self.battle_type, self.division
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Victories:   {}\n", self.victories));
        report.push_str(&format!("  Defeats:     {}\n", self.defeats));
        report.push_str(&format!("  Draws:       {}\n", self.draws));
        report.push_str(&format!("  Timeouts:    {}\n", self.timeouts));
        report.push_str(&format!("  Win Rate:    {:.1}%\n", self.win_rate * 100.0));
        report.push_str(&format!("  Avg Turns:   {:.1}\n\n", self.avg_turns));

        report.push_str("── OPPONENTS ────────────────────────────────────────────────────\n");
        for (monster, (wins, fights)) in &self.wins_by_monster {
            report.push_str(&format!(
                "  {:<18} {:>4}/{:<4} {:>5.1}%\n",
                monster,
                wins,
                fights,
                ratio(*wins as f64 * 100.0, *fights)
            ));
        }
        report.push('\n');

        report.push_str("── RATINGS ──────────────────────────────────────────────────────\n");
        for grade in Grade::ALL {
            let count = self
                .grade_distribution
                .get(grade.letter())
                .copied()
                .unwrap_or(0);
            let pct = ratio(count as f64 * 100.0, self.victories);
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<3} {:>5.1}% {}\n", grade.letter(), pct, bar));
        }
        report.push('\n');

        report.push_str("── LOOT (per victory) ───────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Gold:          {:.1}\n", self.avg_gold));
        report.push_str(&format!("  Avg Experience:    {:.1}\n", self.avg_experience));
        report.push_str(&format!(
            "  Weapon Drop Rate:  {:.1}%\n",
            self.weapon_drop_rate * 100.0
        ));
        report.push_str(&format!("  Item Drop Rate:    {:.1}%\n", self.item_drop_rate * 100.0));
        let weapons: u32 = self.weapon_rarity_distribution.values().sum();
        for rarity in Rarity::ALL {
            let count = self
                .weapon_rarity_distribution
                .get(rarity.name())
                .copied()
                .unwrap_or(0);
            if count > 0 {
                report.push_str(&format!(
                    "    {:<10} {:>5} ({:.1}%)\n",
                    rarity.name(),
                    count,
                    ratio(count as f64 * 100.0, weapons)
                ));
            }
        }
        for (reward, count) in &self.special_rewards {
            report.push_str(&format!("  {reward}: {count}\n"));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let assessment = if self.win_rate > 0.95 {
            "TOO EASY - Players almost never lose"
        } else if self.win_rate > 0.6 {
            "GOOD - Challenging but fair"
        } else if self.win_rate > 0.3 {
            "HARD - Frequent defeats"
        } else {
            "TOO HARD - Most battles are lost"
        };
        report.push_str(&format!("  Difficulty:  {assessment}\n"));
        if self.timeouts > 0 {
            report.push_str(&format!(
                "  ⚠️  {} battles hit the turn cap - damage too low?\n",
                self.timeouts
            ));
        }
        if self.victories > 0 && self.weapon_drop_rate == 0.0 {
            report.push_str("  ⚠️  No weapons dropped - drop gates too strict?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
