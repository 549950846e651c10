//! Main simulation runner using `BattleEngine` for real combat mechanics.
//!
//! Both sides pick uniformly among their affordable actions every turn, so
//! results reflect raw content balance rather than player skill.

use super::config::SimConfig;
use super::report::{BattleRecord, SimReport};
use crate::combat::types::{BattleType, Combatant};
use crate::core::constants::{MONSTER_HEALTH_FLOOR_RATE, MONSTER_MANA_FLOOR_RATE};
use crate::core::error::EngineResult;
use crate::core::scaling::scale_by_floor_u32;
use crate::engine::BattleEngine;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

const BOSS_MONSTER_ID: &str = "floor_guardian";

/// Stand-in adventurer whose pools grow with the floor like a monster's.
pub fn sim_player(floor: u32) -> Combatant {
    let max_health = scale_by_floor_u32(120, floor, MONSTER_HEALTH_FLOOR_RATE);
    let max_mana = scale_by_floor_u32(60, floor, MONSTER_MANA_FLOOR_RATE);
    Combatant::new("sim_player", "Adventurer", max_health, max_mana)
        .with_armor(2)
        .with_weapons(&["iron_sword", "flame_blade"])
        .with_abilities(&["power_strike", "counter", "dodge", "second_wind"])
        .with_spells(&["fireball", "frost_bolt", "silence"])
}

fn pick_monster(
    engine: &BattleEngine,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Option<Combatant> {
    if let Some(id) = &config.monster {
        return engine.spawn_monster(id, config.floor);
    }
    if config.battle_type == BattleType::FloorBoss {
        if let Some(boss) = engine.spawn_monster(BOSS_MONSTER_ID, config.floor) {
            return Some(boss);
        }
    }
    let monsters: Vec<_> = engine.catalog().monsters().collect();
    if monsters.is_empty() {
        return None;
    }
    let def = monsters[rng.gen_range(0..monsters.len())];
    Some(Combatant::from_monster(def, config.floor))
}

/// Play one battle to completion or timeout.
fn simulate_battle(
    engine: &BattleEngine,
    config: &SimConfig,
    opponent: Combatant,
    rng: &mut impl Rng,
) -> EngineResult<BattleRecord> {
    let monster_id = opponent.id.clone();
    let mut session = engine.start_battle(
        sim_player(config.floor),
        opponent,
        config.floor,
        config.battle_type,
    );

    while !session.is_over() && session.turn_number < config.max_turns {
        let player_action = engine.choose_opponent_action(&session.player, rng);
        let opponent_action = engine.choose_opponent_action(&session.opponent, rng);
        let (next, _) = engine.resolve_turn(session, &player_action, &opponent_action, rng)?;
        session = next;
    }

    let summary = engine.finish_battle(&session, config.division, rng);
    Ok(BattleRecord {
        monster_id,
        outcome: session.outcome,
        turns: session.turn_number,
        grade: summary.as_ref().map(|s| s.rating.grade),
        rewards: summary.map(|s| s.rewards),
    })
}

/// Run the full simulation and return a report.
pub fn run_simulation(engine: &BattleEngine, config: &SimConfig) -> EngineResult<SimReport> {
    let mut records = Vec::with_capacity(config.num_battles as usize);

    for battle_idx in 0..config.num_battles {
        // Create RNG for this battle
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(battle_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let Some(opponent) = pick_monster(engine, config, &mut rng) else {
            warn!(
                monster = ?config.monster,
                "No monster available to simulate against"
            );
            break;
        };

        let record = simulate_battle(engine, config, opponent, &mut rng)?;
        debug!(
            battle = battle_idx + 1,
            total = config.num_battles,
            monster = %record.monster_id,
            outcome = ?record.outcome,
            turns = record.turns,
            grade = ?record.grade,
            "Simulated battle"
        );
        records.push(record);
    }

    Ok(SimReport::from_records(config, records))
}
