use super::specials::{Interception, SpecialRegistry};
use super::types::*;
use crate::catalog::{Catalog, DamageType, SkillDef};
use crate::core::config::FleeConfig;
use crate::core::constants::*;
use crate::core::error::{EngineError, EngineResult};
use crate::effects::{
    apply_effect, armor_is_broken, control_effect, crit_bonus_percent, outgoing_damage_multiplier,
    roll_effects, tick_effects, EffectTick,
};
use rand::Rng;
use tracing::{debug, info, warn};

/// Direct damage from one side's action after crits and armor.
#[derive(Debug, Clone, Copy, Default)]
struct Strike {
    damage: u32,
    critical: bool,
}

/// Running per-side numbers for the turn report.
#[derive(Debug, Default)]
struct SideTally {
    dealt: u32,
    taken: u32,
    pending_heal: u32,
    healed: u32,
    effect_damage: u32,
    mana_spent: u32,
    health_spent: u32,
}

impl SideTally {
    fn deal(&mut self, amount: u32) {
        self.dealt = self.dealt.saturating_add(amount);
    }

    fn take(&mut self, amount: u32) {
        self.taken = self.taken.saturating_add(amount);
    }

    fn queue_heal(&mut self, amount: u32) {
        self.pending_heal = self.pending_heal.saturating_add(amount);
    }
}

fn from_skill(kind: ActionKind, skill: &SkillDef) -> ResolvedAction {
    ResolvedAction {
        kind,
        id: skill.id.clone(),
        name: skill.name.clone(),
        damage: skill.damage,
        heal: skill.heal,
        mana_cost: skill.mana_cost,
        health_cost: skill.health_cost,
        damage_type: skill.damage_type,
        pierce: skill.pierce,
        self_effects: skill.self_effects.clone(),
        target_effects: skill.target_effects.clone(),
        prevented_by: None,
        fallback: None,
    }
}

/// Resolve an action against the combatant's loadout and the catalog.
///
/// Anything the combatant cannot use, or the catalog does not know, becomes
/// a basic attack tagged with the reason.
fn lookup_action(
    session: &BattleSession,
    side: Side,
    action: &Action,
    catalog: &Catalog,
) -> ResolvedAction {
    if action.is_basic_attack() {
        return ResolvedAction::basic_attack(None);
    }

    if !session.combatant(side).has_action(action) {
        warn!(
            session_id = %session.id,
            floor = session.floor,
            side = side.name(),
            action_id = %action.id,
            "Action not available to combatant, using basic attack"
        );
        return ResolvedAction::basic_attack(Some(FallbackReason::NotAvailable));
    }

    let resolved = match action.kind {
        ActionKind::Weapon => catalog.weapon(&action.id).map(|w| ResolvedAction {
            kind: ActionKind::Weapon,
            id: w.id.clone(),
            name: w.name.clone(),
            damage: w.damage,
            heal: 0,
            mana_cost: w.mana_cost,
            health_cost: w.health_cost,
            damage_type: w.damage_type,
            pierce: w.pierce,
            self_effects: Vec::new(),
            target_effects: w.effects.clone(),
            prevented_by: None,
            fallback: None,
        }),
        ActionKind::Ability => catalog
            .ability(&action.id)
            .map(|s| from_skill(ActionKind::Ability, s)),
        ActionKind::Spell => catalog
            .spell(&action.id)
            .map(|s| from_skill(ActionKind::Spell, s)),
    };

    resolved.unwrap_or_else(|| {
        warn!(
            session_id = %session.id,
            floor = session.floor,
            side = side.name(),
            action_id = %action.id,
            "Action missing from catalog, using basic attack"
        );
        ResolvedAction::basic_attack(Some(FallbackReason::NotInCatalog))
    })
}

/// Lookup plus control override.
fn prepare_action(
    session: &BattleSession,
    side: Side,
    action: &Action,
    catalog: &Catalog,
    events: &mut Vec<SpecialEvent>,
) -> ResolvedAction {
    let resolved = lookup_action(session, side, action, catalog);
    match control_effect(&session.combatant(side).effects) {
        Some(effect) => {
            events.push(SpecialEvent::ActionPrevented { side, effect });
            resolved.prevented(effect)
        }
        None => resolved,
    }
}

/// Deduct action costs. Mana is capped at what is left and health costs
/// never take the user below 1.
fn pay_costs(
    session: &mut BattleSession,
    side: Side,
    action: &ResolvedAction,
    tally: &mut SideTally,
) {
    let session_id = session.id;
    let combatant = session.combatant_mut(side);
    let mana = action.mana_cost.min(combatant.current_mana);
    let health = action
        .health_cost
        .min(combatant.current_health.saturating_sub(1));

    if mana < action.mana_cost || health < action.health_cost {
        debug!(
            session_id = %session_id,
            side = side.name(),
            action_id = %action.id,
            mana_cost = action.mana_cost,
            mana_paid = mana,
            health_cost = action.health_cost,
            health_paid = health,
            "Clamped action cost"
        );
    }

    combatant.current_mana -= mana;
    combatant.current_health -= health;
    tally.mana_spent = mana;
    tally.health_spent = health;
}

/// Armor applies to physical, non-piercing damage only.
fn mitigate(raw: f64, action: &ResolvedAction, defender: &Combatant) -> u32 {
    if raw <= 0.0 {
        return 0;
    }
    let raw = (raw.round() as u32).max(MIN_DAMAGE_AFTER_ARMOR);
    if action.damage_type == DamageType::Magic || action.pierce {
        return raw;
    }
    let armor = if armor_is_broken(&defender.effects) {
        0
    } else {
        defender.armor
    };
    raw.saturating_sub(armor).max(MIN_DAMAGE_AFTER_ARMOR)
}

fn roll_strike(
    attacker: &Combatant,
    defender: &Combatant,
    action: &ResolvedAction,
    rng: &mut impl Rng,
) -> Strike {
    if action.damage == 0 {
        return Strike::default();
    }

    let mut raw = action.damage as f64
        * attacker.power.max(0.0)
        * outgoing_damage_multiplier(&attacker.effects);

    let crit_chance = BASE_CRIT_CHANCE_PERCENT + crit_bonus_percent(&attacker.effects);
    let critical = rng.gen_range(0..100) < crit_chance;
    if critical {
        raw *= CRIT_MULTIPLIER;
    }

    Strike {
        damage: mitigate(raw, action, defender),
        critical,
    }
}

/// Drained health the opposing side receives, capped at what the bearer can lose.
fn drained_health(bearer: &Combatant, tick: &EffectTick) -> u32 {
    tick.drained.min(bearer.current_health)
}

fn negates(guard: &Option<Interception>) -> bool {
    guard.as_ref().is_some_and(|g| g.negate_incoming)
}

fn apply_guard(guard: &Option<Interception>, defender: &mut SideTally, attacker: &mut SideTally) {
    if let Some(guard) = guard {
        defender.deal(guard.reflect_damage);
        attacker.take(guard.reflect_damage);
        attacker.take(guard.attacker_self_damage);
        defender.queue_heal(guard.defender_heal);
    }
}

/// Roll this turn's new effects. Target effects are skipped when the attack was negated.
fn apply_rolled_effects(
    session: &mut BattleSession,
    side: Side,
    action: &ResolvedAction,
    target_negated: bool,
    rng: &mut impl Rng,
) {
    for effect in roll_effects(&action.self_effects, rng) {
        apply_effect(&mut session.combatant_mut(side).effects, effect);
    }
    if target_negated {
        return;
    }
    for effect in roll_effects(&action.target_effects, rng) {
        apply_effect(&mut session.combatant_mut(side.other()).effects, effect);
    }
}

fn prevent_death(
    session: &mut BattleSession,
    side: Side,
    registry: &SpecialRegistry,
) -> Option<SpecialEvent> {
    let combatant = session.combatant(side);
    if combatant.is_alive() || combatant.max_health == 0 {
        return None;
    }
    let ability_id = registry.death_prevention_for(combatant)?.to_string();

    let session_id = session.id;
    let combatant = session.combatant_mut(side);
    combatant.current_health = DEATH_PREVENTION_HEALTH.min(combatant.max_health);
    combatant.consumed_specials.insert(ability_id.clone());
    debug!(
        session_id = %session_id,
        side = side.name(),
        ability_id = %ability_id,
        "Death prevented"
    );

    Some(SpecialEvent::DeathPrevented { side, ability_id })
}

fn merge_stats(stats: &mut SideStats, action: &ResolvedAction, tally: &SideTally, critical: bool) {
    stats.damage_dealt += tally.dealt as u64;
    stats.damage_received += tally.taken as u64;
    stats.mana_used += tally.mana_spent as u64;
    stats.healing += tally.healed as u64;
    if critical {
        stats.critical_hits += 1;
    }
    if action.is_active() {
        match action.kind {
            ActionKind::Ability => {
                stats.abilities_used.insert(action.id.clone());
            }
            ActionKind::Spell => {
                stats.spells_used.insert(action.id.clone());
            }
            ActionKind::Weapon => {}
        }
    }
}

fn side_report(action: &ResolvedAction, tally: &SideTally, combatant: &Combatant) -> SideReport {
    SideReport {
        action: action.summary(),
        damage_dealt: tally.dealt,
        damage_taken: tally.taken,
        healing: tally.healed,
        mana_spent: tally.mana_spent,
        health_spent: tally.health_spent,
        effect_damage: tally.effect_damage,
        effects: combatant.effects.clone(),
    }
}

/// Resolve one simultaneous turn.
///
/// Both actions are looked up and checked for control effects, specials are
/// evaluated symmetrically, then costs, direct damage and healing are applied,
/// followed by effect ticks and the effects rolled this turn. Death
/// prevention runs last, before the terminal check.
pub fn resolve_turn(
    mut session: BattleSession,
    player_action: &Action,
    opponent_action: &Action,
    catalog: &Catalog,
    registry: &SpecialRegistry,
    rng: &mut impl Rng,
) -> EngineResult<(BattleSession, TurnResult)> {
    if let Some(outcome) = session.outcome {
        return Err(EngineError::SessionOver {
            session_id: session.id,
            outcome,
        });
    }
    if let Some(side) = [Side::Player, Side::Opponent]
        .into_iter()
        .find(|side| !session.combatant(*side).is_alive())
    {
        return Err(EngineError::CombatantDown {
            session_id: session.id,
            side,
        });
    }

    session.turn_number += 1;
    let mut events = Vec::new();

    let player_move = prepare_action(&session, Side::Player, player_action, catalog, &mut events);
    let opponent_move = prepare_action(
        &session,
        Side::Opponent,
        opponent_action,
        catalog,
        &mut events,
    );

    // Specials
    let player_guard = registry.intercept(Side::Player, &player_move, &opponent_move);
    let opponent_guard = registry.intercept(Side::Opponent, &opponent_move, &player_move);
    events.extend(player_guard.iter().map(|g| g.event.clone()));
    events.extend(opponent_guard.iter().map(|g| g.event.clone()));

    let mut player = SideTally::default();
    let mut opponent = SideTally::default();

    // Costs
    pay_costs(&mut session, Side::Player, &player_move, &mut player);
    pay_costs(&mut session, Side::Opponent, &opponent_move, &mut opponent);

    // Direct damage
    let player_strike = if negates(&opponent_guard) {
        Strike::default()
    } else {
        roll_strike(&session.player, &session.opponent, &player_move, rng)
    };
    let opponent_strike = if negates(&player_guard) {
        Strike::default()
    } else {
        roll_strike(&session.opponent, &session.player, &opponent_move, rng)
    };

    let mut critical_hits = Vec::new();
    for (side, action, strike) in [
        (Side::Player, &player_move, player_strike),
        (Side::Opponent, &opponent_move, opponent_strike),
    ] {
        if strike.critical {
            debug!(
                session_id = %session.id,
                side = side.name(),
                action_id = %action.id,
                damage = strike.damage,
                "Critical hit"
            );
            critical_hits.push(CriticalHit {
                side,
                action_name: action.name.clone(),
                damage: strike.damage,
            });
        }
    }

    player.deal(player_strike.damage);
    opponent.take(player_strike.damage);
    opponent.deal(opponent_strike.damage);
    player.take(opponent_strike.damage);
    apply_guard(&player_guard, &mut player, &mut opponent);
    apply_guard(&opponent_guard, &mut opponent, &mut player);
    player.queue_heal(player_move.heal);
    opponent.queue_heal(opponent_move.heal);

    session.player.take_damage(player.taken);
    session.opponent.take_damage(opponent.taken);
    player.healed = session.player.heal(player.pending_heal);
    opponent.healed = session.opponent.heal(opponent.pending_heal);

    // Effect ticks
    let (player_tick, player_next) = tick_effects(&session.player.effects);
    let (opponent_tick, opponent_next) = tick_effects(&session.opponent.effects);

    let player_drained = drained_health(&session.player, &player_tick);
    let opponent_drained = drained_health(&session.opponent, &opponent_tick);
    session.player.take_damage(player_tick.damage);
    session.opponent.take_damage(opponent_tick.damage);
    player.take(player_tick.damage);
    opponent.take(opponent_tick.damage);
    player.effect_damage = player_tick.damage;
    opponent.effect_damage = opponent_tick.damage;

    player.healed += session
        .player
        .heal(player_tick.healing.saturating_add(opponent_drained));
    opponent.healed += session
        .opponent
        .heal(opponent_tick.healing.saturating_add(player_drained));
    session.player.restore_mana(player_tick.mana);
    session.opponent.restore_mana(opponent_tick.mana);
    session.player.effects = player_next;
    session.opponent.effects = opponent_next;

    // New effects start ticking next turn
    apply_rolled_effects(
        &mut session,
        Side::Player,
        &player_move,
        negates(&opponent_guard),
        rng,
    );
    apply_rolled_effects(
        &mut session,
        Side::Opponent,
        &opponent_move,
        negates(&player_guard),
        rng,
    );

    for side in [Side::Player, Side::Opponent] {
        if let Some(event) = prevent_death(&mut session, side, registry) {
            events.push(event);
        }
    }

    session.stats.turns += 1;
    merge_stats(
        &mut session.stats.player,
        &player_move,
        &player,
        player_strike.critical,
    );
    merge_stats(
        &mut session.stats.opponent,
        &opponent_move,
        &opponent,
        opponent_strike.critical,
    );

    session.outcome = match (session.player.is_alive(), session.opponent.is_alive()) {
        (true, true) => None,
        (true, false) => Some(BattleOutcome::Victory),
        (false, true) => Some(BattleOutcome::Defeat),
        (false, false) => Some(BattleOutcome::Draw),
    };
    if let Some(outcome) = session.outcome {
        info!(
            session_id = %session.id,
            floor = session.floor,
            battle_type = %session.battle_type,
            turns = session.turn_number,
            ?outcome,
            "Battle ended"
        );
    }

    let result = TurnResult {
        turn: session.turn_number,
        player: side_report(&player_move, &player, &session.player),
        opponent: side_report(&opponent_move, &opponent, &session.opponent),
        critical_hits,
        events,
        outcome: session.outcome,
    };

    Ok((session, result))
}

fn action_costs(action: &Action, catalog: &Catalog) -> Option<(u32, u32)> {
    match action.kind {
        ActionKind::Weapon => catalog
            .weapon(&action.id)
            .map(|w| (w.mana_cost, w.health_cost)),
        ActionKind::Ability => catalog
            .ability(&action.id)
            .map(|s| (s.mana_cost, s.health_cost)),
        ActionKind::Spell => catalog
            .spell(&action.id)
            .map(|s| (s.mana_cost, s.health_cost)),
    }
}

/// Mana must be on hand. A health cost must leave the combatant alive.
fn affordable(combatant: &Combatant, (mana, health): (u32, u32)) -> bool {
    mana <= combatant.current_mana && (health == 0 || health < combatant.current_health)
}

/// Pick uniformly among the combatant's known, affordable actions.
///
/// Passive death-prevention abilities are never chosen. With nothing
/// affordable the combatant falls back to a basic attack.
pub fn choose_opponent_action(
    combatant: &Combatant,
    catalog: &Catalog,
    registry: &SpecialRegistry,
    rng: &mut impl Rng,
) -> Action {
    let mut candidates: Vec<Action> = combatant
        .available_actions()
        .into_iter()
        .filter(|action| {
            !(action.kind == ActionKind::Ability && registry.is_death_prevention(&action.id))
        })
        .filter(|action| {
            action_costs(action, catalog).is_some_and(|cost| affordable(combatant, cost))
        })
        .collect();

    if candidates.is_empty() {
        return Action::basic_attack();
    }
    let index = rng.gen_range(0..candidates.len());
    candidates.swap_remove(index)
}

/// Whether the flee penalty should use the stronger-opponent rate.
pub fn is_stronger_opponent(session: &BattleSession, config: &FleeConfig) -> bool {
    session.floor >= config.strong_floor
        || session.opponent.max_health > config.strong_max_health
        || session.opponent.ability_count() > config.strong_ability_count
}

/// End a live, non-boss battle by fleeing.
pub fn flee(session: &mut BattleSession, config: &FleeConfig) -> EngineResult<FleeOutcome> {
    if let Some(outcome) = session.outcome {
        return Err(EngineError::SessionOver {
            session_id: session.id,
            outcome,
        });
    }
    if !session.battle_type.allows_flee() {
        return Err(EngineError::FleeNotAllowed(session.battle_type));
    }

    let stronger_opponent = is_stronger_opponent(session, config);
    let gold_penalty_percent = if stronger_opponent {
        config.strong_penalty_percent
    } else {
        config.weak_penalty_percent
    };
    session.outcome = Some(BattleOutcome::Fled);

    info!(
        session_id = %session.id,
        floor = session.floor,
        turns = session.turn_number,
        stronger_opponent,
        gold_penalty_percent,
        "Player fled"
    );

    Ok(FleeOutcome {
        stronger_opponent,
        gold_penalty_percent,
    })
}

/// End a live battle by accepting defeat.
pub fn concede(session: &mut BattleSession) -> EngineResult<()> {
    if let Some(outcome) = session.outcome {
        return Err(EngineError::SessionOver {
            session_id: session.id,
            outcome,
        });
    }
    session.outcome = Some(BattleOutcome::Conceded);
    info!(
        session_id = %session.id,
        floor = session.floor,
        turns = session.turn_number,
        "Player conceded"
    );
    Ok(())
}
