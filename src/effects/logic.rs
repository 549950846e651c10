use super::types::{Effect, EffectCategory, EffectChance, EffectKind, EffectTick};
use crate::core::constants::{
    EMPOWERED_CRIT_BONUS_PERCENT, EMPOWERED_DAMAGE_MULTIPLIER, WEAKENED_DAMAGE_MULTIPLIER,
};
use rand::Rng;

/// Roll each percent-chance entry once. Successful rolls become new effects.
pub fn roll_effects(chances: &[EffectChance], rng: &mut impl Rng) -> Vec<Effect> {
    chances
        .iter()
        .filter(|chance| chance.duration > 0)
        .filter(|chance| rng.gen_range(0..100) < chance.chance_percent)
        .map(|chance| Effect::new(chance.kind, chance.duration, chance.magnitude))
        .collect()
}

/// Add an effect to a combatant's list.
///
/// Duplicates of the same kind stack, except refreshing heal-over-time kinds
/// which keep a single instance with the longer duration and larger magnitude.
pub fn apply_effect(effects: &mut Vec<Effect>, effect: Effect) {
    if effect.is_expired() {
        return;
    }

    if effect.kind.refreshes_on_reapply() {
        if let Some(existing) = effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.remaining_turns = existing.remaining_turns.max(effect.remaining_turns);
            existing.magnitude = existing.magnitude.max(effect.magnitude);
            return;
        }
    }

    effects.push(effect);
}

/// First active control effect that prevents acting this turn.
pub fn control_effect(effects: &[Effect]) -> Option<EffectKind> {
    effects
        .iter()
        .find(|e| !e.is_expired() && e.kind.blocks_action())
        .map(|e| e.kind)
}

pub fn has_effect(effects: &[Effect], kind: EffectKind) -> bool {
    effects.iter().any(|e| e.kind == kind && !e.is_expired())
}

/// Extra crit chance from empowerment. Multiple stacks do not add up.
pub fn crit_bonus_percent(effects: &[Effect]) -> u32 {
    if has_effect(effects, EffectKind::Empowered) {
        EMPOWERED_CRIT_BONUS_PERCENT
    } else {
        0
    }
}

/// Multiplier applied to the bearer's outgoing direct damage.
pub fn outgoing_damage_multiplier(effects: &[Effect]) -> f64 {
    let mut multiplier = 1.0;
    if has_effect(effects, EffectKind::Empowered) {
        multiplier *= EMPOWERED_DAMAGE_MULTIPLIER;
    }
    if has_effect(effects, EffectKind::Weakened) {
        multiplier *= WEAKENED_DAMAGE_MULTIPLIER;
    }
    multiplier
}

pub fn armor_is_broken(effects: &[Effect]) -> bool {
    has_effect(effects, EffectKind::BrokenArmor)
}

/// Compute this turn's effect contribution and the effect list for next turn.
///
/// Every active effect contributes its magnitude once. Durations are then
/// decremented and effects that reach zero are dropped, so an effect's final
/// tick is always applied before it is removed.
pub fn tick_effects(effects: &[Effect]) -> (EffectTick, Vec<Effect>) {
    let mut tick = EffectTick::default();

    for effect in effects.iter().filter(|e| !e.is_expired()) {
        match effect.kind {
            EffectKind::HealthDrain => {
                tick.damage = tick.damage.saturating_add(effect.magnitude);
                tick.drained = tick.drained.saturating_add(effect.magnitude);
            }
            EffectKind::ManaRegenerating => {
                tick.mana = tick.mana.saturating_add(effect.magnitude);
            }
            EffectKind::Regenerating | EffectKind::HealingRain => {
                tick.healing = tick.healing.saturating_add(effect.magnitude);
            }
            kind if kind.category() == EffectCategory::DamageOverTime => {
                tick.damage = tick.damage.saturating_add(effect.magnitude);
            }
            _ => {}
        }
    }

    let next = effects
        .iter()
        .filter(|e| e.remaining_turns > 1)
        .map(|e| Effect {
            remaining_turns: e.remaining_turns - 1,
            ..e.clone()
        })
        .collect();

    (tick, next)
}
