//! Special ability interactions.
//!
//! Each defensive special is a handler keyed by ability id. When a
//! combatant's chosen action matches a registered id, the handler may
//! intercept the opposing action before generic damage is applied. Rules are
//! evaluated in registration order and the first interception wins.

use super::types::{Combatant, ResolvedAction, Side, SpecialEvent};
use crate::catalog::DamageType;
use crate::core::constants::*;

/// How a defensive special rewrites the incoming action.
#[derive(Debug, Clone, PartialEq)]
pub struct Interception {
    /// The incoming action deals no direct damage and applies no target effects
    pub negate_incoming: bool,
    /// Damage dealt back to the attacker, credited to the defender
    pub reflect_damage: u32,
    /// Damage the attacker inflicts on itself
    pub attacker_self_damage: u32,
    pub defender_heal: u32,
    pub event: SpecialEvent,
}

/// Inputs to an intercept handler.
pub struct InterceptContext<'a> {
    pub defender: Side,
    pub defender_action: &'a ResolvedAction,
    pub incoming: &'a ResolvedAction,
}

pub type InterceptHandler = fn(&InterceptContext<'_>) -> Option<Interception>;

struct InterceptRule {
    special_id: String,
    handler: InterceptHandler,
}

pub struct SpecialRegistry {
    intercepts: Vec<InterceptRule>,
    death_prevention: Vec<String>,
}

impl Default for SpecialRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SpecialRegistry {
    /// Registry with no specials. Every action resolves generically.
    pub fn empty() -> Self {
        Self {
            intercepts: Vec::new(),
            death_prevention: Vec::new(),
        }
    }

    /// Counter, dodge, silence, and the two death-prevention passives.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register_intercept(COUNTER_ABILITY_ID, counter);
        registry.register_intercept(DODGE_ABILITY_ID, dodge);
        registry.register_intercept(SILENCE_SPELL_ID, silence);
        registry.register_death_prevention(ACCEPTING_FATE_ABILITY_ID);
        registry.register_death_prevention(IMMORTAL_ABILITY_ID);
        registry
    }

    /// Add a handler. Re-registering an id replaces its handler in place.
    pub fn register_intercept(&mut self, special_id: &str, handler: InterceptHandler) {
        if let Some(rule) = self
            .intercepts
            .iter_mut()
            .find(|rule| rule.special_id == special_id)
        {
            rule.handler = handler;
            return;
        }
        self.intercepts.push(InterceptRule {
            special_id: special_id.to_string(),
            handler,
        });
    }

    pub fn register_death_prevention(&mut self, ability_id: &str) {
        if !self.is_death_prevention(ability_id) {
            self.death_prevention.push(ability_id.to_string());
        }
    }

    pub fn is_death_prevention(&self, ability_id: &str) -> bool {
        self.death_prevention.iter().any(|id| id == ability_id)
    }

    pub fn is_special(&self, id: &str) -> bool {
        self.is_death_prevention(id) || self.intercepts.iter().any(|r| r.special_id == id)
    }

    /// Check whether the defender's action intercepts the incoming one.
    pub fn intercept(
        &self,
        defender: Side,
        defender_action: &ResolvedAction,
        incoming: &ResolvedAction,
    ) -> Option<Interception> {
        if !defender_action.is_active() {
            return None;
        }
        let ctx = InterceptContext {
            defender,
            defender_action,
            incoming,
        };
        self.intercepts
            .iter()
            .filter(|rule| rule.special_id == defender_action.id)
            .find_map(|rule| (rule.handler)(&ctx))
    }

    /// First registered death-prevention ability the combatant owns and has not used.
    pub fn death_prevention_for(&self, combatant: &Combatant) -> Option<&str> {
        self.death_prevention
            .iter()
            .find(|id| combatant.abilities.contains(id) && !combatant.has_consumed(id))
            .map(String::as_str)
    }
}

fn is_incoming(ctx: &InterceptContext<'_>, damage_type: DamageType) -> bool {
    ctx.incoming.damage > 0 && ctx.incoming.damage_type == damage_type
}

/// Melee only. Piercing attacks are out of reach.
fn counter(ctx: &InterceptContext<'_>) -> Option<Interception> {
    let melee = is_incoming(ctx, DamageType::Physical) && !ctx.incoming.pierce;
    melee.then(|| Interception {
        negate_incoming: true,
        reflect_damage: COUNTER_DAMAGE,
        attacker_self_damage: 0,
        defender_heal: 0,
        event: SpecialEvent::Countered {
            side: ctx.defender,
            damage: COUNTER_DAMAGE,
        },
    })
}

fn dodge(ctx: &InterceptContext<'_>) -> Option<Interception> {
    is_incoming(ctx, DamageType::Physical).then(|| Interception {
        negate_incoming: true,
        reflect_damage: 0,
        attacker_self_damage: 0,
        defender_heal: DODGE_HEAL,
        event: SpecialEvent::Dodged {
            side: ctx.defender,
            healed: DODGE_HEAL,
        },
    })
}

fn silence(ctx: &InterceptContext<'_>) -> Option<Interception> {
    is_incoming(ctx, DamageType::Magic).then(|| Interception {
        negate_incoming: true,
        reflect_damage: 0,
        attacker_self_damage: SILENCE_SELF_DAMAGE,
        defender_heal: 0,
        event: SpecialEvent::Silenced {
            side: ctx.defender,
            self_damage: SILENCE_SELF_DAMAGE,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::{ActionKind, FallbackReason};

    fn action(kind: ActionKind, id: &str, damage: u32, damage_type: DamageType) -> ResolvedAction {
        ResolvedAction {
            kind,
            id: id.to_string(),
            name: id.to_string(),
            damage,
            damage_type,
            ..ResolvedAction::basic_attack(None)
        }
    }

    fn sword() -> ResolvedAction {
        action(ActionKind::Weapon, "rusty_sword", 8, DamageType::Physical)
    }

    fn fireball() -> ResolvedAction {
        action(ActionKind::Spell, "fireball", 20, DamageType::Magic)
    }

    #[test]
    fn test_counter_negates_physical_and_reflects() {
        let registry = SpecialRegistry::builtin();
        let counter = action(ActionKind::Ability, "counter", 0, DamageType::Physical);
        let result = registry
            .intercept(Side::Player, &counter, &sword())
            .expect("counter should trigger");
        assert!(result.negate_incoming);
        assert_eq!(result.reflect_damage, COUNTER_DAMAGE);
        assert_eq!(
            result.event,
            SpecialEvent::Countered {
                side: Side::Player,
                damage: COUNTER_DAMAGE
            }
        );
    }

    #[test]
    fn test_counter_ignores_magic() {
        let registry = SpecialRegistry::builtin();
        let counter = action(ActionKind::Ability, "counter", 0, DamageType::Physical);
        assert_eq!(
            registry.intercept(Side::Player, &counter, &fireball()),
            None
        );
    }

    #[test]
    fn test_counter_ignores_piercing_attacks() {
        let registry = SpecialRegistry::builtin();
        let counter = action(ActionKind::Ability, "counter", 0, DamageType::Physical);
        let bow = ResolvedAction {
            pierce: true,
            ..action(ActionKind::Weapon, "short_bow", 6, DamageType::Physical)
        };
        assert_eq!(registry.intercept(Side::Player, &counter, &bow), None);

        let dodge = action(ActionKind::Ability, "dodge", 0, DamageType::Physical);
        assert!(registry.intercept(Side::Player, &dodge, &bow).is_some());
    }

    #[test]
    fn test_dodge_heals_defender() {
        let registry = SpecialRegistry::builtin();
        let dodge = action(ActionKind::Ability, "dodge", 0, DamageType::Physical);
        let result = registry
            .intercept(Side::Opponent, &dodge, &sword())
            .unwrap();
        assert_eq!(result.defender_heal, DODGE_HEAL);
        assert_eq!(result.reflect_damage, 0);
    }

    #[test]
    fn test_silence_punishes_caster() {
        let registry = SpecialRegistry::builtin();
        let silence = action(ActionKind::Spell, "silence", 0, DamageType::Magic);
        let result = registry
            .intercept(Side::Player, &silence, &fireball())
            .unwrap();
        assert_eq!(result.attacker_self_damage, SILENCE_SELF_DAMAGE);
        assert_eq!(registry.intercept(Side::Player, &silence, &sword()), None);
    }

    #[test]
    fn test_inactive_defender_never_intercepts() {
        let registry = SpecialRegistry::builtin();
        let mut counter = action(ActionKind::Ability, "counter", 0, DamageType::Physical);
        counter.fallback = Some(FallbackReason::NotInCatalog);
        assert_eq!(registry.intercept(Side::Player, &counter, &sword()), None);
    }

    #[test]
    fn test_empty_registry_has_no_specials() {
        let registry = SpecialRegistry::empty();
        let counter = action(ActionKind::Ability, "counter", 0, DamageType::Physical);
        assert_eq!(registry.intercept(Side::Player, &counter, &sword()), None);
        assert!(!registry.is_special("immortal"));
    }

    #[test]
    fn test_register_replaces_existing_handler() {
        fn never(_: &InterceptContext<'_>) -> Option<Interception> {
            None
        }
        let mut registry = SpecialRegistry::builtin();
        registry.register_intercept("counter", never);
        let counter = action(ActionKind::Ability, "counter", 0, DamageType::Physical);
        assert_eq!(registry.intercept(Side::Player, &counter, &sword()), None);
    }

    #[test]
    fn test_death_prevention_lookup_respects_consumption() {
        let registry = SpecialRegistry::builtin();
        let mut guardian =
            Combatant::new("g", "Guardian", 10, 0).with_abilities(&["accepting_fate"]);
        assert_eq!(
            registry.death_prevention_for(&guardian),
            Some("accepting_fate")
        );
        guardian
            .consumed_specials
            .insert("accepting_fate".to_string());
        assert_eq!(registry.death_prevention_for(&guardian), None);
    }
}
