use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    // Damage over time
    Bleeding,
    Poison,
    Burning,
    Decay,
    // Control
    Stunned,
    Paralyzed,
    Frozen,
    Weakened,
    // Defensive
    BrokenArmor,
    Empowered,
    // Recovery
    Regenerating,
    HealingRain,
    ManaRegenerating,
    HealthDrain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectCategory {
    DamageOverTime,
    Control,
    Defensive,
    Recovery,
}

impl EffectKind {
    pub fn category(&self) -> EffectCategory {
        match self {
            EffectKind::Bleeding | EffectKind::Poison | EffectKind::Burning | EffectKind::Decay => {
                EffectCategory::DamageOverTime
            }
            EffectKind::Stunned
            | EffectKind::Paralyzed
            | EffectKind::Frozen
            | EffectKind::Weakened => EffectCategory::Control,
            EffectKind::BrokenArmor | EffectKind::Empowered => EffectCategory::Defensive,
            EffectKind::Regenerating
            | EffectKind::HealingRain
            | EffectKind::ManaRegenerating
            | EffectKind::HealthDrain => EffectCategory::Recovery,
        }
    }

    /// Control effects that replace the bearer's action with a no-op.
    /// Weakened is a control effect but only reduces outgoing damage.
    pub fn blocks_action(&self) -> bool {
        matches!(
            self,
            EffectKind::Stunned | EffectKind::Paralyzed | EffectKind::Frozen
        )
    }

    /// Heal-over-time kinds that refresh their own duration instead of stacking.
    pub fn refreshes_on_reapply(&self) -> bool {
        matches!(self, EffectKind::Regenerating)
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Bleeding => "Bleeding",
            EffectKind::Poison => "Poison",
            EffectKind::Burning => "Burning",
            EffectKind::Decay => "Decay",
            EffectKind::Stunned => "Stunned",
            EffectKind::Paralyzed => "Paralyzed",
            EffectKind::Frozen => "Frozen",
            EffectKind::Weakened => "Weakened",
            EffectKind::BrokenArmor => "Broken Armor",
            EffectKind::Empowered => "Empowered",
            EffectKind::Regenerating => "Regenerating",
            EffectKind::HealingRain => "Healing Rain",
            EffectKind::ManaRegenerating => "Mana Regenerating",
            EffectKind::HealthDrain => "Health Drain",
        }
    }
}

/// A timed modifier attached to a combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub remaining_turns: u32,
    #[serde(default)]
    pub magnitude: u32,
}

impl Effect {
    pub fn new(kind: EffectKind, remaining_turns: u32, magnitude: u32) -> Self {
        Self {
            kind,
            remaining_turns,
            magnitude,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_turns == 0
    }
}

/// Percent-chance effect carried by a catalog action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectChance {
    pub kind: EffectKind,
    pub chance_percent: u32,
    pub duration: u32,
    #[serde(default)]
    pub magnitude: u32,
}

impl EffectChance {
    pub fn new(kind: EffectKind, chance_percent: u32, duration: u32, magnitude: u32) -> Self {
        Self {
            kind,
            chance_percent,
            duration,
            magnitude,
        }
    }

    /// An effect that always applies.
    pub fn guaranteed(kind: EffectKind, duration: u32, magnitude: u32) -> Self {
        Self::new(kind, 100, duration, magnitude)
    }
}

/// One turn's summed contribution from a combatant's active effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTick {
    /// Damage taken by the bearer (damage over time and drains)
    pub damage: u32,
    /// Healing received by the bearer
    pub healing: u32,
    /// Mana restored to the bearer
    pub mana: u32,
    /// Health drained from the bearer that the opposing combatant receives
    pub drained: u32,
}
