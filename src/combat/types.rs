use crate::catalog::{DamageType, MonsterDef};
use crate::core::constants::*;
use crate::core::scaling::{scale_by_floor, scale_by_floor_u32};
use crate::effects::{Effect, EffectChance, EffectKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleType {
    FloorBoss,
    Explore,
    Mimic,
    Detected,
    Pvp,
}

impl BattleType {
    pub const ALL: [BattleType; 5] = [
        BattleType::FloorBoss,
        BattleType::Explore,
        BattleType::Mimic,
        BattleType::Detected,
        BattleType::Pvp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BattleType::FloorBoss => "floor_boss",
            BattleType::Explore => "explore",
            BattleType::Mimic => "mimic",
            BattleType::Detected => "detected",
            BattleType::Pvp => "pvp",
        }
    }

    pub fn allows_flee(&self) -> bool {
        !matches!(self, BattleType::FloorBoss)
    }
}

impl fmt::Display for BattleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BattleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BattleType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown battle type '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Weapon,
    Ability,
    Spell,
}

/// A combatant's chosen move for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub id: String,
}

impl Action {
    pub fn weapon(id: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Weapon,
            id: id.into(),
        }
    }

    pub fn ability(id: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Ability,
            id: id.into(),
        }
    }

    pub fn spell(id: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Spell,
            id: id.into(),
        }
    }

    /// The always-available fallback attack.
    pub fn basic_attack() -> Self {
        Self::weapon(BASIC_ATTACK_ID)
    }

    pub fn is_basic_attack(&self) -> bool {
        self.kind == ActionKind::Weapon && self.id == BASIC_ATTACK_ID
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: String,
    pub name: String,
    pub current_health: u32,
    pub max_health: u32,
    pub current_mana: u32,
    pub max_mana: u32,
    #[serde(default)]
    pub armor: u32,
    /// Multiplier on outgoing direct damage (1.0 for players)
    #[serde(default = "default_power")]
    pub power: f64,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub weapons: Vec<String>,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub spells: Vec<String>,
    /// Single-use specials already spent this session
    #[serde(default)]
    pub consumed_specials: BTreeSet<String>,
}

fn default_power() -> f64 {
    1.0
}

impl Combatant {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        max_health: u32,
        max_mana: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            current_health: max_health,
            max_health,
            current_mana: max_mana,
            max_mana,
            armor: 0,
            power: 1.0,
            effects: Vec::new(),
            weapons: Vec::new(),
            abilities: Vec::new(),
            spells: Vec::new(),
            consumed_specials: BTreeSet::new(),
        }
    }

    pub fn with_armor(mut self, armor: u32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_weapons(mut self, ids: &[&str]) -> Self {
        self.weapons = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_abilities(mut self, ids: &[&str]) -> Self {
        self.abilities = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_spells(mut self, ids: &[&str]) -> Self {
        self.spells = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Spawn a monster with health, mana, armor and power scaled for a floor.
    pub fn from_monster(def: &MonsterDef, floor: u32) -> Self {
        let max_health = scale_by_floor_u32(def.health, floor, MONSTER_HEALTH_FLOOR_RATE).max(1);
        let max_mana = scale_by_floor_u32(def.mana, floor, MONSTER_MANA_FLOOR_RATE);
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            current_health: max_health,
            max_health,
            current_mana: max_mana,
            max_mana,
            armor: scale_by_floor_u32(def.armor, floor, MONSTER_ARMOR_FLOOR_RATE),
            power: scale_by_floor(1.0, floor, MONSTER_POWER_FLOOR_RATE),
            effects: Vec::new(),
            weapons: def.weapons.clone(),
            abilities: def.abilities.clone(),
            spells: def.spells.clone(),
            consumed_specials: BTreeSet::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            0.0
        } else {
            self.current_health as f64 / self.max_health as f64
        }
    }

    /// Whether the action id is in this combatant's usable list for its kind.
    pub fn has_action(&self, action: &Action) -> bool {
        let list = match action.kind {
            ActionKind::Weapon => &self.weapons,
            ActionKind::Ability => &self.abilities,
            ActionKind::Spell => &self.spells,
        };
        list.iter().any(|id| id == &action.id)
    }

    pub fn available_actions(&self) -> Vec<Action> {
        self.weapons
            .iter()
            .map(Action::weapon)
            .chain(self.abilities.iter().map(Action::ability))
            .chain(self.spells.iter().map(Action::spell))
            .collect()
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_health = self.current_health.saturating_sub(amount);
    }

    /// Heal up to max health. Returns the health actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health.saturating_sub(self.current_health));
        self.current_health += restored;
        restored
    }

    /// Restore mana up to max mana. Returns the mana actually restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_mana.saturating_sub(self.current_mana));
        self.current_mana += restored;
        restored
    }

    pub fn has_consumed(&self, special_id: &str) -> bool {
        self.consumed_specials.contains(special_id)
    }
}

/// Per-side accumulated counters. Values only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideStats {
    pub damage_dealt: u64,
    pub damage_received: u64,
    pub mana_used: u64,
    pub healing: u64,
    pub critical_hits: u32,
    pub abilities_used: BTreeSet<String>,
    pub spells_used: BTreeSet<String>,
}

impl SideStats {
    pub fn distinct_abilities(&self) -> usize {
        self.abilities_used.len()
    }

    pub fn distinct_spells(&self) -> usize {
        self.spells_used.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleStats {
    pub turns: u32,
    pub player: SideStats,
    pub opponent: SideStats,
}

impl BattleStats {
    pub fn side(&self, side: Side) -> &SideStats {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The opponent reached 0 health
    Victory,
    /// The player reached 0 health
    Defeat,
    /// Both sides reached 0 health in the same turn
    Draw,
    Fled,
    Conceded,
}

/// State of one encounter. Owned by the caller and moved through each turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSession {
    pub id: Uuid,
    pub floor: u32,
    pub battle_type: BattleType,
    pub turn_number: u32,
    pub player: Combatant,
    pub opponent: Combatant,
    pub stats: BattleStats,
    pub outcome: Option<BattleOutcome>,
}

impl BattleSession {
    pub fn new(
        player: Combatant,
        opponent: Combatant,
        floor: u32,
        battle_type: BattleType,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), player, opponent, floor, battle_type)
    }

    pub fn with_id(
        id: Uuid,
        player: Combatant,
        opponent: Combatant,
        floor: u32,
        battle_type: BattleType,
    ) -> Self {
        Self {
            id,
            floor,
            battle_type,
            turn_number: 0,
            player,
            opponent,
            stats: BattleStats::default(),
            outcome: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// The id is not in the combatant's usable actions
    NotAvailable,
    /// The id is missing from the static catalog
    NotInCatalog,
}

/// An action after catalog lookup, fallback and control checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAction {
    pub kind: ActionKind,
    pub id: String,
    pub name: String,
    pub damage: u32,
    pub heal: u32,
    pub mana_cost: u32,
    pub health_cost: u32,
    pub damage_type: DamageType,
    pub pierce: bool,
    pub self_effects: Vec<EffectChance>,
    pub target_effects: Vec<EffectChance>,
    pub prevented_by: Option<EffectKind>,
    pub fallback: Option<FallbackReason>,
}

impl ResolvedAction {
    pub fn basic_attack(fallback: Option<FallbackReason>) -> Self {
        Self {
            kind: ActionKind::Weapon,
            id: BASIC_ATTACK_ID.to_string(),
            name: "Basic Attack".to_string(),
            damage: BASIC_ATTACK_DAMAGE,
            heal: 0,
            mana_cost: 0,
            health_cost: 0,
            damage_type: DamageType::Physical,
            pierce: false,
            self_effects: Vec::new(),
            target_effects: Vec::new(),
            prevented_by: None,
            fallback,
        }
    }

    /// Replace this action with a no-op because a control effect is active.
    pub fn prevented(self, by: EffectKind) -> Self {
        Self {
            damage: 0,
            heal: 0,
            mana_cost: 0,
            health_cost: 0,
            self_effects: Vec::new(),
            target_effects: Vec::new(),
            prevented_by: Some(by),
            ..self
        }
    }

    /// True when the action is the one the combatant actually chose and can perform.
    pub fn is_active(&self) -> bool {
        self.prevented_by.is_none() && self.fallback.is_none()
    }

    pub fn summary(&self) -> ActionSummary {
        ActionSummary {
            kind: self.kind,
            id: self.id.clone(),
            name: self.name.clone(),
            prevented_by: self.prevented_by,
            fallback: self.fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSummary {
    pub kind: ActionKind,
    pub id: String,
    pub name: String,
    pub prevented_by: Option<EffectKind>,
    pub fallback: Option<FallbackReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalHit {
    pub side: Side,
    pub action_name: String,
    pub damage: u32,
}

impl CriticalHit {
    pub fn description(&self) -> String {
        format!(
            "Critical hit! The {}'s {} deals {} damage",
            self.side.name(),
            self.action_name,
            self.damage
        )
    }
}

/// Notable interaction during a turn, surfaced to the caller for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpecialEvent {
    ActionPrevented { side: Side, effect: EffectKind },
    Countered { side: Side, damage: u32 },
    Dodged { side: Side, healed: u32 },
    Silenced { side: Side, self_damage: u32 },
    DeathPrevented { side: Side, ability_id: String },
}

impl SpecialEvent {
    pub fn side(&self) -> Side {
        match self {
            SpecialEvent::ActionPrevented { side, .. }
            | SpecialEvent::Countered { side, .. }
            | SpecialEvent::Dodged { side, .. }
            | SpecialEvent::Silenced { side, .. }
            | SpecialEvent::DeathPrevented { side, .. } => *side,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SpecialEvent::ActionPrevented { side, effect } => {
                format!("The {} is {} and cannot act", side.name(), effect.name())
            }
            SpecialEvent::Countered { side, damage } => format!(
                "The {} counters the attack and strikes back for {} damage",
                side.name(),
                damage
            ),
            SpecialEvent::Dodged { side, healed } => format!(
                "The {} dodges the attack and recovers {} health",
                side.name(),
                healed
            ),
            SpecialEvent::Silenced { side, self_damage } => format!(
                "The {} silences the spell; the caster takes {} damage",
                side.name(),
                self_damage
            ),
            SpecialEvent::DeathPrevented { side, ability_id } => format!(
                "The {} refuses to fall ({}) and holds on with 1 health",
                side.name(),
                ability_id
            ),
        }
    }
}

/// What happened to one side during a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideReport {
    pub action: ActionSummary,
    /// Direct damage landed on the other side plus reflected counter damage
    pub damage_dealt: u32,
    /// All health lost this turn except action health costs
    pub damage_taken: u32,
    /// Health actually restored this turn
    pub healing: u32,
    pub mana_spent: u32,
    pub health_spent: u32,
    /// Portion of damage_taken that came from effect ticks
    pub effect_damage: u32,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub turn: u32,
    pub player: SideReport,
    pub opponent: SideReport,
    pub critical_hits: Vec<CriticalHit>,
    pub events: Vec<SpecialEvent>,
    pub outcome: Option<BattleOutcome>,
}

impl TurnResult {
    pub fn side(&self, side: Side) -> &SideReport {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}

/// Result of a successful flee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleeOutcome {
    pub stronger_opponent: bool,
    /// Share of the player's gold the caller should deduct
    pub gold_penalty_percent: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Combatant {
        Combatant::new("hero", "Hero", 100, 50)
            .with_weapons(&["rusty_sword"])
            .with_abilities(&["counter"])
            .with_spells(&["fireball"])
    }

    #[test]
    fn test_combatant_starts_full() {
        let c = hero();
        assert_eq!(c.current_health, 100);
        assert_eq!(c.current_mana, 50);
        assert!(c.is_alive());
        assert_eq!(c.health_fraction(), 1.0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut c = hero();
        c.take_damage(30);
        assert_eq!(c.heal(50), 30);
        assert_eq!(c.current_health, 100);
    }

    #[test]
    fn test_take_damage_saturates() {
        let mut c = hero();
        c.take_damage(1_000);
        assert_eq!(c.current_health, 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_has_action_checks_kind() {
        let c = hero();
        assert!(c.has_action(&Action::weapon("rusty_sword")));
        assert!(c.has_action(&Action::spell("fireball")));
        assert!(!c.has_action(&Action::ability("fireball")));
        assert_eq!(c.available_actions().len(), 3);
    }

    #[test]
    fn test_from_monster_scales_with_floor() {
        let def = MonsterDef {
            id: "slime".to_string(),
            name: "Slime".to_string(),
            health: 30,
            mana: 0,
            armor: 0,
            weapons: vec!["wooden_club".to_string()],
            abilities: Vec::new(),
            spells: Vec::new(),
        };
        let shallow = Combatant::from_monster(&def, 0);
        let deep = Combatant::from_monster(&def, 200);
        assert_eq!(shallow.max_health, 30);
        assert_eq!(shallow.power, 1.0);
        assert!(deep.max_health > shallow.max_health);
        assert!(deep.power > shallow.power);
        assert_eq!(deep.current_health, deep.max_health);
    }

    #[test]
    fn test_battle_type_names_round_trip() {
        for battle_type in BattleType::ALL {
            assert_eq!(battle_type.name().parse::<BattleType>(), Ok(battle_type));
        }
        assert!(!BattleType::FloorBoss.allows_flee());
        assert!(BattleType::Explore.allows_flee());
    }

    #[test]
    fn test_prevented_action_is_inert() {
        let action = ResolvedAction::basic_attack(None).prevented(EffectKind::Stunned);
        assert_eq!(action.damage, 0);
        assert!(!action.is_active());
        assert_eq!(action.summary().prevented_by, Some(EffectKind::Stunned));
    }

    #[test]
    fn test_special_event_messages() {
        let event = SpecialEvent::DeathPrevented {
            side: Side::Player,
            ability_id: "immortal".to_string(),
        };
        assert_eq!(event.side(), Side::Player);
        assert!(event.message().contains("immortal"));
    }
}
