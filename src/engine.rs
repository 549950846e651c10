//! `BattleEngine` bundles the catalog, special registry and configuration so
//! callers drive a battle through one value.
//!
//! All functions take plain data in and return plain data out. Sessions are
//! owned by the caller; the engine keeps no per-battle state.

use crate::catalog::Catalog;
use crate::combat::logic;
use crate::combat::specials::SpecialRegistry;
use crate::combat::types::{
    Action, BattleOutcome, BattleSession, BattleType, Combatant, FleeOutcome, Side, TurnResult,
};
use crate::core::config::EngineConfig;
use crate::core::error::EngineResult;
use crate::core::scaling;
use crate::rating::{self, PerformanceRating};
use crate::rewards::generation;
use crate::rewards::types::{Division, RewardBundle};
use rand::Rng;
use tracing::debug;

/// Rating and rewards for a won battle.
#[derive(Debug, Clone, PartialEq)]
pub struct VictorySummary {
    pub rating: PerformanceRating,
    pub rewards: RewardBundle,
}

pub struct BattleEngine {
    catalog: Catalog,
    registry: SpecialRegistry,
    config: EngineConfig,
}

impl Default for BattleEngine {
    fn default() -> Self {
        Self::new(Catalog::builtin(), EngineConfig::default())
    }
}

impl BattleEngine {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        Self {
            catalog,
            registry: SpecialRegistry::builtin(),
            config,
        }
    }

    pub fn with_registry(mut self, registry: SpecialRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &SpecialRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn start_battle(
        &self,
        player: Combatant,
        opponent: Combatant,
        floor: u32,
        battle_type: BattleType,
    ) -> BattleSession {
        let session = BattleSession::new(player, opponent, floor, battle_type);
        debug!(
            session_id = %session.id,
            floor,
            battle_type = %battle_type,
            opponent = %session.opponent.id,
            "Battle started"
        );
        session
    }

    /// Instantiate a catalog monster scaled for a floor.
    pub fn spawn_monster(&self, monster_id: &str, floor: u32) -> Option<Combatant> {
        self.catalog
            .monster(monster_id)
            .map(|def| Combatant::from_monster(def, floor))
    }

    pub fn resolve_turn(
        &self,
        session: BattleSession,
        player_action: &Action,
        opponent_action: &Action,
        rng: &mut impl Rng,
    ) -> EngineResult<(BattleSession, TurnResult)> {
        logic::resolve_turn(
            session,
            player_action,
            opponent_action,
            &self.catalog,
            &self.registry,
            rng,
        )
    }

    pub fn choose_opponent_action(&self, combatant: &Combatant, rng: &mut impl Rng) -> Action {
        logic::choose_opponent_action(combatant, &self.catalog, &self.registry, rng)
    }

    /// Score one side of a session with that side's stats and ending health.
    pub fn rate_battle(&self, session: &BattleSession, side: Side) -> PerformanceRating {
        rating::rate_battle(&session.stats, side, session.combatant(side))
    }

    pub fn generate_rewards(
        &self,
        floor: u32,
        battle_type: BattleType,
        rating: &PerformanceRating,
        division: Division,
        rng: &mut impl Rng,
    ) -> RewardBundle {
        generation::generate_rewards(
            floor,
            battle_type,
            rating,
            division,
            &self.catalog,
            &self.config.economy,
            rng,
        )
    }

    pub fn scale_by_floor(&self, base: f64, floor: u32, rate: f64) -> f64 {
        scaling::scale_by_floor(base, floor, rate)
    }

    pub fn flee(&self, session: &mut BattleSession) -> EngineResult<FleeOutcome> {
        logic::flee(session, &self.config.flee)
    }

    pub fn concede(&self, session: &mut BattleSession) -> EngineResult<()> {
        logic::concede(session)
    }

    /// Rate and reward a finished battle. Only victories pay out.
    pub fn finish_battle(
        &self,
        session: &BattleSession,
        division: Division,
        rng: &mut impl Rng,
    ) -> Option<VictorySummary> {
        if session.outcome != Some(BattleOutcome::Victory) {
            return None;
        }
        let rating = self.rate_battle(session, Side::Player);
        let rewards = self.generate_rewards(
            session.floor,
            session.battle_type,
            &rating,
            division,
            rng,
        );
        Some(VictorySummary { rating, rewards })
    }
}
