//! Caller-visible engine errors.
//!
//! Only protocol violations surface here. Malformed content inside a battle
//! (unknown action ids, unaffordable costs) degrades gracefully and is logged
//! instead, so an encounter in progress is never aborted.

use crate::combat::types::{BattleOutcome, BattleType, Side};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("battle {session_id} is already over ({outcome:?})")]
    SessionOver {
        session_id: Uuid,
        outcome: BattleOutcome,
    },

    #[error("battle {session_id} cannot continue: {side:?} combatant has no health")]
    CombatantDown { session_id: Uuid, side: Side },

    #[error("cannot flee from a {0} battle")]
    FleeNotAllowed(BattleType),

    #[error("invalid {what} data: {source}")]
    InvalidData {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl EngineError {
    /// True when the error reflects a caller bug rather than bad content.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            EngineError::SessionOver { .. }
                | EngineError::CombatantDown { .. }
                | EngineError::FleeNotAllowed(_)
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
