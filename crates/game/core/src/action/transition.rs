use crate::engine::EventLog;
use crate::env::GameEnv;
use crate::error::GameError;
use crate::state::{EntityId, GameState};
use crate::vision::VisibilityEngine;

/// Everything an action may touch besides the world itself.
pub struct ActionContext<'a> {
    pub env: GameEnv<'a>,
    /// Shared field-of-view cache for the current level.
    pub vision: &'a mut VisibilityEngine,
    pub events: &'a mut EventLog,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        env: GameEnv<'a>,
        vision: &'a mut VisibilityEngine,
        events: &'a mut EventLog,
    ) -> Self {
        Self {
            env,
            vision,
            events,
        }
    }
}

/// Defines how a concrete action variant mutates game state.
///
/// Illegal requests must be rejected in `pre_validate`, before anything is
/// mutated, so a failed action never leaves partial changes behind.
/// `post_validate` checks that the world still satisfies its invariants.
pub trait ActionTransition {
    type Error: GameError;
    type Result;

    fn actor(&self) -> EntityId;

    /// Base cost in action units, before speed scaling.
    fn cost(&self, state: &GameState, env: &GameEnv<'_>) -> u32;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(
        &self,
        _state: &GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action. Implementations may assume `pre_validate` passed.
    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(
        &self,
        _state: &GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}
