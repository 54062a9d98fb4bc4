use crate::action::{ActionContext, ActionTransition};
use crate::env::GameEnv;
use crate::error::NeverError;
use crate::state::{EntityId, GameState};

/// Pass the turn. Also the fallback for any monster whose plan is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitAction {
    pub actor: EntityId,
}

impl WaitAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for WaitAction {
    type Error = NeverError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, _state: &GameState, env: &GameEnv<'_>) -> u32 {
        env.config().action_cost
    }

    fn apply(
        &self,
        _state: &mut GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        Ok(())
    }
}
