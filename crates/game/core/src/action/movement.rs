use crate::action::{ActionContext, ActionTransition};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::{Direction, Position};
use crate::state::{EntityId, GameState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("destination {destination:?} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination:?} is blocked")]
    Blocked { destination: Position },

    #[error("destination {destination:?} is occupied")]
    Occupied { destination: Position },

    #[error("cell {position:?} holds more than one actor after moving")]
    SharedCell { position: Position },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds { .. } | Self::Blocked { .. } | Self::Occupied { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::ActorNotFound(_) => ErrorSeverity::Internal,
            Self::SharedCell { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "MOVE_ACTOR_NOT_FOUND",
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Self::Blocked { .. } => "MOVE_BLOCKED",
            Self::Occupied { .. } => "MOVE_OCCUPIED",
            Self::SharedCell { .. } => "MOVE_SHARED_CELL",
        }
    }
}

/// One step in one of eight directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }

    fn destination(&self, state: &GameState) -> Result<Position, MoveError> {
        let actor = state
            .actor(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;
        Ok(actor.position.step(self.direction))
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = Position;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, _state: &GameState, env: &GameEnv<'_>) -> u32 {
        env.config().move_cost
    }

    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let destination = self.destination(state)?;
        let map = state.map();
        if !map.contains(destination) {
            return Err(MoveError::OutOfBounds { destination });
        }
        if !map.is_floor(destination) || map.has_solid_object(destination) {
            return Err(MoveError::Blocked { destination });
        }
        if state.is_occupied(destination) {
            return Err(MoveError::Occupied { destination });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let destination = self.destination(state)?;
        let actor = state
            .actor_mut(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;
        actor.position = destination;
        Ok(destination)
    }

    fn post_validate(
        &self,
        state: &GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let position = state
            .actor(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?
            .position;
        let sharing = state
            .live_actor_ids()
            .filter_map(|id| state.actor(id))
            .filter(|a| a.position == position)
            .count();
        if sharing == 1 {
            Ok(())
        } else {
            Err(MoveError::SharedCell { position })
        }
    }
}
