use tracing::debug;

use crate::action::{ActionContext, ActionTransition};
use crate::engine::GameEvent;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Position;
use crate::state::{EntityId, GameState, ObjectKind, StairDirection, StairLink};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("nothing to operate at {target:?}")]
    NothingToOperate { target: Position },

    #[error("{target:?} is out of reach")]
    OutOfReach { target: Position },

    #[error("something stands in the doorway at {target:?}")]
    Obstructed { target: Position },

    #[error("only the player may use stairs")]
    NotPlayer,

    #[error("no stairs leading {direction:?} here")]
    NoStairs { direction: StairDirection },

    #[error("stairs lead nowhere")]
    NoDestination,

    #[error("arrival cell {arrival:?} is blocked")]
    ArrivalBlocked { arrival: Position },
}

impl GameError for InteractError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) => ErrorSeverity::Internal,
            Self::NotPlayer => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "INTERACT_ACTOR_NOT_FOUND",
            Self::NothingToOperate { .. } => "INTERACT_NOTHING_TO_OPERATE",
            Self::OutOfReach { .. } => "INTERACT_OUT_OF_REACH",
            Self::Obstructed { .. } => "INTERACT_OBSTRUCTED",
            Self::NotPlayer => "INTERACT_NOT_PLAYER",
            Self::NoStairs { .. } => "INTERACT_NO_STAIRS",
            Self::NoDestination => "INTERACT_NO_DESTINATION",
            Self::ArrivalBlocked { .. } => "INTERACT_ARRIVAL_BLOCKED",
        }
    }
}

/// Open or close an adjacent door.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperateAction {
    pub actor: EntityId,
    pub target: Position,
}

impl OperateAction {
    pub fn new(actor: EntityId, target: Position) -> Self {
        Self { actor, target }
    }
}

impl ActionTransition for OperateAction {
    type Error = InteractError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, _state: &GameState, env: &GameEnv<'_>) -> u32 {
        env.config().action_cost
    }

    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let actor = state
            .actor(self.actor)
            .ok_or(InteractError::ActorNotFound(self.actor))?;
        let target = self.target;
        if actor.position.chebyshev(target) > 1 {
            return Err(InteractError::OutOfReach { target });
        }
        let operable = state
            .map()
            .object_at(target)
            .is_some_and(|o| matches!(o.kind, ObjectKind::Door { .. }));
        if !operable {
            return Err(InteractError::NothingToOperate { target });
        }
        if state.is_occupied(target) {
            return Err(InteractError::Obstructed { target });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let target = self.target;
        let id = state
            .map()
            .object_at(target)
            .map(|o| o.id)
            .ok_or(InteractError::NothingToOperate { target })?;
        let now_open = match state.map_mut().object_mut(id).map(|o| &mut o.kind) {
            Some(ObjectKind::Door { open }) => {
                *open = !*open;
                *open
            }
            _ => return Err(InteractError::NothingToOperate { target }),
        };
        ctx.vision.rebuild_mask(state.map());

        let verb = if now_open { "opens" } else { "closes" };
        let name = state
            .actor(self.actor)
            .map(|a| a.name.clone())
            .unwrap_or_default();
        ctx.events
            .push(GameEvent::Message(format!("{name} {verb} the door.")));
        Ok(())
    }
}

/// Climb the stairs the player stands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StairsAction {
    pub actor: EntityId,
    pub direction: StairDirection,
}

impl StairsAction {
    pub fn new(actor: EntityId, direction: StairDirection) -> Self {
        Self { actor, direction }
    }

    fn link(&self, state: &GameState) -> Result<StairLink, InteractError> {
        if !self.actor.is_player() {
            return Err(InteractError::NotPlayer);
        }
        let stairs = state
            .map()
            .object_at(state.player.position)
            .filter(|o| o.kind == ObjectKind::Stairs(self.direction))
            .ok_or(InteractError::NoStairs {
                direction: self.direction,
            })?;
        state
            .stairs
            .destination(state.current_level, stairs.id)
            .filter(|link| link.to_level < state.levels.len())
            .ok_or(InteractError::NoDestination)
    }
}

impl ActionTransition for StairsAction {
    type Error = InteractError;
    type Result = usize;

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
        let link = self.link(state)?;
        let destination = &state.levels[link.to_level];
        let arrival = link.arrival;
        let blocked = !destination.map.is_floor(arrival)
            || destination.map.has_solid_object(arrival)
            || destination
                .monsters
                .iter()
                .any(|m| m.is_alive() && m.position == arrival);
        if blocked {
            return Err(InteractError::ArrivalBlocked { arrival });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let link = self.link(state)?;
        state.current_level = link.to_level;
        state.player.position = link.arrival;

        // Monsters on the new level have been idle; they rejoin at the current time.
        let clock = state.turn.clock;
        for monster in &mut state.level_mut().monsters {
            if monster.ready_at < clock {
                monster.ready_at = clock;
            }
        }
        ctx.vision.rebuild_mask(state.map());

        let verb = match self.direction {
            StairDirection::Up => "climbs up",
            StairDirection::Down => "descends",
        };
        ctx.events.push(GameEvent::Message(format!(
            "{} {verb} the stairs.",
            state.player.name
        )));
        debug!(level = link.to_level, "player changed level");
        Ok(link.to_level)
    }
}
