use crate::action::Action;
use crate::env::GameEnv;
use crate::geometry::Position;
use crate::state::{ActorState, EntityId, GameState, MonsterMemory};
use crate::vision::VisibilityEngine;

use super::Status;

/// Blackboard for one monster's decision.
///
/// Sight of the player is resolved once when the context is built and the
/// monster's memory is updated with it; tree nodes then only read it.
pub struct AiContext<'a> {
    pub me: EntityId,
    pub state: &'a GameState,
    pub env: GameEnv<'a>,
    pub vision: &'a mut VisibilityEngine,
    /// Working copy, written back by the engine after the decision.
    pub memory: MonsterMemory,
    pub player_visible: bool,
    action: Option<Action>,
}

impl<'a> AiContext<'a> {
    pub fn new(
        me: EntityId,
        state: &'a GameState,
        env: GameEnv<'a>,
        vision: &'a mut VisibilityEngine,
        mut memory: MonsterMemory,
    ) -> Self {
        let player_visible = match state.actor(me) {
            Some(actor) if state.player.is_alive() => vision
                .compute(actor.position, actor.vision)
                .is_visible(state.player.position),
            _ => false,
        };
        if player_visible {
            memory.last_known_player = Some(state.player.position);
            memory.seen_player = true;
        }
        Self {
            me,
            state,
            env,
            vision,
            memory,
            player_visible,
            action: None,
        }
    }

    pub fn actor(&self) -> Option<&'a ActorState> {
        self.state.actor(self.me)
    }

    pub fn player_position(&self) -> Position {
        self.state.player.position
    }

    /// Records the chosen action. The first action set wins.
    pub fn set_action(&mut self, action: impl Into<Action>) -> Status {
        if self.action.is_none() {
            self.action = Some(action.into());
        }
        Status::Success
    }

    pub fn take_action(&mut self) -> Option<Action> {
        self.action.take()
    }
}
