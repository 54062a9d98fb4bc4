//! Turn scheduling and action execution pipeline.
//!
//! The [`GameEngine`] is the single authority that mutates [`GameState`]. A
//! call into one of its entry points runs the player's action through the
//! transition phases, applies the after-turn hooks and then lets monsters act
//! until the player is due again.

mod errors;
mod events;
mod hooks;
mod queries;
mod transition;
mod turns;

pub use errors::{EngineFault, ExecuteError, TransitionPhase, TransitionPhaseError};
pub use events::{EventLog, GameEvent};
pub use hooks::{
    RegenerationHook, StatusHook, TurnCounterHook, TurnHook, VisitedHook, default_hooks,
    recent_danger,
};

use std::sync::Arc;

use tracing::debug;

use crate::action::{
    Action, ActionContext, ActionResult, AttackAction, CastSpellAction, DropAction, EquipAction,
    MoveAction, OperateAction, PickUpAction, ReloadAction, StairsAction, SwapWeaponsAction,
    UseItemAction, WaitAction, WeaponChoice,
};
use crate::env::GameEnv;
use crate::error::GameError;
use crate::geometry::{Direction, Position};
use crate::magic::Spell;
use crate::state::{EntityId, GameState, StairDirection};
use crate::vision::VisibilityEngine;

/// Game engine that manages action execution, turn scheduling, and game logic.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    env: GameEnv<'a>,
    vision: VisibilityEngine,
    events: EventLog,
    hooks: Arc<[Arc<dyn TurnHook>]>,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine over `state` and reveals the player's
    /// surroundings.
    pub fn new(state: &'a mut GameState, env: GameEnv<'a>) -> Self {
        let mut vision = VisibilityEngine::new(state.map());
        hooks::mark_player_view(state, &mut vision);
        Self {
            state,
            env,
            vision,
            events: EventLog::new(),
            hooks: default_hooks(),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<[Arc<dyn TurnHook>]>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn env(&self) -> GameEnv<'a> {
        self.env
    }

    /// Takes every event produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Runs one player action and the monster turns that follow it.
    ///
    /// Returns `Ok(false)` when the action was illegal and no time passed,
    /// `Ok(true)` when a turn was consumed. Invariant violations surface as
    /// errors.
    pub fn execute(&mut self, action: Action) -> Result<bool, EngineFault> {
        if self.state.is_over() {
            return Ok(false);
        }
        let current_actor = self.state.turn.current_actor;
        if action.actor() != current_actor {
            return Err(ExecuteError::ActorNotCurrent {
                actor: action.actor(),
                current_actor,
            }
            .into());
        }

        hooks::mark_player_view(self.state, &mut self.vision);

        let mut ctx = ActionContext::new(self.env, &mut self.vision, &mut self.events);
        match transition::execute_transition(&action, self.state, &mut ctx) {
            Ok(result) => self.log_result(&action, &result),
            Err(error) if !error.severity().is_internal() => {
                debug!(
                    action = action.as_snake_case(),
                    phase = error.phase().map(|p| p.as_str()),
                    code = error.error_code(),
                    "player action rejected"
                );
                return Ok(false);
            }
            Err(error) => return Err(error.into()),
        }

        self.state.turn.nonce += 1;
        self.charge(&action);

        let hooks = Arc::clone(&self.hooks);
        let mut ctx = ActionContext::new(self.env, &mut self.vision, &mut self.events);
        for hook in hooks.iter() {
            hook.apply(self.state, &mut ctx);
        }

        self.run_monster_turns()?;
        hooks::mark_player_view(self.state, &mut self.vision);
        Ok(true)
    }

    fn log_result(&self, action: &Action, result: &ActionResult) {
        debug!(
            action = action.as_snake_case(),
            ?result,
            nonce = self.state.turn.nonce,
            "player action resolved"
        );
    }

    pub fn move_player(&mut self, direction: Direction) -> Result<bool, EngineFault> {
        self.execute(MoveAction::new(EntityId::PLAYER, direction).into())
    }

    pub fn attack(&mut self, target: Position, weapon: WeaponChoice) -> Result<bool, EngineFault> {
        self.execute(AttackAction::new(EntityId::PLAYER, target, weapon).into())
    }

    pub fn wait(&mut self) -> Result<bool, EngineFault> {
        self.execute(WaitAction::new(EntityId::PLAYER).into())
    }

    pub fn reload_weapon(&mut self) -> Result<bool, EngineFault> {
        self.execute(ReloadAction::new(EntityId::PLAYER).into())
    }

    pub fn cast_spell(
        &mut self,
        spell: Spell,
        target: Option<Position>,
    ) -> Result<bool, EngineFault> {
        self.execute(CastSpellAction::new(EntityId::PLAYER, spell, target).into())
    }

    pub fn use_item(
        &mut self,
        item: EntityId,
        target: Option<Position>,
    ) -> Result<bool, EngineFault> {
        self.execute(UseItemAction::new(EntityId::PLAYER, item, target).into())
    }

    pub fn operate(&mut self, target: Position) -> Result<bool, EngineFault> {
        self.execute(OperateAction::new(EntityId::PLAYER, target).into())
    }

    pub fn pick_up(&mut self, item: EntityId) -> Result<bool, EngineFault> {
        self.execute(PickUpAction::new(EntityId::PLAYER, item).into())
    }

    pub fn drop_item(&mut self, item: EntityId) -> Result<bool, EngineFault> {
        self.execute(DropAction::new(EntityId::PLAYER, item).into())
    }

    pub fn equip(&mut self, item: EntityId) -> Result<bool, EngineFault> {
        self.execute(EquipAction::new(EntityId::PLAYER, item).into())
    }

    pub fn swap_weapons(&mut self) -> Result<bool, EngineFault> {
        self.execute(SwapWeaponsAction::new(EntityId::PLAYER).into())
    }

    pub fn take_stairs(&mut self, direction: StairDirection) -> Result<bool, EngineFault> {
        self.execute(StairsAction::new(EntityId::PLAYER, direction).into())
    }
}
