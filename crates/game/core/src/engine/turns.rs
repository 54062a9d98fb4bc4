use tracing::{debug, warn};

use crate::action::{Action, ActionContext, WaitAction};
use crate::ai;
use crate::error::{GameError, InvariantViolation};
use crate::state::{EntityId, Tick};

use super::{EngineFault, GameEngine, transition};

/// Internal representation of a scheduled turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScheduledTurn {
    entity: EntityId,
    ready_at: Tick,
}

/// Turn scheduling methods for GameEngine.
impl<'a> GameEngine<'a> {
    /// Returns the current timeline clock value.
    pub fn clock(&self) -> Tick {
        self.state.turn.clock
    }

    /// Returns the entity currently taking their turn.
    pub fn current_actor(&self) -> EntityId {
        self.state.turn.current_actor
    }

    /// The live actor with the least outstanding debt. Ties go to the lower
    /// id, so the player wins them.
    fn select_next_turn(&self) -> Option<ScheduledTurn> {
        self.state
            .live_actor_ids()
            .filter_map(|id| self.state.actor(id).map(|a| (a.ready_at, id)))
            .min_by_key(|(tick, entity)| (*tick, *entity))
            .map(|(ready_at, entity)| ScheduledTurn { entity, ready_at })
    }

    /// Selects the next actor and advances the clock to its ready time.
    pub fn prepare_next_turn(&mut self) -> Result<EntityId, InvariantViolation> {
        let scheduled = self
            .select_next_turn()
            .ok_or(InvariantViolation::NoLiveActors)?;

        if scheduled.ready_at > self.state.turn.clock {
            self.state.turn.clock = scheduled.ready_at;
        }
        self.state.turn.current_actor = scheduled.entity;
        Ok(scheduled.entity)
    }

    /// Charges the speed-scaled cost of `action` to its actor.
    pub(super) fn charge(&mut self, action: &Action) {
        let config = self.env.config();
        let base = action.cost(self.state, &self.env);
        let clock = self.state.turn.clock;
        if let Some(actor) = self.state.actor_mut(action.actor()) {
            let ticks = config.scale_cost(base, actor.effective_speed());
            let start = actor.ready_at.max(clock);
            actor.ready_at = start + ticks;
        }
    }

    /// Lets monsters act until the player is due again or the game ends.
    pub(super) fn run_monster_turns(&mut self) -> Result<(), EngineFault> {
        while !self.state.is_over() {
            let next = self.prepare_next_turn()?;
            if next.is_player() {
                break;
            }
            self.monster_turn(next)?;
        }
        Ok(())
    }

    fn monster_turn(&mut self, monster: EntityId) -> Result<(), EngineFault> {
        let decision = ai::decide(self.state, &self.env, &mut self.vision, monster);
        let action = match decision {
            Some((action, memory)) => {
                if let Some(brain) = self
                    .state
                    .actor_mut(monster)
                    .and_then(|m| m.brain.as_mut())
                {
                    brain.memory = memory;
                }
                action
            }
            None => Action::Wait(WaitAction::new(monster)),
        };

        let mut ctx = ActionContext::new(self.env, &mut self.vision, &mut self.events);
        let performed = match transition::execute_transition(&action, self.state, &mut ctx) {
            Ok(_) => action,
            Err(error) if !error.severity().is_internal() => {
                warn!(
                    actor = %monster,
                    action = action.as_snake_case(),
                    code = error.error_code(),
                    "monster action rejected; waiting instead"
                );
                Action::Wait(WaitAction::new(monster))
            }
            Err(error) => return Err(error.into()),
        };
        debug!(actor = %monster, action = performed.as_snake_case(), "monster acted");

        self.state.turn.nonce += 1;
        self.charge(&performed);
        Ok(())
    }
}
