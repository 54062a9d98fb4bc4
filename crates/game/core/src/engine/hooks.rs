//! Bookkeeping that runs around every player action.
//!
//! Hooks run in priority order (lower first) once the player's action has
//! resolved and before monsters take their turns.

use std::sync::Arc;

use tracing::debug;

use crate::action::ActionContext;
use crate::combat::damage_target;
use crate::config::GameConfig;
use crate::engine::GameEvent;
use crate::state::{EntityId, GameState, StatusEffectKind};
use crate::vision::VisibilityEngine;

pub trait TurnHook: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lower values execute first.
    fn priority(&self) -> i32 {
        0
    }

    fn apply(&self, state: &mut GameState, ctx: &mut ActionContext<'_>);
}

/// Refreshes the player's field of view and remembers what it reveals.
#[derive(Debug)]
pub struct VisitedHook;

impl TurnHook for VisitedHook {
    fn name(&self) -> &'static str {
        "visited"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn apply(&self, state: &mut GameState, ctx: &mut ActionContext<'_>) {
        mark_player_view(state, ctx.vision);
    }
}

pub(crate) fn mark_player_view(state: &mut GameState, vision: &mut VisibilityEngine) {
    if !state.player.is_alive() {
        return;
    }
    vision.compute(state.player.position, state.player.vision);
    vision.mark_visited(state.map_mut());
}

/// Expires lapsed status effects and applies poison.
#[derive(Debug)]
pub struct StatusHook;

impl TurnHook for StatusHook {
    fn name(&self) -> &'static str {
        "status"
    }

    fn apply(&self, state: &mut GameState, ctx: &mut ActionContext<'_>) {
        let turn = state.turn.turn_count;
        let poison = ctx.env.config().poison_damage;
        let ids: Vec<EntityId> = state.live_actor_ids().collect();

        for id in ids {
            let Some(actor) = state.actor_mut(id) else {
                continue;
            };
            let expired = actor.status.expire(turn);
            let poisoned = actor.status.has(StatusEffectKind::Poisoned);
            if id.is_player() {
                for kind in expired {
                    ctx.events.push(GameEvent::Message(format!(
                        "{} is no longer {}.",
                        actor.name,
                        kind.name()
                    )));
                }
            }
            if poisoned && poison > 0 {
                damage_target(state, ctx.events, id, poison);
            }
        }
    }
}

/// Heals the player a little each turn while nothing threatens them.
#[derive(Debug)]
pub struct RegenerationHook;

impl TurnHook for RegenerationHook {
    fn name(&self) -> &'static str {
        "regeneration"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn apply(&self, state: &mut GameState, ctx: &mut ActionContext<'_>) {
        let config = ctx.env.config();
        if !state.player.is_alive() || assess_danger(state, ctx.vision, config) {
            return;
        }
        let doubled = state.player.status.has(StatusEffectKind::Regenerating);
        let rounds = config.regen_rounds.max(1);
        let step = |maximum: i32| {
            let amount = (maximum / rounds).max(1);
            if doubled { amount * 2 } else { amount }
        };

        let player = &mut state.player;
        let hp = if player.hp.is_full() {
            0
        } else {
            player.hp.restore(step(player.hp.maximum))
        };
        let mp = if player.mp.is_full() {
            0
        } else {
            player.mp.restore(step(player.mp.maximum))
        };
        if hp > 0 || mp > 0 {
            debug!(hp, mp, "player regenerated");
        }
    }
}

/// Advances the player turn counter.
#[derive(Debug)]
pub struct TurnCounterHook;

impl TurnHook for TurnCounterHook {
    fn name(&self) -> &'static str {
        "turn_counter"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn apply(&self, state: &mut GameState, _ctx: &mut ActionContext<'_>) {
        state.turn.turn_count += 1;
    }
}

/// Whether a sighting `danger_turns` ago still counts at `turn_count`.
pub fn recent_danger(last_seen: Option<u64>, danger_turns: u64, turn_count: u64) -> bool {
    last_seen.is_some_and(|seen| seen.saturating_add(danger_turns) > turn_count)
}

/// Current-or-recent danger for the player. A visible monster records the
/// sighting on the turn state.
pub(crate) fn assess_danger(
    state: &mut GameState,
    vision: &mut VisibilityEngine,
    config: &GameConfig,
) -> bool {
    let sees_monster = {
        let fov = vision.compute(state.player.position, state.player.vision);
        state
            .monsters()
            .iter()
            .any(|m| m.is_alive() && fov.is_visible(m.position))
    };
    if sees_monster {
        state.turn.last_monster_sighting = Some(state.turn.turn_count);
        return true;
    }
    if state.player.status.any_negative() {
        return true;
    }
    recent_danger(
        state.turn.last_monster_sighting,
        config.danger_turns,
        state.turn.turn_count,
    )
}

/// Hooks applied after every player action, sorted by priority.
pub fn default_hooks() -> Arc<[Arc<dyn TurnHook>]> {
    let mut hooks: Vec<Arc<dyn TurnHook>> = vec![
        Arc::new(VisitedHook),
        Arc::new(StatusHook),
        Arc::new(RegenerationHook),
        Arc::new(TurnCounterHook),
    ];
    hooks.sort_by_key(|h| h.priority());
    hooks.into()
}
