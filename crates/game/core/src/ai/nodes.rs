//! Condition and action leaves.
//!
//! Conditions only read the blackboard. Action leaves succeed after storing
//! an action that the engine will then validate like any player request.

use std::cmp::Reverse;

use crate::action::{AttackAction, MoveAction, ReloadAction, WaitAction, WeaponChoice};
use crate::combat::weapon_targets;
use crate::env::{compute_seed, context};
use crate::geometry::{Direction, Position};
use crate::rules::is_movable;
use crate::trace::LineTracer;

use super::{AiContext, Behavior, Status, find_path};

pub struct PlayerVisible;

impl Behavior for PlayerVisible {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        ctx.player_visible.into()
    }
}

pub struct PlayerAdjacent;

impl Behavior for PlayerAdjacent {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let player = ctx.player_position();
        ctx.actor()
            .is_some_and(|a| a.position.is_adjacent(player))
            .into()
    }
}

/// Whether the player has ever been in view.
pub struct HasSeenPlayer;

impl Behavior for HasSeenPlayer {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        ctx.memory.seen_player.into()
    }
}

/// Attacks the player if the chosen weapon can legally reach them.
pub struct AttackPlayer {
    pub weapon: WeaponChoice,
}

impl Behavior for AttackPlayer {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let Some(actor) = ctx.actor() else {
            return Status::Failure;
        };
        let target = ctx.player_position();
        let weapon = self.weapon.resolve(actor);
        if weapon.is_ranged() && !weapon.is_ready() {
            return Status::Failure;
        }
        let in_reach = weapon_targets(ctx.state.map(), ctx.vision, actor, &weapon)
            .iter()
            .any(|p| p.position == target);
        if !in_reach {
            return Status::Failure;
        }
        if weapon.is_ranged()
            && LineTracer::new(ctx.state.map())
                .ranged_path(actor.position, target)
                .is_none()
        {
            return Status::Failure;
        }
        ctx.set_action(AttackAction::new(ctx.me, target, self.weapon))
    }
}

/// Minor action: load an unloaded ranged weapon.
pub struct LoadWeapon;

impl Behavior for LoadWeapon {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let needs_loading = ctx
            .actor()
            .and_then(|a| a.weapon.as_ref())
            .is_some_and(|w| w.is_ranged() && !w.loaded);
        if !needs_loading {
            return Status::Failure;
        }
        ctx.set_action(ReloadAction::new(ctx.me))
    }
}

fn step_toward(ctx: &mut AiContext<'_>, goal: Position) -> Status {
    let Some(actor) = ctx.actor() else {
        return Status::Failure;
    };
    let next = find_path(ctx.state, actor.position, goal, true)
        .and_then(|path| path.first().copied())
        .filter(|step| is_movable(ctx.state, *step));
    match next.and_then(|step| Direction::between(actor.position, step)) {
        Some(direction) => ctx.set_action(MoveAction::new(ctx.me, direction)),
        None => Status::Failure,
    }
}

pub struct ChasePlayer;

impl Behavior for ChasePlayer {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let player = ctx.player_position();
        step_toward(ctx, player)
    }
}

/// Walks to where the player was last seen, forgetting the spot on arrival
/// or when it cannot be reached.
pub struct MoveToLastKnown;

impl Behavior for MoveToLastKnown {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let (Some(goal), Some(actor)) = (ctx.memory.last_known_player, ctx.actor()) else {
            return Status::Failure;
        };
        if actor.position == goal {
            ctx.memory.last_known_player = None;
            return Status::Failure;
        }
        let status = step_toward(ctx, goal);
        if status == Status::Failure {
            ctx.memory.last_known_player = None;
        }
        status
    }
}

/// Steps to the free neighbour that gains the most distance from the player.
pub struct Retreat;

impl Behavior for Retreat {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let Some(actor) = ctx.actor() else {
            return Status::Failure;
        };
        let player = ctx.player_position();
        let current = actor.position.chebyshev(player);
        let best = Direction::ALL
            .into_iter()
            .map(|d| (d, actor.position.step(d)))
            .filter(|(_, p)| p.chebyshev(player) > current && is_movable(ctx.state, *p))
            .min_by_key(|(_, p)| Reverse(p.chebyshev(player)));
        match best {
            Some((direction, _)) => ctx.set_action(MoveAction::new(ctx.me, direction)),
            None => Status::Failure,
        }
    }
}

/// Random walk: a seeded starting direction, then clockwise until a free
/// cell turns up.
pub struct Wander;

impl Behavior for Wander {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let Some(actor) = ctx.actor() else {
            return Status::Failure;
        };
        let seed = compute_seed(
            ctx.state.game_seed,
            ctx.state.turn.nonce,
            ctx.me.0,
            context::WANDER,
        );
        let start = Direction::ALL[ctx.env.rng().range(seed, 0, 7) as usize];
        let direction = (0..8)
            .map(|steps| start.rotate(steps))
            .find(|d| is_movable(ctx.state, actor.position.step(*d)));
        match direction {
            Some(direction) => ctx.set_action(MoveAction::new(ctx.me, direction)),
            None => Status::Failure,
        }
    }
}

pub struct Idle;

impl Behavior for Idle {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        ctx.set_action(WaitAction::new(ctx.me))
    }
}
