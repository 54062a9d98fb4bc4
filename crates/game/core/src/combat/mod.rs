//! Combat resolution.
//!
//! Legality (is the cell in the weapon's filtered target set, is the weapon
//! loaded, is there a clear path) is checked by the attack action before any
//! of this runs. These helpers only roll, apply and narrate.
mod damage;
mod narration;

pub use damage::{DamageOutcome, damage_target, roll_damage};
pub use narration::Narration;

use crate::engine::{EventLog, GameEvent};
use crate::env::{RngOracle, compute_seed, context};
use crate::geometry::Position;
use crate::rules::filter_targetable_points;
use crate::state::{ActorState, EffectivePoint, Effectiveness, EntityId, GameState, Map, Weapon};
use crate::vision::VisibilityEngine;

/// The weapon's targetable set from the actor's position, filtered against
/// the map and the actor's sight.
pub fn weapon_targets(
    map: &Map,
    vision: &mut VisibilityEngine,
    actor: &ActorState,
    weapon: &Weapon,
) -> Vec<EffectivePoint> {
    filter_targetable_points(
        map,
        vision,
        weapon.targetable_points(actor.position),
        actor.position,
        actor.vision,
        true,
    )
}

/// Result of one blow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strike {
    pub defender: Option<EntityId>,
    /// `None` when nobody stood on the cell.
    pub damage: Option<i32>,
    pub outcome: DamageOutcome,
}

/// Hits whoever stands on `target` with `weapon` and narrates the blow.
pub fn strike<R: RngOracle + ?Sized>(
    state: &mut GameState,
    events: &mut EventLog,
    rng: &R,
    attacker: EntityId,
    weapon: &Weapon,
    target: Position,
    effectiveness: Effectiveness,
) -> Strike {
    let (attacker_name, attacker_is_player) = match state.actor(attacker) {
        Some(actor) => (actor.name.clone(), actor.is_player()),
        None => (String::from("something"), false),
    };

    let Some(defender_id) = state.actor_at(target) else {
        let text =
            Narration::Miss.render(&attacker_name, attacker_is_player, &weapon.verb, "", false);
        events.push(GameEvent::Message(text));
        return Strike {
            defender: None,
            damage: None,
            outcome: DamageOutcome::Ignored,
        };
    };

    let seed = compute_seed(state.game_seed, state.turn.nonce, attacker.0, context::DAMAGE);
    let damage = roll_damage(weapon, effectiveness, rng, seed);

    let (defender_name, defender_hp) = match state.actor(defender_id) {
        Some(defender) => (defender.name.clone(), defender.hp.current),
        None => (String::new(), 0),
    };
    let killing_blow = damage > 0 && defender_hp <= damage;
    let text = Narration::select(Some(damage), killing_blow).render(
        &attacker_name,
        attacker_is_player,
        &weapon.verb,
        &defender_name,
        defender_id.is_player(),
    );
    events.push(GameEvent::Message(text));

    let outcome = damage_target(state, events, defender_id, damage);
    tracing::debug!(
        target: "crawl::combat",
        attacker = %attacker,
        defender = %defender_id,
        damage,
        ?outcome,
        "strike resolved"
    );
    Strike {
        defender: Some(defender_id),
        damage: Some(damage),
        outcome,
    }
}
