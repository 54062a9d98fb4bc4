//! Damage rolls and application.

use crate::engine::{EventLog, GameEvent};
use crate::env::RngOracle;
use crate::state::{Effectiveness, EntityId, GameState, GameStatus, Weapon};

/// What applying damage did to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target already dead or gone; nothing changed.
    Ignored,
    Wounded { remaining: i32 },
    Killed,
}

/// `round(weapon roll * effectiveness)`.
pub fn roll_damage<R: RngOracle + ?Sized>(
    weapon: &Weapon,
    effectiveness: Effectiveness,
    rng: &R,
    seed: u64,
) -> i32 {
    effectiveness.scale(weapon.damage.roll(rng, seed))
}

/// Subtracts `amount` hit points from `target`.
///
/// A monster dropping to zero is removed from its level; the player dropping
/// to zero ends the game. Hitting a target that is already dead or no longer
/// in the live set is a no-op, so repeated calls are safe.
pub fn damage_target(
    state: &mut GameState,
    events: &mut EventLog,
    target: EntityId,
    amount: i32,
) -> DamageOutcome {
    if target.is_player() {
        if state.is_over() || !state.player.is_alive() {
            return DamageOutcome::Ignored;
        }
        state.player.hp.deplete(amount);
        if state.player.hp.is_depleted() {
            state.status = GameStatus::PlayerDied;
            tracing::info!(target: "crawl::combat", "player died");
            events.push(GameEvent::PlayerDied);
            return DamageOutcome::Killed;
        }
        return DamageOutcome::Wounded {
            remaining: state.player.hp.current,
        };
    }

    let Some(monster) = state.level_mut().monster_mut(target) else {
        return DamageOutcome::Ignored;
    };
    if !monster.is_alive() {
        return DamageOutcome::Ignored;
    }
    monster.hp.deplete(amount);
    if !monster.hp.is_depleted() {
        return DamageOutcome::Wounded {
            remaining: monster.hp.current,
        };
    }

    state.remove_monster(target);
    tracing::debug!(target: "crawl::combat", actor = %target, "monster removed");
    events.push(GameEvent::ActorKilled { actor: target });
    DamageOutcome::Killed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use crate::state::{ActorState, Level, Map, TacticKind, Terrain};

    fn state() -> GameState {
        let level = Level::new(Map::filled(5, 5, Terrain::Floor)).with_monster(
            ActorState::monster(EntityId(4), "kobold", Position::new(3, 3), 5, TacticKind::Default),
        );
        GameState::new(
            0,
            ActorState::player("hero", Position::new(1, 1), 6),
            vec![level],
        )
        .expect("one level")
    }

    #[test]
    fn lethal_damage_removes_monster_once() {
        let mut state = state();
        let mut events = EventLog::new();
        assert_eq!(
            damage_target(&mut state, &mut events, EntityId(4), 2),
            DamageOutcome::Wounded { remaining: 3 }
        );
        assert_eq!(
            damage_target(&mut state, &mut events, EntityId(4), 9),
            DamageOutcome::Killed
        );
        assert!(state.monsters().is_empty());

        let snapshot = state.clone();
        assert_eq!(
            damage_target(&mut state, &mut events, EntityId(4), 9),
            DamageOutcome::Ignored
        );
        assert_eq!(state, snapshot);
        assert_eq!(
            events,
            vec![GameEvent::ActorKilled {
                actor: EntityId(4)
            }]
        );
    }

    #[test]
    fn player_death_is_signalled_once() {
        let mut state = state();
        let mut events = EventLog::new();
        assert_eq!(
            damage_target(&mut state, &mut events, EntityId::PLAYER, 6),
            DamageOutcome::Killed
        );
        assert!(state.is_over());
        assert_eq!(
            damage_target(&mut state, &mut events, EntityId::PLAYER, 6),
            DamageOutcome::Ignored
        );
        assert_eq!(events, vec![GameEvent::PlayerDied]);
    }
}
