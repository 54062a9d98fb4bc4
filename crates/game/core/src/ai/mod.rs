//! Monster decision layer.
//!
//! Each monster's [`TacticKind`](crate::state::TacticKind) selects a
//! behavior tree. The tree reads the world through an [`AiContext`] and
//! picks one [`Action`]; the engine then runs it through the same validation
//! as a player action and substitutes a wait if it is rejected.

mod behavior;
mod context;
mod nodes;
mod path;
mod tactics;

pub use behavior::{Behavior, BehaviorTree, Selector, Sequence, Status, leaf, selector, sequence};
pub use context::AiContext;
pub use nodes::{
    AttackPlayer, ChasePlayer, HasSeenPlayer, Idle, LoadWeapon, MoveToLastKnown, PlayerAdjacent,
    PlayerVisible, Retreat, Wander,
};
pub use path::find_path;
pub use tactics::{melee, ranged, tree_for};

use tracing::debug;

use crate::action::{Action, WaitAction};
use crate::env::GameEnv;
use crate::state::{EntityId, GameState, MonsterMemory};
use crate::vision::VisibilityEngine;

/// Chooses the next action for `monster` and returns it with the monster's
/// updated memory. `None` for actors without a brain.
pub fn decide(
    state: &GameState,
    env: &GameEnv<'_>,
    vision: &mut VisibilityEngine,
    monster: EntityId,
) -> Option<(Action, MonsterMemory)> {
    let actor = state.actor(monster).filter(|a| a.is_alive())?;
    let brain = actor.brain?;

    let tree = tree_for(brain.tactic);
    let mut ctx = AiContext::new(monster, state, *env, vision, brain.memory);
    tree.tick(&mut ctx);

    let action = ctx
        .take_action()
        .unwrap_or(Action::Wait(WaitAction::new(monster)));
    debug!(
        actor = %monster,
        tactic = ?brain.tactic,
        sees_player = ctx.player_visible,
        action = action.as_snake_case(),
        "monster decided"
    );
    Some((action, ctx.memory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{AttackAction, ReloadAction, WeaponChoice};
    use crate::config::GameConfig;
    use crate::env::PcgRng;
    use crate::geometry::Position;
    use crate::state::{ActorState, Level, Map, TacticKind, Weapon};

    fn arena(monster: ActorState) -> GameState {
        let map = Map::from_rows(&[
            "#########",
            "#.......#",
            "#.......#",
            "#.......#",
            "#########",
        ])
        .expect("valid rows");
        let player = ActorState::player("Ash", Position::new(1, 2), 20);
        GameState::new(5, player, vec![Level::new(map).with_monster(monster)])
            .expect("one level")
    }

    fn decide_for(state: &GameState) -> (Action, MonsterMemory) {
        let config = GameConfig::default();
        let rng = PcgRng;
        let env = GameEnv::with_rng(&config, &rng);
        let mut vision = VisibilityEngine::new(state.map());
        decide(state, &env, &mut vision, EntityId(1)).expect("monster has a brain")
    }

    fn goblin(x: i32) -> ActorState {
        ActorState::monster(EntityId(1), "goblin", Position::new(x, 2), 5, TacticKind::Default)
            .with_weapon(Weapon::axe())
    }

    fn archer(x: i32, weapon: Weapon) -> ActorState {
        ActorState::monster(EntityId(1), "archer", Position::new(x, 2), 5, TacticKind::Ranged)
            .with_weapon(weapon)
    }

    #[test]
    fn melee_monster_strikes_when_in_reach() {
        let state = arena(goblin(2));
        let (action, memory) = decide_for(&state);
        assert_eq!(
            action,
            Action::Attack(AttackAction::new(
                EntityId(1),
                Position::new(1, 2),
                WeaponChoice::Equipped
            ))
        );
        assert_eq!(memory.last_known_player, Some(Position::new(1, 2)));
        assert!(memory.seen_player);
    }

    #[test]
    fn melee_monster_closes_distance() {
        let state = arena(goblin(5));
        let (action, _) = decide_for(&state);
        let Action::Move(step) = action else {
            panic!("expected a step, got {action:?}");
        };
        let destination = Position::new(5, 2).step(step.direction);
        assert_eq!(destination.chebyshev(Position::new(1, 2)), 3);
    }

    #[test]
    fn archer_loads_before_shooting() {
        let state = arena(archer(5, Weapon::simple_bow()));
        let (action, _) = decide_for(&state);
        assert_eq!(action, Action::Reload(ReloadAction::new(EntityId(1))));

        let state = arena(archer(5, Weapon::simple_bow().loaded()));
        let (action, _) = decide_for(&state);
        assert_eq!(
            action,
            Action::Attack(AttackAction::new(
                EntityId(1),
                Position::new(1, 2),
                WeaponChoice::Equipped
            ))
        );
    }

    #[test]
    fn archer_backs_away_from_an_adjacent_player() {
        let state = arena(archer(2, Weapon::simple_bow().loaded()));
        let (action, _) = decide_for(&state);
        let Action::Move(step) = action else {
            panic!("expected a step, got {action:?}");
        };
        let destination = Position::new(2, 2).step(step.direction);
        assert!(destination.chebyshev(Position::new(1, 2)) > 1);
    }

    #[test]
    fn lost_player_is_tracked_to_the_last_sighting() {
        let map = Map::from_rows(&[
            "#########",
            "#...#...#",
            "#...#...#",
            "#.......#",
            "#########",
        ])
        .expect("valid rows");
        let mut hunter = ActorState::monster(
            EntityId(1),
            "goblin",
            Position::new(6, 1),
            5,
            TacticKind::Default,
        );
        if let Some(brain) = hunter.brain.as_mut() {
            brain.memory = MonsterMemory {
                last_known_player: Some(Position::new(5, 3)),
                seen_player: true,
            };
        }
        let player = ActorState::player("Ash", Position::new(1, 1), 20);
        let state = GameState::new(5, player, vec![Level::new(map).with_monster(hunter)])
            .expect("one level");

        let (action, memory) = decide_for(&state);
        let Action::Move(step) = action else {
            panic!("expected a step, got {action:?}");
        };
        let destination = Position::new(6, 1).step(step.direction);
        assert_eq!(destination.chebyshev(Position::new(5, 3)), 1);
        assert_eq!(memory.last_known_player, Some(Position::new(5, 3)));
    }

    #[test]
    fn the_player_has_no_brain() {
        let state = arena(goblin(5));
        let config = GameConfig::default();
        let rng = PcgRng;
        let env = GameEnv::with_rng(&config, &rng);
        let mut vision = VisibilityEngine::new(state.map());
        assert!(decide(&state, &env, &mut vision, EntityId::PLAYER).is_none());
    }
}
