mod common;

use common::{monster, room, run, world};
use crawl_core::{ActorState, GameEvent, Position, Tick, Weapon, WeaponChoice};

fn archer() -> ActorState {
    ActorState::player("Ash", Position::new(1, 1), 20).with_weapon(Weapon::simple_bow())
}

fn loaded(state: &crawl_core::GameState) -> bool {
    state.player.weapon.as_ref().is_some_and(|w| w.loaded)
}

#[test]
fn unloaded_bow_must_be_reloaded_before_it_fires() {
    let mut state = world(room(10, 5), archer(), Vec::new());
    let target = Position::new(5, 1);

    run(&mut state, |engine| {
        assert_eq!(engine.attack(target, WeaponChoice::Equipped), Ok(false));
        assert_eq!(engine.clock(), Tick::ZERO);

        assert_eq!(engine.reload_weapon(), Ok(true));
        assert_eq!(engine.clock(), Tick(50));
        assert!(loaded(engine.state()));

        assert_eq!(engine.attack(target, WeaponChoice::Equipped), Ok(true));
        assert_eq!(engine.clock(), Tick(150));
    });

    // Nobody stood at the end of the shot; the bow is spent anyway.
    assert!(!loaded(&state));
}

#[test]
fn ranged_shot_traces_the_path_and_hits_the_endpoint() {
    let player = ActorState::player("Ash", Position::new(1, 1), 20)
        .with_weapon(Weapon::simple_bow().loaded());
    let mut state = world(
        room(10, 5),
        player,
        vec![monster(1, "troll", 5, 1, 1000)],
    );

    run(&mut state, |engine| {
        assert_eq!(
            engine.attack(Position::new(5, 1), WeaponChoice::Equipped),
            Ok(true)
        );
        let events = engine.drain_events();
        let shot = events.iter().find_map(|e| match e {
            GameEvent::RangedAttack {
                path,
                target_at_end,
                ..
            } => Some((path.clone(), *target_at_end)),
            _ => None,
        });
        assert_eq!(
            shot,
            Some((
                vec![
                    Position::new(2, 1),
                    Position::new(3, 1),
                    Position::new(4, 1),
                    Position::new(5, 1),
                ],
                true
            ))
        );
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Message(text) if text.starts_with("Ash shoots at the troll")
        )));
    });

    assert!(state.monsters()[0].hp.current < 1000);
    assert!(!loaded(&state));
}

#[test]
fn melee_into_empty_air_is_a_legal_miss() {
    let player = ActorState::player("Ash", Position::new(1, 1), 20).with_weapon(Weapon::axe());
    let mut state = world(room(6, 4), player, Vec::new());

    run(&mut state, |engine| {
        assert_eq!(
            engine.attack(Position::new(2, 1), WeaponChoice::Equipped),
            Ok(true)
        );
        assert_eq!(engine.clock(), Tick(100));
        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::Message(String::from("Ash misses."))));
    });

    assert_eq!(state.player.hp.current, 20);
}

#[test]
fn targets_outside_the_weapon_reach_cost_nothing() {
    let player = ActorState::player("Ash", Position::new(1, 1), 20).with_weapon(Weapon::axe());
    let mut state = world(room(6, 4), player, Vec::new());

    run(&mut state, |engine| {
        // An axe only reaches the four cardinal neighbours.
        assert_eq!(
            engine.attack(Position::new(2, 2), WeaponChoice::Equipped),
            Ok(false)
        );
        // A wall is never a target.
        assert_eq!(
            engine.attack(Position::new(0, 1), WeaponChoice::Equipped),
            Ok(false)
        );
        assert_eq!(engine.clock(), Tick::ZERO);
        assert!(engine.drain_events().is_empty());
    });
}

#[test]
fn bow_cannot_shoot_inside_its_minimum_range() {
    let player = ActorState::player("Ash", Position::new(1, 1), 20)
        .with_weapon(Weapon::simple_bow().loaded());
    let mut state = world(room(10, 5), player, Vec::new());

    run(&mut state, |engine| {
        assert_eq!(
            engine.attack(Position::new(2, 1), WeaponChoice::Equipped),
            Ok(false)
        );
        assert_eq!(engine.clock(), Tick::ZERO);
    });

    assert!(loaded(&state));
}

#[test]
fn reloading_needs_an_empty_ranged_weapon() {
    let melee = ActorState::player("Ash", Position::new(1, 1), 20).with_weapon(Weapon::axe());
    let mut state = world(room(6, 4), melee, Vec::new());
    run(&mut state, |engine| {
        assert_eq!(engine.reload_weapon(), Ok(false));
        assert_eq!(engine.clock(), Tick::ZERO);
    });

    let ready = ActorState::player("Ash", Position::new(1, 1), 20)
        .with_weapon(Weapon::simple_bow().loaded());
    let mut state = world(room(6, 4), ready, Vec::new());
    run(&mut state, |engine| {
        assert_eq!(engine.reload_weapon(), Ok(false));
        assert_eq!(engine.clock(), Tick::ZERO);
    });
}
