mod common;

use common::{monster, room, run, world};
use crawl_core::{
    ActorState, EngineFault, EntityId, GameEvent, InvariantViolation, Map, Position, Tick,
};

#[test]
fn double_speed_monster_acts_twice_per_player_turn() {
    let map = Map::from_rows(&[
        "###########",
        "#...#.....#",
        "#...#.....#",
        "#...#.....#",
        "###########",
    ])
    .expect("valid rows");
    let imp = monster(1, "imp", 7, 2, 5).with_speed(200);
    let mut state = world(map, ActorState::player("Ash", Position::new(1, 1), 50), vec![imp]);

    run(&mut state, |engine| {
        for _ in 0..10 {
            assert_eq!(engine.wait(), Ok(true));
        }
    });

    // Every monster action costs 50 ticks at double speed: 20 actions.
    assert_eq!(state.player.ready_at, Tick(1000));
    assert_eq!(state.monsters()[0].ready_at, Tick(1000));
    assert_eq!(state.turn.turn_count, 10);
}

#[test]
fn player_wins_ties_and_is_due_after_every_call() {
    let mut state = world(
        room(8, 5),
        ActorState::player("Ash", Position::new(1, 1), 50),
        vec![monster(1, "rat", 6, 3, 3)],
    );

    run(&mut state, |engine| {
        assert_eq!(engine.current_actor(), EntityId::PLAYER);
        assert_eq!(engine.wait(), Ok(true));
        assert_eq!(engine.current_actor(), EntityId::PLAYER);
        assert_eq!(engine.clock(), Tick(100));
    });
}

#[test]
fn illegal_moves_consume_no_time() {
    let mut state = world(
        room(5, 5),
        ActorState::player("Ash", Position::new(1, 1), 10),
        Vec::new(),
    );

    run(&mut state, |engine| {
        assert_eq!(engine.move_player(crawl_core::Direction::North), Ok(false));
        assert_eq!(engine.clock(), Tick::ZERO);
        assert_eq!(engine.move_player(crawl_core::Direction::South), Ok(true));
        assert_eq!(engine.state().player.position, Position::new(1, 2));
    });
}

#[test]
fn scheduler_without_live_actors_is_fatal() {
    let mut state = world(
        room(5, 5),
        ActorState::player("Ash", Position::new(1, 1), 10),
        Vec::new(),
    );
    state.player.hp.current = 0;

    run(&mut state, |engine| {
        assert_eq!(
            engine.prepare_next_turn(),
            Err(InvariantViolation::NoLiveActors)
        );
    });
}

#[test]
fn game_over_stops_the_engine() {
    let mut ogre = monster(1, "ogre", 2, 1, 30);
    ogre.natural = crawl_core::DiceRoll::new(1, 1, 50);
    let mut state = world(
        room(6, 4),
        ActorState::player("Ash", Position::new(1, 1), 5),
        vec![ogre],
    );

    run(&mut state, |engine| {
        assert_eq!(engine.wait(), Ok(true));
        assert!(engine.state().is_over());
        let events = engine.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::PlayerDied))
                .count(),
            1
        );
        assert_eq!(engine.wait(), Ok(false));
        assert!(engine.drain_events().is_empty());
    });
}

#[test]
fn actions_out_of_turn_are_rejected() {
    let mut state = world(
        room(6, 4),
        ActorState::player("Ash", Position::new(1, 1), 5),
        vec![monster(1, "rat", 4, 2, 3)],
    );

    run(&mut state, |engine| {
        let result = engine.execute(crawl_core::WaitAction::new(EntityId(1)).into());
        assert!(matches!(result, Err(EngineFault::Execute(_))));
    });
}
