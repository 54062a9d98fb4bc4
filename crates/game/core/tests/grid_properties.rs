mod common;

use common::{monster, room, run, world};
use crawl_core::engine::recent_danger;
use crawl_core::rules::is_movable;
use crawl_core::{ActorState, Direction, InvariantViolation, Map, Position, TacticKind};
use proptest::prelude::*;

fn crowded_world() -> crawl_core::GameState {
    let archer = ActorState::monster(
        crawl_core::EntityId(2),
        "archer",
        Position::new(8, 5),
        6,
        TacticKind::Ranged,
    )
    .with_weapon(crawl_core::Weapon::simple_bow());
    world(
        room(10, 7),
        ActorState::player("Ash", Position::new(1, 1), 500),
        vec![monster(1, "rat", 5, 3, 4), archer, monster(3, "bat", 8, 1, 2)],
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn actors_never_share_or_leave_the_floor(moves in prop::collection::vec(0u8..9, 1..40)) {
        let mut state = crowded_world();
        let outcome: Result<(), TestCaseError> = run(&mut state, |engine| {
            for code in moves {
                let result = match Direction::ALL.get(code as usize) {
                    Some(direction) => engine.move_player(*direction),
                    None => engine.wait(),
                };
                prop_assert!(result.is_ok(), "engine fault: {:?}", result);
                prop_assert_eq!(engine.state().validate(), Ok(()));
                if engine.state().is_over() {
                    break;
                }
            }
            Ok(())
        });
        outcome?;
    }

    #[test]
    fn the_clock_never_runs_backwards(waits in 1usize..30) {
        let mut state = crowded_world();
        run(&mut state, |engine| -> Result<(), TestCaseError> {
            let mut last = engine.clock();
            for _ in 0..waits {
                if engine.wait() != Ok(true) {
                    break;
                }
                prop_assert!(engine.clock() >= last);
                last = engine.clock();
            }
            Ok(())
        })?;
    }

    #[test]
    fn off_map_and_walls_are_never_movable(x in -5i32..15, y in -5i32..12) {
        let state = crowded_world();
        let position = Position::new(x, y);
        if !state.map().is_floor(position) {
            prop_assert!(!is_movable(&state, position));
        }
    }

    #[test]
    fn danger_fades_exactly_after_the_window(seen in 0u64..1000, window in 0u64..50, now in 0u64..1100) {
        prop_assert_eq!(recent_danger(Some(seen), window, now), seen + window > now);
        prop_assert!(!recent_danger(None, window, now));
    }
}

#[test]
fn flood_fill_rejects_off_map_starts() {
    let map = room(5, 5);
    assert_eq!(
        map.flood_fill(Position::new(9, 9)),
        Err(InvariantViolation::FloodFillOffMap(Position::new(9, 9)))
    );
}

#[test]
fn flood_fill_from_a_wall_reaches_nothing() {
    let map = room(5, 5);
    let reached = map.flood_fill(Position::new(0, 0)).expect("on map");
    assert!(reached.iter().all(|r| !r));
}

#[test]
fn connectivity_needs_floor() {
    let map = Map::from_rows(&["###", "###"]).expect("valid rows");
    assert_eq!(map.check_connectivity(), Err(InvariantViolation::NoFloor));
}

#[test]
fn sealing_keeps_the_largest_region() {
    let mut map = Map::from_rows(&[
        "########",
        "#...#..#",
        "#...####",
        "########",
    ])
    .expect("valid rows");
    assert_eq!(map.check_connectivity(), Ok(false));
    assert_eq!(map.seal_unconnected_regions(), Ok(2));
    assert!(!map.is_floor(Position::new(5, 1)));
    assert_eq!(map.check_connectivity(), Ok(true));
}
