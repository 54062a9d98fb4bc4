mod common;

use common::{monster, room, run, world};
use crawl_core::{
    ActorState, EntityId, GameEvent, Item, ItemKind, MapObject, ObjectKind, Position, Spell, Tick,
    Weapon,
};

fn messages(events: &[GameEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Message(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn potions_heal_and_are_consumed() {
    let player = ActorState::player("Ash", Position::new(1, 1), 20).with_item(Item::new(
        EntityId(5),
        "healing potion",
        ItemKind::Potion { heal: 6 },
    ));
    let mut state = world(room(5, 5), player, Vec::new());
    state.player.hp.current = 10;

    run(&mut state, |engine| {
        assert_eq!(engine.use_item(EntityId(5), None), Ok(true));
        let events = engine.drain_events();
        assert!(
            messages(&events)
                .iter()
                .any(|m| m.contains("recovers 6 hit points"))
        );
    });

    // The potion, then one turn of resting out of danger.
    assert_eq!(state.player.hp.current, 10 + 6 + 1);
    assert!(state.player.inventory.is_empty());
}

#[test]
fn wands_lose_a_charge_per_zap_and_then_disintegrate() {
    let player = ActorState::player("Ash", Position::new(1, 1), 20).with_item(Item::new(
        EntityId(5),
        "wand of zapping",
        ItemKind::Wand {
            spell: Spell::Zap,
            charges: 2,
        },
    ));
    let mut state = world(
        room(8, 5),
        player,
        vec![monster(1, "troll", 4, 1, 1000)],
    );

    run(&mut state, |engine| {
        let target = engine.state().monsters()[0].position;
        assert_eq!(engine.use_item(EntityId(5), Some(target)), Ok(true));
        assert!(matches!(
            engine.state().player.item(EntityId(5)).map(|i| &i.kind),
            Some(ItemKind::Wand { charges: 1, .. })
        ));
        engine.drain_events();

        let target = engine.state().monsters()[0].position;
        assert_eq!(engine.use_item(EntityId(5), Some(target)), Ok(true));
        let events = engine.drain_events();
        assert!(messages(&events).contains(&"The wand of zapping disintegrates."));
    });

    assert!(state.player.item(EntityId(5)).is_none());
    assert!(state.monsters()[0].hp.current < 1000);
}

#[test]
fn spells_without_mana_are_refused_for_free() {
    let player = ActorState::player("Ash", Position::new(1, 1), 20).with_mana(1);
    let mut state = world(room(5, 5), player, Vec::new());

    run(&mut state, |engine| {
        assert_eq!(engine.cast_spell(Spell::Heal, None), Ok(false));
        assert_eq!(engine.clock(), Tick::ZERO);
    });
    assert_eq!(state.player.mp.current, 1);
}

#[test]
fn doors_open_and_close_from_an_adjacent_cell() {
    let mut map = room(6, 3);
    map.add_object(MapObject::new(
        EntityId(30),
        Position::new(3, 1),
        ObjectKind::Door { open: false },
    ));
    let mut state = world(map, ActorState::player("Ash", Position::new(2, 1), 10), Vec::new());
    let door = Position::new(3, 1);

    run(&mut state, |engine| {
        assert_eq!(engine.operate(Position::new(4, 1)), Ok(false));
        assert_eq!(engine.move_player(crawl_core::Direction::East), Ok(false));

        assert_eq!(engine.operate(door), Ok(true));
        assert_eq!(
            engine.state().map().object_at(door).map(|o| o.kind),
            Some(ObjectKind::Door { open: true })
        );
        let events = engine.drain_events();
        assert!(messages(&events).contains(&"Ash opens the door."));

        assert_eq!(engine.move_player(crawl_core::Direction::East), Ok(true));
        assert_eq!(engine.state().player.position, door);
        // Nobody can close a door they stand in.
        assert_eq!(engine.operate(door), Ok(false));
    });
}

#[test]
fn equipping_costs_double_and_returns_the_old_weapon() {
    let player = ActorState::player("Ash", Position::new(1, 1), 10)
        .with_weapon(Weapon::sling())
        .with_item(Item::new(EntityId(7), "axe", ItemKind::Weapon(Weapon::axe())));
    let mut state = world(room(5, 5), player, Vec::new());

    run(&mut state, |engine| {
        assert_eq!(engine.equip(EntityId(7)), Ok(true));
        assert_eq!(engine.state().player.ready_at, Tick(200));
    });

    assert_eq!(state.player.weapon, Some(Weapon::axe()));
    assert_eq!(state.player.inventory.len(), 1);
    assert!(matches!(
        &state.player.inventory[0].kind,
        ItemKind::Weapon(w) if *w == Weapon::sling()
    ));
    assert_ne!(state.player.inventory[0].id, EntityId(7));
}

#[test]
fn swapping_exchanges_primary_and_secondary() {
    let player = ActorState::player("Ash", Position::new(1, 1), 10)
        .with_weapon(Weapon::axe())
        .with_stowed(Weapon::simple_bow());
    let mut state = world(room(5, 5), player, Vec::new());

    run(&mut state, |engine| {
        assert_eq!(engine.swap_weapons(), Ok(true));
    });

    assert_eq!(state.player.weapon, Some(Weapon::simple_bow()));
    assert_eq!(state.player.stowed, Some(Weapon::axe()));
}

#[test]
fn items_on_the_floor_can_be_picked_up_and_dropped() {
    let mut map = room(5, 5);
    map.place_item(
        Position::new(1, 1),
        Item::new(EntityId(9), "scroll of blast", ItemKind::Scroll { spell: Spell::Blast }),
    );
    let mut state = world(map, ActorState::player("Ash", Position::new(1, 1), 10), Vec::new());

    run(&mut state, |engine| {
        assert_eq!(engine.pick_up(EntityId(9)), Ok(true));
        assert!(engine.state().player.item(EntityId(9)).is_some());
        assert_eq!(engine.pick_up(EntityId(9)), Ok(false));
        assert_eq!(engine.drop_item(EntityId(9)), Ok(true));
    });

    assert_eq!(state.map().items_at(Position::new(1, 1)).count(), 1);
}
