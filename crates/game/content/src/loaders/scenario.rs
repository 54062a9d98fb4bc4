//! Scenario loader.
//!
//! A scenario is the hand-off from level generation: terrain rows, map
//! objects, stairway links, monsters, items and the player. The loader builds
//! a [`GameState`] from it and refuses worlds that break the engine's
//! structural guarantees.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, bail, ensure};
use crawl_core::env::{PcgRng, RngOracle, compute_seed, context};
use crawl_core::{
    ActorState, DiceRoll, EntityId, GameConfig, GameState, Item, Level, Map, MapObject,
    ObjectKind, Position, StairLink, StairsMapping, TacticKind,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::{ItemSpec, WeaponSpec};
use crate::loaders::{LoadResult, read_file};

/// Chance in permille that a ranged monster spawns with its weapon loaded
/// when the scenario does not say.
const SPAWN_LOADED_PERMILLE: u32 = 750;

#[derive(Debug, Deserialize)]
struct ScenarioRon {
    seed: u64,
    player: PlayerRon,
    levels: Vec<LevelRon>,
    #[serde(default)]
    stairs: Vec<StairRon>,
}

#[derive(Debug, Deserialize)]
struct PlayerRon {
    name: String,
    at: (i32, i32),
    hp: i32,
    #[serde(default)]
    mp: i32,
    vision: Option<u32>,
    speed: Option<u32>,
    weapon: Option<WeaponSpec>,
    stowed: Option<WeaponSpec>,
    #[serde(default)]
    items: Vec<ItemRon>,
}

#[derive(Debug, Deserialize)]
struct LevelRon {
    rows: Vec<String>,
    /// Wall over floor pockets the largest region cannot reach instead of
    /// rejecting the level.
    #[serde(default)]
    seal_unconnected: bool,
    #[serde(default)]
    objects: Vec<ObjectRon>,
    #[serde(default)]
    monsters: Vec<MonsterRon>,
    #[serde(default)]
    items: Vec<GroundItemRon>,
}

#[derive(Debug, Deserialize)]
struct ObjectRon {
    id: u32,
    at: (i32, i32),
    kind: ObjectKind,
}

#[derive(Debug, Deserialize)]
struct MonsterRon {
    id: u32,
    name: String,
    at: (i32, i32),
    hp: i32,
    tactic: Option<TacticKind>,
    speed: Option<u32>,
    vision: Option<u32>,
    natural: Option<DiceRoll>,
    weapon: Option<WeaponSpec>,
    loaded: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ItemRon {
    name: Option<String>,
    item: ItemSpec,
}

#[derive(Debug, Deserialize)]
struct GroundItemRon {
    at: (i32, i32),
    name: Option<String>,
    item: ItemSpec,
}

#[derive(Debug, Deserialize)]
struct StairRon {
    from_level: usize,
    stairs: u32,
    to_level: usize,
    arrival: (i32, i32),
}

fn position((x, y): (i32, i32)) -> Position {
    Position::new(x, y)
}

/// Loader for scenario worlds from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<GameState> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameState> {
        let data: ScenarioRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        build(data)
    }
}

fn build(data: ScenarioRon) -> LoadResult<GameState> {
    ensure!(!data.levels.is_empty(), "scenario has no levels");

    let mut ids = HashSet::from([EntityId::PLAYER]);
    let mut claim = |id: u32| -> LoadResult<EntityId> {
        let id = EntityId(id);
        ensure!(ids.insert(id), "entity id {id} is used twice");
        Ok(id)
    };

    let mut levels = Vec::with_capacity(data.levels.len());
    let mut ground_items = Vec::new();
    for (index, spec) in data.levels.into_iter().enumerate() {
        let mut map = Map::from_rows(&spec.rows).with_context(|| format!("level {index}"))?;

        let connected = map
            .check_connectivity()
            .with_context(|| format!("level {index}"))?;
        if !connected {
            if !spec.seal_unconnected {
                bail!("level {index} has floor cells the rest of the level cannot reach");
            }
            let sealed = map.seal_unconnected_regions()?;
            info!(level = index, sealed, "sealed unreachable floor");
        }

        for object in spec.objects {
            let at = position(object.at);
            ensure!(
                map.is_floor(at),
                "object {} on level {index} is not on floor",
                object.id
            );
            map.add_object(MapObject::new(claim(object.id)?, at, object.kind));
        }

        let mut level = Level::new(map);
        for monster in spec.monsters {
            let id = claim(monster.id)?;
            check_vision(&monster.name, monster.vision)?;
            level = level.with_monster(spawn_monster(data.seed, id, monster));
        }
        for item in spec.items {
            ground_items.push((index, item));
        }
        levels.push(level);
    }

    let player = &data.player;
    check_vision(&player.name, player.vision)?;
    let mut hero = ActorState::player(player.name.clone(), position(player.at), player.hp)
        .with_mana(player.mp);
    if let Some(vision) = player.vision {
        hero = hero.with_vision(vision);
    }
    if let Some(speed) = player.speed {
        hero = hero.with_speed(speed);
    }
    if let Some(weapon) = player.weapon {
        hero = hero.with_weapon(weapon.build());
    }
    if let Some(stowed) = player.stowed {
        hero = hero.with_stowed(stowed.build());
    }

    let mut stairs = StairsMapping::new();
    for link in &data.stairs {
        stairs.link(check_stair_link(&levels, link)?);
    }

    let mut state = GameState::new(data.seed, hero, levels)?.with_stairs(stairs);

    // Items carry no id in content files; they are numbered after every
    // explicit id has been claimed.
    for spec in &data.player.items {
        let id = state.allocate_id();
        state.player.inventory.push(make_item(id, spec.name.as_deref(), spec.item));
    }
    for (index, spec) in ground_items {
        let id = state.allocate_id();
        let at = position(spec.at);
        let map = &mut state.levels[index].map;
        ensure!(map.is_floor(at), "item on level {index} at {at:?} is not on floor");
        map.place_item(at, make_item(id, spec.name.as_deref(), spec.item));
    }

    state.validate()?;
    debug!(
        levels = state.levels.len(),
        monsters = state.levels.iter().map(|l| l.monsters.len()).sum::<usize>(),
        "scenario loaded"
    );
    Ok(state)
}

fn spawn_monster(game_seed: u64, id: EntityId, spec: MonsterRon) -> ActorState {
    let tactic = spec.tactic.unwrap_or(TacticKind::Default);
    let mut monster = ActorState::monster(id, spec.name, position(spec.at), spec.hp, tactic);
    if let Some(speed) = spec.speed {
        monster = monster.with_speed(speed);
    }
    if let Some(vision) = spec.vision {
        monster = monster.with_vision(vision);
    }
    if let Some(natural) = spec.natural {
        monster = monster.with_natural(natural);
    }
    if let Some(weapon) = spec.weapon {
        let mut weapon = weapon.build();
        if weapon.is_ranged() {
            let loaded = spec.loaded.unwrap_or_else(|| {
                let seed = compute_seed(game_seed, 0, id.0, context::SPAWN_LOADED);
                PcgRng.chance(seed, SPAWN_LOADED_PERMILLE)
            });
            if loaded {
                weapon.load();
            }
        }
        monster = monster.with_weapon(weapon);
    }
    monster
}

fn check_vision(name: &str, vision: Option<u32>) -> LoadResult<()> {
    if let Some(vision) = vision {
        ensure!(
            vision <= GameConfig::MAX_VISION_RADIUS,
            "{name} has vision {vision}, more than {}",
            GameConfig::MAX_VISION_RADIUS
        );
    }
    Ok(())
}

fn make_item(id: EntityId, name: Option<&str>, spec: ItemSpec) -> Item {
    let name = name.map_or_else(|| spec.default_name(), String::from);
    Item::new(id, name, spec.kind())
}

fn check_stair_link(levels: &[Level], link: &StairRon) -> LoadResult<StairLink> {
    let Some(from) = levels.get(link.from_level) else {
        bail!("stairs {} start on missing level {}", link.stairs, link.from_level);
    };
    let Some(to) = levels.get(link.to_level) else {
        bail!("stairs {} lead to missing level {}", link.stairs, link.to_level);
    };
    let stairs = EntityId(link.stairs);
    let is_stairs = from
        .map
        .object(stairs)
        .is_some_and(|o| matches!(o.kind, ObjectKind::Stairs(_)));
    ensure!(
        is_stairs,
        "object {stairs} on level {} is not a stairway",
        link.from_level
    );
    let arrival = position(link.arrival);
    ensure!(
        to.map.is_floor(arrival) && !to.map.has_solid_object(arrival),
        "stairs {stairs} arrive on a blocked cell {arrival:?}"
    );
    Ok(StairLink {
        from_level: link.from_level,
        stairs,
        to_level: link.to_level,
        arrival,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crawl_core::{ItemKind, StairDirection, Terrain};

    use super::*;

    const TWO_LEVELS: &str = r########"
        (
            seed: 11,
            player: (
                name: "Ash",
                at: (1, 1),
                hp: 20,
                mp: 6,
                weapon: Some(Axe),
                stowed: Some(SimpleBow),
                items: [(item: Potion(heal: 5)), (name: Some("old wand"), item: Wand(spell: Zap, charges: 2))],
            ),
            levels: [
                (
                    rows: ["######", "#....#", "#....#", "######"],
                    objects: [
                        (id: 10, at: (4, 2), kind: Stairs(Down)),
                        (id: 11, at: (2, 2), kind: Door(open: false)),
                    ],
                    monsters: [
                        (id: 1, name: "archer", at: (4, 1), hp: 5, tactic: Some(Ranged), weapon: Some(SimpleBow), loaded: Some(true)),
                    ],
                    items: [(at: (3, 1), item: Scroll(spell: Blast))],
                ),
                (
                    rows: ["#####", "#...#", "#####"],
                    objects: [(id: 20, at: (1, 1), kind: Stairs(Up))],
                ),
            ],
            stairs: [
                (from_level: 0, stairs: 10, to_level: 1, arrival: (2, 1)),
                (from_level: 1, stairs: 20, to_level: 0, arrival: (3, 2)),
            ],
        )
    "########;

    #[test]
    fn builds_a_linked_world() {
        let state = ScenarioLoader::parse(TWO_LEVELS).expect("loads");
        assert_eq!(state.levels.len(), 2);
        assert_eq!(state.game_seed, 11);
        assert_eq!(
            state.stairs.destination(0, EntityId(10)).map(|l| l.arrival),
            Some(Position::new(2, 1))
        );
        assert_eq!(
            state.levels[1].map.object(EntityId(20)).map(|o| o.kind),
            Some(ObjectKind::Stairs(StairDirection::Up))
        );

        let archer = &state.levels[0].monsters[0];
        assert!(archer.weapon.as_ref().is_some_and(|w| w.is_ready()));
        assert_eq!(archer.brain.map(|b| b.tactic), Some(TacticKind::Ranged));
    }

    #[test]
    fn items_receive_fresh_ids() {
        let state = ScenarioLoader::parse(TWO_LEVELS).expect("loads");
        let inventory = &state.player.inventory;
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory[0].name, "healing potion");
        assert_eq!(inventory[1].name, "old wand");
        assert!(matches!(inventory[1].kind, ItemKind::Wand { charges: 2, .. }));
        assert!(inventory.iter().all(|i| i.id.0 > 20));

        let ground: Vec<_> = state.levels[0].map.items_at(Position::new(3, 1)).collect();
        assert_eq!(ground.len(), 1);
        assert_eq!(ground[0].name, "scroll of blast");
        assert_ne!(ground[0].id, inventory[0].id);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let text = TWO_LEVELS.replace("(id: 20,", "(id: 10,");
        let err = ScenarioLoader::parse(&text).unwrap_err();
        assert!(err.to_string().contains("used twice"));
    }

    #[test]
    fn rejects_links_to_missing_levels() {
        let text = TWO_LEVELS.replace("to_level: 1,", "to_level: 4,");
        let err = ScenarioLoader::parse(&text).unwrap_err();
        assert!(err.to_string().contains("missing level 4"));
    }

    #[test]
    fn unreachable_pockets_are_rejected_or_sealed() {
        let split = r########"
            (
                seed: 1,
                player: (name: "Ash", at: (1, 1), hp: 5),
                levels: [(rows: ["#######", "#...#.#", "#######"]SEAL)],
            )
        "########;
        let err = ScenarioLoader::parse(&split.replace("SEAL", "")).unwrap_err();
        assert!(err.to_string().contains("cannot reach"));

        let state = ScenarioLoader::parse(&split.replace("SEAL", ", seal_unconnected: true"))
            .expect("sealed");
        let map = &state.levels[0].map;
        assert_eq!(map.terrain(Position::new(5, 1)), Some(Terrain::Wall));
        assert!(map.is_floor(Position::new(3, 1)));
    }

    #[test]
    fn rejects_vision_beyond_the_cap() {
        let text = TWO_LEVELS.replace("hp: 5, tactic", "hp: 5, vision: Some(100000), tactic");
        let err = ScenarioLoader::parse(&text).unwrap_err();
        assert!(err.to_string().contains("archer has vision 100000"));
    }

    #[test]
    fn most_archers_spawn_loaded() {
        let loaded = (1..=400)
            .map(|id| {
                let spec = MonsterRon {
                    id,
                    name: String::from("archer"),
                    at: (1, 1),
                    hp: 3,
                    tactic: Some(TacticKind::Ranged),
                    speed: None,
                    vision: None,
                    natural: None,
                    weapon: Some(WeaponSpec::Sling),
                    loaded: None,
                };
                spawn_monster(7, EntityId(id), spec)
            })
            .filter(|m| m.weapon.as_ref().is_some_and(|w| w.loaded))
            .count();
        // Three in four, give or take.
        assert!((260..=340).contains(&loaded), "{loaded} of 400 loaded");
    }

    #[test]
    fn rejects_actors_on_walls() {
        let text = TWO_LEVELS.replace("at: (4, 1), hp: 5", "at: (0, 0), hp: 5");
        assert!(ScenarioLoader::parse(&text).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(TWO_LEVELS.as_bytes()).expect("write");
        let state = ScenarioLoader::load(file.path()).expect("loads");
        assert_eq!(state.player.name, "Ash");
        assert_eq!(state.player.mp.maximum, 6);
    }
}
