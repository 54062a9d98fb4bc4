#![allow(dead_code)]

use crawl_core::{
    ActorState, EntityId, GameConfig, GameEngine, GameEnv, GameState, Level, Map, PcgRng,
    Position, TacticKind,
};

/// Walled rectangle with open floor inside.
pub fn room(width: usize, height: usize) -> Map {
    let mut rows = Vec::with_capacity(height);
    for y in 0..height {
        let row: String = (0..width)
            .map(|x| {
                let edge = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                if edge { '#' } else { '.' }
            })
            .collect();
        rows.push(row);
    }
    Map::from_rows(&rows).expect("valid rows")
}

pub fn monster(id: u32, name: &str, x: i32, y: i32, hp: i32) -> ActorState {
    ActorState::monster(
        EntityId(id),
        name,
        Position::new(x, y),
        hp,
        TacticKind::Default,
    )
}

pub fn world(map: Map, player: ActorState, monsters: Vec<ActorState>) -> GameState {
    let mut level = Level::new(map);
    for m in monsters {
        level = level.with_monster(m);
    }
    GameState::new(42, player, vec![level]).expect("one level")
}

/// Runs `f` against an engine with default configuration.
pub fn run<T>(state: &mut GameState, f: impl FnOnce(&mut GameEngine<'_>) -> T) -> T {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = GameEnv::with_rng(&config, &rng);
    let mut engine = GameEngine::new(state, env);
    f(&mut engine)
}
