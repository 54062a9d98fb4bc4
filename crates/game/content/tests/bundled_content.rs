use std::path::PathBuf;

use crawl_content::{ConfigLoader, ScenarioLoader};
use crawl_core::{GameConfig, GameEngine, GameEnv, PcgRng, SaveGame};

fn sim_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../sim")
}

#[test]
fn bundled_config_matches_defaults() {
    let config = ConfigLoader::load(&sim_dir().join("config.toml")).expect("config loads");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn bundled_arena_survives_a_long_wait() {
    let mut state =
        ScenarioLoader::load(&sim_dir().join("scenarios/arena.ron")).expect("arena loads");
    assert_eq!(state.levels.len(), 2);
    assert!(state.levels.iter().all(|l| l.map.check_connectivity() == Ok(true)));

    let config = GameConfig::default();
    let rng = PcgRng;
    let env = GameEnv::with_rng(&config, &rng);
    let mut engine = GameEngine::new(&mut state, env);
    for _ in 0..30 {
        if engine.state().is_over() {
            break;
        }
        assert_eq!(engine.wait(), Ok(true));
        assert_eq!(engine.state().validate(), Ok(()));
    }

    let bytes = SaveGame::encode(engine.state()).expect("encode");
    let restored = SaveGame::decode(&bytes).expect("decode");
    assert_eq!(&restored, engine.state());
}
