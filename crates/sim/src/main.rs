//! Headless dungeon simulation.
//!
//! Loads a scenario and a game configuration, then lets a scripted player
//! take turns until it dies, the turn limit is reached or the engine faults.
//! Messages produced by the engine are logged at INFO.
//!
//! ```bash
//! CRAWL_TURNS=50 RUST_LOG=crawl_core=debug cargo run -p crawl-sim
//! ```
mod config;
mod policy;

use anyhow::{Context, Result};
use crawl_content::{ConfigLoader, ScenarioLoader};
use crawl_core::{GameConfig, GameEngine, GameEnv, GameEvent, PcgRng, SaveGame};
use tracing::{info, warn};

use config::SimConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let sim = SimConfig::from_env();
    let game_config = match &sim.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfig::default(),
    };
    let mut state = ScenarioLoader::load(&sim.scenario_path)?;
    if let Some(seed) = sim.seed {
        state.game_seed = seed;
    }
    info!(
        scenario = %sim.scenario_path.display(),
        seed = state.game_seed,
        max_turns = sim.max_turns,
        "starting simulation"
    );

    let rng = PcgRng;
    let env = GameEnv::with_rng(&game_config, &rng);
    let mut engine = GameEngine::new(&mut state, env);

    while engine.state().turn.turn_count < sim.max_turns && !engine.state().is_over() {
        let command = policy::choose(&mut engine);
        let consumed = policy::perform(&mut engine, command)
            .with_context(|| format!("engine fault while performing {command:?}"))?;
        if !consumed {
            warn!(?command, "no turn could be taken");
            break;
        }
        report(engine.drain_events());
    }

    let state = engine.state();
    info!(
        turns = state.turn.turn_count,
        clock = state.turn.clock.0,
        level = state.current_level,
        hp = state.player.hp.current,
        died = state.is_over(),
        "simulation finished"
    );

    if let Some(path) = &sim.save_path {
        let bytes = SaveGame::encode(state)?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        info!(path = %path.display(), "snapshot written");
    }
    Ok(())
}

fn report(events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::Message(text) => info!("{text}"),
            GameEvent::PlayerDied => info!("the player has died"),
            GameEvent::RangedAttack { .. } | GameEvent::ActorKilled { .. } => {}
        }
    }
}
