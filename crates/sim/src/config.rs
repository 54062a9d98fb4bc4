//! Simulation settings read from the environment.
use std::env;
use std::path::PathBuf;

/// Headless run configuration.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// TOML game configuration. Built-in defaults when unset.
    pub config_path: Option<PathBuf>,
    /// RON scenario to load.
    pub scenario_path: PathBuf,
    /// Upper bound on player turns before the run stops.
    pub max_turns: u64,
    /// Replaces the scenario's seed when set.
    pub seed: Option<u64>,
    /// Where to write a snapshot of the final world.
    pub save_path: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            scenario_path: PathBuf::from("crates/sim/scenarios/arena.ron"),
            max_turns: 200,
            seed: None,
            save_path: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CRAWL_CONFIG` - Path to a TOML game configuration
    /// - `CRAWL_SCENARIO` - Path to a RON scenario (default: the bundled arena)
    /// - `CRAWL_TURNS` - Maximum number of player turns (default: 200)
    /// - `CRAWL_SEED` - Seed overriding the scenario's
    /// - `CRAWL_SAVE` - Path for the final snapshot
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.config_path = read_env::<PathBuf>("CRAWL_CONFIG");
        if let Some(path) = read_env::<PathBuf>("CRAWL_SCENARIO") {
            config.scenario_path = path;
        }
        if let Some(turns) = read_env::<u64>("CRAWL_TURNS") {
            config.max_turns = turns.max(1);
        }
        config.seed = read_env::<u64>("CRAWL_SEED");
        config.save_path = read_env::<PathBuf>("CRAWL_SAVE");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
