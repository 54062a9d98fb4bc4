//! Game configuration loader.

use std::path::Path;

use anyhow::{Context, ensure};
use crawl_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Keys left out of the file keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::check(&config)?;
        Ok(config)
    }

    fn check(config: &GameConfig) -> LoadResult<()> {
        ensure!(config.min_speed > 0, "min_speed must be positive");
        ensure!(
            config.min_speed <= config.max_speed,
            "min_speed {} exceeds max_speed {}",
            config.min_speed,
            config.max_speed
        );
        ensure!(config.regen_rounds > 0, "regen_rounds must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let config = ConfigLoader::parse("bounce_length = 5\n").expect("parses");
        assert_eq!(config.bounce_length, 5);
        assert_eq!(config.move_cost, GameConfig::DEFAULT_MOVE_COST);
        assert_eq!(config.equip_cost, GameConfig::DEFAULT_EQUIP_COST);
    }

    #[test]
    fn rejects_inverted_speed_clamp() {
        let err = ConfigLoader::parse("min_speed = 300\nmax_speed = 200\n").unwrap_err();
        assert!(err.to_string().contains("exceeds max_speed"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "danger_turns = 3\nminor_action_cost = 40").expect("write");
        let config = ConfigLoader::load(file.path()).expect("loads");
        assert_eq!(config.danger_turns, 3);
        assert_eq!(config.minor_action_cost, 40);
    }

    #[test]
    fn reports_the_failing_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.toml");
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
