//! Data-driven content and loaders.
//!
//! This crate turns data files into values `crawl-core` can run:
//! - Game configuration (TOML) into a [`crawl_core::GameConfig`]
//! - Scenarios (RON) into a validated [`crawl_core::GameState`]
//!
//! Scenarios describe an already generated world: terrain rows, map objects,
//! stairway links, monsters and items. Nothing here is consulted once the
//! world has been handed to the engine.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{ItemSpec, WeaponSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ScenarioLoader};
