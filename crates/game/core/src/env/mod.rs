//! Read-only collaborators handed to the rules.
//!
//! The [`Env`] aggregate bundles configuration and the random source so the
//! engine reaches everything it needs without hard coupling to concrete
//! implementations.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed, context};

use crate::config::GameConfig;

pub struct Env<'a, R>
where
    R: RngOracle + ?Sized,
{
    config: &'a GameConfig,
    rng: &'a R,
}

pub type GameEnv<'a> = Env<'a, dyn RngOracle + 'a>;

impl<'a, R> Env<'a, R>
where
    R: RngOracle + ?Sized,
{
    pub fn new(config: &'a GameConfig, rng: &'a R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a R {
        self.rng
    }
}

impl<'a> GameEnv<'a> {
    /// Type-erases a concrete random source.
    pub fn with_rng<R: RngOracle + 'a>(config: &'a GameConfig, rng: &'a R) -> Self {
        Env::new(config, rng as &'a (dyn RngOracle + 'a))
    }
}

impl<R: RngOracle + ?Sized> Clone for Env<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: RngOracle + ?Sized> Copy for Env<'_, R> {}

impl<R: RngOracle + ?Sized> std::fmt::Debug for Env<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
