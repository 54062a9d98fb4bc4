//! Deterministic randomness.
//!
//! Rolls are pure functions of a seed. Callers derive the seed from world
//! state with [`compute_seed`], so replaying the same actions in-process
//! reproduces the same dice.

/// Seed-in, number-out random source.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// 1..=sides. A zero-sided die always rolls 0.
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32(seed) % sides) + 1
    }

    /// Uniform value in `[min, max]`.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + (self.next_u32(seed) % (max - min + 1))
    }

    /// True with probability `permille / 1000`.
    fn chance(&self, seed: u64, permille: u32) -> bool {
        self.next_u32(seed) % 1000 < permille
    }
}

/// PCG-XSH-RR: one LCG step followed by an xorshift and a data-dependent
/// rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = seed
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        xorshifted.rotate_right((state >> 59) as u32)
    }
}

/// Roll purposes, used as the `context` of [`compute_seed`] so independent
/// rolls inside one action never share a seed.
pub mod context {
    pub const DAMAGE: u32 = 1;
    pub const WANDER: u32 = 2;
    pub const SPELL: u32 = 3;
    pub const SPAWN_LOADED: u32 = 4;
}

/// Mixes the game seed, action nonce, actor and roll purpose into one seed.
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed
        ^ nonce.wrapping_mul(0x9e37_79b9_7f4a_7c15)
        ^ u64::from(actor_id).wrapping_mul(0x517c_c1b7_2722_0a95)
        ^ u64::from(context).wrapping_mul(0x85eb_ca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51_afd7_ed55_8ccd);
    hash ^= hash >> 33;
    hash
}
