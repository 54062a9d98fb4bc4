use crate::state::{EntityId, Tick};

/// Scheduler bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// World time. Never decreases.
    pub clock: Tick,
    /// Number of actions resolved so far; feeds the RNG seed.
    pub nonce: u64,
    /// Number of player turns taken.
    pub turn_count: u64,
    /// Player turn on which a monster was last in view.
    pub last_monster_sighting: Option<u64>,
    pub current_actor: EntityId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    #[default]
    InProgress,
    PlayerDied,
}
