use crate::geometry::Position;
use crate::state::EntityId;

/// Notifications for the presentation layer, drained after each call into
/// the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// Text for the message log.
    Message(String),
    /// Animate a projectile or blast over `path`.
    RangedAttack {
        attacker: EntityId,
        path: Vec<Position>,
        /// Whether an actor stood on the last cell of the path.
        target_at_end: bool,
    },
    ActorKilled {
        actor: EntityId,
    },
    /// Terminal. Emitted once.
    PlayerDied,
}

pub type EventLog = Vec<GameEvent>;
