//! Common error infrastructure for crawl-core.
//!
//! Domain-specific errors (e.g. `MoveError`, `AttackError`) live next to the
//! actions they validate. This module holds the pieces they share: severity
//! classification and the fatal [`InvariantViolation`] family.
//!
//! Two classes of failure exist:
//!
//! - **Illegal actions** (target out of range, wall in the way, weapon not
//!   loaded) are rejected before any mutation and carry a recoverable or
//!   validation severity. The engine reports them as "no turn consumed".
//! - **Invariant violations** indicate corrupted input or state and are never
//!   swallowed.

use crate::geometry::Position;
use crate::state::EntityId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; another action may succeed.
    ///
    /// Examples: destination blocked, target out of range
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: unknown item, weapon cannot be loaded
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: actor referenced by an action no longer exists
    Internal,

    /// Corrupted state; the game cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or corrupted state.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all crawl-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the error variant, handy in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Error type for actions that never fail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("this error should never be constructed")]
pub enum NeverError {}

impl GameError for NeverError {
    fn severity(&self) -> ErrorSeverity {
        match *self {}
    }

    fn error_code(&self) -> &'static str {
        match *self {}
    }
}

/// Broken structural guarantees. Always fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("flood fill started off-map at {0:?}")]
    FloodFillOffMap(Position),

    #[error("level contains no floor cells")]
    NoFloor,

    #[error("scheduler found no live actors")]
    NoLiveActors,

    #[error("actor {0} is missing from the world")]
    ActorMissing(EntityId),

    #[error("cell {position:?} holds more than one live actor")]
    SharedCell { position: Position },

    #[error("actor {actor} stands on a non-floor cell {position:?}")]
    ActorOffFloor { actor: EntityId, position: Position },

    #[error("current level index {0} does not exist")]
    MissingLevel(usize),
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::FloodFillOffMap(_) => "FLOOD_FILL_OFF_MAP",
            Self::NoFloor => "NO_FLOOR",
            Self::NoLiveActors => "NO_LIVE_ACTORS",
            Self::ActorMissing(_) => "ACTOR_MISSING",
            Self::SharedCell { .. } => "SHARED_CELL",
            Self::ActorOffFloor { .. } => "ACTOR_OFF_FLOOR",
            Self::MissingLevel(_) => "MISSING_LEVEL",
        }
    }
}
