//! Error types for the action execution pipeline.

use crate::action::{
    ActionTransition, AttackAction, CastSpellAction, DropAction, EquipAction, MoveAction,
    OperateAction, PickUpAction, ReloadAction, StairsAction, SwapWeaponsAction, UseItemAction,
    WaitAction,
};
use crate::error::{ErrorSeverity, GameError, InvariantViolation};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

type PhaseError<T> = TransitionPhaseError<<T as ActionTransition>::Error>;

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(PhaseError<MoveAction>),

    #[error("attack action failed: {0}")]
    Attack(PhaseError<AttackAction>),

    #[error("wait action failed: {0}")]
    Wait(PhaseError<WaitAction>),

    #[error("reload action failed: {0}")]
    Reload(PhaseError<ReloadAction>),

    #[error("cast spell action failed: {0}")]
    CastSpell(PhaseError<CastSpellAction>),

    #[error("use item action failed: {0}")]
    UseItem(PhaseError<UseItemAction>),

    #[error("pick up action failed: {0}")]
    PickUp(PhaseError<PickUpAction>),

    #[error("drop action failed: {0}")]
    Drop(PhaseError<DropAction>),

    #[error("equip action failed: {0}")]
    Equip(PhaseError<EquipAction>),

    #[error("swap weapons action failed: {0}")]
    SwapWeapons(PhaseError<SwapWeaponsAction>),

    #[error("operate action failed: {0}")]
    Operate(PhaseError<OperateAction>),

    #[error("stairs action failed: {0}")]
    Stairs(PhaseError<StairsAction>),

    #[error("action actor {actor} does not match current turn actor {current_actor}")]
    ActorNotCurrent {
        actor: crate::state::EntityId,
        current_actor: crate::state::EntityId,
    },
}

impl ExecuteError {
    /// Phase that failed, if the error came out of a transition.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::Move(e) => Some(e.phase),
            Self::Attack(e) => Some(e.phase),
            Self::Wait(e) => Some(e.phase),
            Self::Reload(e) => Some(e.phase),
            Self::CastSpell(e) => Some(e.phase),
            Self::UseItem(e) => Some(e.phase),
            Self::PickUp(e) => Some(e.phase),
            Self::Drop(e) => Some(e.phase),
            Self::Equip(e) => Some(e.phase),
            Self::SwapWeapons(e) => Some(e.phase),
            Self::Operate(e) => Some(e.phase),
            Self::Stairs(e) => Some(e.phase),
            Self::ActorNotCurrent { .. } => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Move(e) => e.error.severity(),
            Self::Attack(e) => e.error.severity(),
            Self::Wait(e) => e.error.severity(),
            Self::Reload(e) => e.error.severity(),
            Self::CastSpell(e) => e.error.severity(),
            Self::UseItem(e) => e.error.severity(),
            Self::PickUp(e) => e.error.severity(),
            Self::Drop(e) => e.error.severity(),
            Self::Equip(e) => e.error.severity(),
            Self::SwapWeapons(e) => e.error.severity(),
            Self::Operate(e) => e.error.severity(),
            Self::Stairs(e) => e.error.severity(),
            Self::ActorNotCurrent { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Move(e) => e.error.error_code(),
            Self::Attack(e) => e.error.error_code(),
            Self::Wait(e) => e.error.error_code(),
            Self::Reload(e) => e.error.error_code(),
            Self::CastSpell(e) => e.error.error_code(),
            Self::UseItem(e) => e.error.error_code(),
            Self::PickUp(e) => e.error.error_code(),
            Self::Drop(e) => e.error.error_code(),
            Self::Equip(e) => e.error.error_code(),
            Self::SwapWeapons(e) => e.error.error_code(),
            Self::Operate(e) => e.error.error_code(),
            Self::Stairs(e) => e.error.error_code(),
            Self::ActorNotCurrent { .. } => "EXECUTE_ACTOR_NOT_CURRENT",
        }
    }
}

/// Failures the engine cannot absorb. Illegal requests never end up here;
/// they are reported as "no turn consumed".
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineFault {
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

impl GameError for EngineFault {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invariant(_) => ErrorSeverity::Fatal,
            Self::Execute(e) => e.severity(),
        }
    }
}
