//! Deterministic rules for a turn-based tactical dungeon crawl.
//!
//! `crawl-core` owns the canonical world state and every rule that mutates it:
//! the energy-clock turn scheduler, field of view, movement and targeting
//! legality, combat, line tracing for ranged and blast attacks, and the monster
//! decision layer. All state mutation flows through [`engine::GameEngine`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod geometry;
pub mod magic;
#[cfg(feature = "serde")]
pub mod persist;
pub mod rules;
pub mod state;
pub mod trace;
pub mod vision;

pub use action::{
    Action, ActionContext, ActionResult, ActionTransition, AttackAction, AttackError,
    CastSpellAction, CastSpellError, DropAction, EquipAction, InteractError, ItemError,
    MoveAction, MoveError, OperateAction, PickUpAction, ReloadAction, ReloadError, StairsAction,
    SwapWeaponsAction, UseItemAction, WaitAction, WeaponChoice,
};
pub use combat::{DamageOutcome, Narration, Strike};
pub use config::GameConfig;
pub use engine::{
    EngineFault, ExecuteError, GameEngine, GameEvent, TransitionPhase, TransitionPhaseError,
};
pub use env::{Env, GameEnv, PcgRng, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError, InvariantViolation};
pub use geometry::{BresenhamLine, Direction, Position};
pub use magic::Spell;
#[cfg(feature = "serde")]
pub use persist::{PersistError, SaveGame};
pub use state::{
    ActorState, DiceRoll, Effectiveness, EffectivePoint, EntityId, GameState, GameStatus, Item,
    ItemKind, Level, Map, MapObject, MeleeReach, MonsterBrain, MonsterMemory, ObjectFlags,
    ObjectKind, ResourceMeter, StairDirection, StairLink, StairsMapping, StatusEffectKind,
    StatusEffects, TacticKind, Terrain, Tick, TurnState, Weapon, WeaponProfile,
};
pub use trace::LineTracer;
pub use vision::{FieldOfView, TileVisibility, VisibilityEngine};
