//! Actions an actor can take on its turn.
//!
//! Every action is a plain data struct implementing [`ActionTransition`]. The
//! engine drives each one through `pre_validate`, `apply` and `post_validate`
//! and charges its cost to the actor's energy clock.
//!
//! # Module Structure
//!
//! - `movement`: single-step moves
//! - `combat`: melee and ranged attacks, reloading
//! - `magic`: spell casting from mana
//! - `inventory`: using, picking up, dropping and wielding items
//! - `interact`: doors and stairs
//! - `wait`: passing the turn

mod combat;
mod interact;
mod inventory;
mod magic;
mod movement;
mod transition;
mod wait;

pub(crate) use magic::spell_path;

pub use combat::{AttackAction, AttackError, ReloadAction, ReloadError, WeaponChoice};
pub use interact::{InteractError, OperateAction, StairsAction};
pub use inventory::{
    DropAction, EquipAction, ItemError, PickUpAction, SwapWeaponsAction, UseItemAction,
};
pub use magic::{CastSpellAction, CastSpellError};
pub use movement::{MoveAction, MoveError};
pub use transition::{ActionContext, ActionTransition};
pub use wait::WaitAction;

use crate::combat::Strike;
use crate::env::GameEnv;
use crate::geometry::Position;
use crate::state::{EntityId, GameState};

/// Action-specific outcome returned by a successful transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionResult {
    /// Where the actor ended up.
    Move(Position),
    Attack(Strike),
    Wait,
    Reload,
    CastSpell,
    UseItem,
    PickUp,
    Drop,
    Equip,
    SwapWeapons,
    Operate,
    /// Index of the level the player arrived on.
    Stairs(usize),
}

/// Top-level action enum, one variant per action kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    Attack(AttackAction),
    Wait(WaitAction),
    Reload(ReloadAction),
    CastSpell(CastSpellAction),
    UseItem(UseItemAction),
    PickUp(PickUpAction),
    Drop(DropAction),
    Equip(EquipAction),
    SwapWeapons(SwapWeaponsAction),
    Operate(OperateAction),
    Stairs(StairsAction),
}

impl Action {
    /// Returns the entity performing this action.
    pub fn actor(&self) -> EntityId {
        match self {
            Action::Move(a) => a.actor,
            Action::Attack(a) => a.actor,
            Action::Wait(a) => a.actor,
            Action::Reload(a) => a.actor,
            Action::CastSpell(a) => a.actor,
            Action::UseItem(a) => a.actor,
            Action::PickUp(a) => a.actor,
            Action::Drop(a) => a.actor,
            Action::Equip(a) => a.actor,
            Action::SwapWeapons(a) => a.actor,
            Action::Operate(a) => a.actor,
            Action::Stairs(a) => a.actor,
        }
    }

    /// Base cost in action units, before speed scaling.
    pub fn cost(&self, state: &GameState, env: &GameEnv<'_>) -> u32 {
        match self {
            Action::Move(a) => a.cost(state, env),
            Action::Attack(a) => a.cost(state, env),
            Action::Wait(a) => a.cost(state, env),
            Action::Reload(a) => a.cost(state, env),
            Action::CastSpell(a) => a.cost(state, env),
            Action::UseItem(a) => a.cost(state, env),
            Action::PickUp(a) => a.cost(state, env),
            Action::Drop(a) => a.cost(state, env),
            Action::Equip(a) => a.cost(state, env),
            Action::SwapWeapons(a) => a.cost(state, env),
            Action::Operate(a) => a.cost(state, env),
            Action::Stairs(a) => a.cost(state, env),
        }
    }

    /// Used for logging.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::Attack(_) => "attack",
            Action::Wait(_) => "wait",
            Action::Reload(_) => "reload",
            Action::CastSpell(_) => "cast_spell",
            Action::UseItem(_) => "use_item",
            Action::PickUp(_) => "pick_up",
            Action::Drop(_) => "drop",
            Action::Equip(_) => "equip",
            Action::SwapWeapons(_) => "swap_weapons",
            Action::Operate(_) => "operate",
            Action::Stairs(_) => "stairs",
        }
    }
}

macro_rules! impl_from_action {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Self::$variant(action)
                }
            }
        )*
    };
}

impl_from_action! {
    Move => MoveAction,
    Attack => AttackAction,
    Wait => WaitAction,
    Reload => ReloadAction,
    CastSpell => CastSpellAction,
    UseItem => UseItemAction,
    PickUp => PickUpAction,
    Drop => DropAction,
    Equip => EquipAction,
    SwapWeapons => SwapWeaponsAction,
    Operate => OperateAction,
    Stairs => StairsAction,
}
