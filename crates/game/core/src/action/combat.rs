use crate::action::{ActionContext, ActionTransition};
use crate::combat::{Strike, strike, weapon_targets};
use crate::engine::GameEvent;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Position;
use crate::state::{ActorState, Effectiveness, EntityId, GameState, Weapon};
use crate::trace::LineTracer;

/// Which weapon an attack uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponChoice {
    /// The wielded weapon, or the natural one when nothing is wielded.
    #[default]
    Equipped,
    /// Fists, claws or teeth.
    Natural,
}

impl WeaponChoice {
    pub fn resolve(self, actor: &ActorState) -> Weapon {
        match (self, &actor.weapon) {
            (WeaponChoice::Equipped, Some(weapon)) => weapon.clone(),
            _ => actor.natural_weapon(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("{target:?} is not a legal target")]
    NotTargetable { target: Position },

    #[error("ranged weapon is not loaded")]
    NotLoaded,

    #[error("no clear line to {target:?}")]
    NoClearPath { target: Position },
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) => ErrorSeverity::Internal,
            Self::NotTargetable { .. } | Self::NoClearPath { .. } => ErrorSeverity::Recoverable,
            Self::NotLoaded => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "ATTACK_ACTOR_NOT_FOUND",
            Self::NotTargetable { .. } => "ATTACK_NOT_TARGETABLE",
            Self::NotLoaded => "ATTACK_NOT_LOADED",
            Self::NoClearPath { .. } => "ATTACK_NO_CLEAR_PATH",
        }
    }
}

/// Attack the cell `target` with the chosen weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub actor: EntityId,
    pub target: Position,
    pub weapon: WeaponChoice,
}

impl AttackAction {
    pub fn new(actor: EntityId, target: Position, weapon: WeaponChoice) -> Self {
        Self {
            actor,
            target,
            weapon,
        }
    }

    fn attacker<'s>(&self, state: &'s GameState) -> Result<&'s ActorState, AttackError> {
        state
            .actor(self.actor)
            .ok_or(AttackError::ActorNotFound(self.actor))
    }

    fn ranged_path(
        &self,
        state: &GameState,
        origin: Position,
    ) -> Result<Vec<Position>, AttackError> {
        LineTracer::new(state.map())
            .ranged_path(origin, self.target)
            .ok_or(AttackError::NoClearPath {
                target: self.target,
            })
    }
}

impl ActionTransition for AttackAction {
    type Error = AttackError;
    type Result = Strike;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, state: &GameState, env: &GameEnv<'_>) -> u32 {
        state
            .actor(self.actor)
            .map(|a| self.weapon.resolve(a).attack_cost)
            .unwrap_or(env.config().action_cost)
    }

    fn pre_validate(
        &self,
        state: &GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let attacker = self.attacker(state)?;
        let weapon = self.weapon.resolve(attacker);

        let legal = weapon_targets(state.map(), ctx.vision, attacker, &weapon)
            .iter()
            .any(|p| p.position == self.target);
        if !legal {
            return Err(AttackError::NotTargetable {
                target: self.target,
            });
        }

        if weapon.is_ranged() {
            if !weapon.loaded {
                return Err(AttackError::NotLoaded);
            }
            self.ranged_path(state, attacker.position)?;
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let attacker = self.attacker(state)?;
        let origin = attacker.position;
        let weapon = self.weapon.resolve(attacker);
        let effectiveness = weapon
            .effectiveness_at(origin, self.target)
            .unwrap_or(Effectiveness::NONE);

        if !weapon.is_ranged() {
            return Ok(strike(
                state,
                ctx.events,
                ctx.env.rng(),
                self.actor,
                &weapon,
                self.target,
                effectiveness,
            ));
        }

        let path = self.ranged_path(state, origin)?;
        ctx.events.push(GameEvent::RangedAttack {
            attacker: self.actor,
            path,
            target_at_end: state.is_occupied(self.target),
        });
        let result = strike(
            state,
            ctx.events,
            ctx.env.rng(),
            self.actor,
            &weapon,
            self.target,
            effectiveness,
        );

        if self.weapon == WeaponChoice::Equipped {
            if let Some(equipped) = state.actor_mut(self.actor).and_then(|a| a.weapon.as_mut()) {
                equipped.unload();
            }
        }
        Ok(result)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReloadError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("no weapon equipped")]
    NoWeapon,

    #[error("equipped weapon does not take ammunition")]
    NotRanged,

    #[error("weapon is already loaded")]
    AlreadyLoaded,
}

impl GameError for ReloadError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "RELOAD_ACTOR_NOT_FOUND",
            Self::NoWeapon => "RELOAD_NO_WEAPON",
            Self::NotRanged => "RELOAD_NOT_RANGED",
            Self::AlreadyLoaded => "RELOAD_ALREADY_LOADED",
        }
    }
}

/// Minor action: load the wielded ranged weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReloadAction {
    pub actor: EntityId,
}

impl ReloadAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for ReloadAction {
    type Error = ReloadError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, _state: &GameState, env: &GameEnv<'_>) -> u32 {
        env.config().minor_action_cost
    }

    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let actor = state
            .actor(self.actor)
            .ok_or(ReloadError::ActorNotFound(self.actor))?;
        let weapon = actor.weapon.as_ref().ok_or(ReloadError::NoWeapon)?;
        if !weapon.is_ranged() {
            return Err(ReloadError::NotRanged);
        }
        if weapon.loaded {
            return Err(ReloadError::AlreadyLoaded);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let actor = state
            .actor_mut(self.actor)
            .ok_or(ReloadError::ActorNotFound(self.actor))?;
        actor.weapon.as_mut().ok_or(ReloadError::NoWeapon)?.load();
        Ok(())
    }
}
