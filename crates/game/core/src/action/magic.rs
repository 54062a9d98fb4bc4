use crate::action::{ActionContext, ActionTransition};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Position;
use crate::magic::{Spell, SpellTargeting, apply_spell};
use crate::rules::filter_targetable_points;
use crate::state::{ActorState, EntityId, GameState};
use crate::trace::LineTracer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastSpellError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("needs {needed} mana, has {available}")]
    InsufficientMana { needed: i32, available: i32 },

    #[error("spell needs a target")]
    MissingTarget,

    #[error("{target:?} is not a legal target")]
    NotTargetable { target: Position },

    #[error("no clear line to {target:?}")]
    NoClearPath { target: Position },
}

impl GameError for CastSpellError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) => ErrorSeverity::Internal,
            Self::InsufficientMana { .. } | Self::MissingTarget => ErrorSeverity::Validation,
            Self::NotTargetable { .. } | Self::NoClearPath { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "CAST_ACTOR_NOT_FOUND",
            Self::InsufficientMana { .. } => "CAST_INSUFFICIENT_MANA",
            Self::MissingTarget => "CAST_MISSING_TARGET",
            Self::NotTargetable { .. } => "CAST_NOT_TARGETABLE",
            Self::NoClearPath { .. } => "CAST_NO_CLEAR_PATH",
        }
    }
}

/// Checks the target and returns the cells the spell will travel through.
pub(crate) fn spell_path(
    state: &GameState,
    ctx: &mut ActionContext<'_>,
    caster: &ActorState,
    spell: Spell,
    target: Option<Position>,
) -> Result<Vec<Position>, CastSpellError> {
    if spell.targeting() == SpellTargeting::Caster {
        return Ok(Vec::new());
    }
    let target = target.ok_or(CastSpellError::MissingTarget)?;
    let legal = filter_targetable_points(
        state.map(),
        ctx.vision,
        spell.targetable_points(caster.position),
        caster.position,
        caster.vision,
        true,
    )
    .contains(&target);
    if !legal {
        return Err(CastSpellError::NotTargetable { target });
    }

    let tracer = LineTracer::new(state.map());
    spell
        .path(
            &tracer,
            caster.position,
            Some(target),
            ctx.env.config().bounce_length,
        )
        .ok_or(CastSpellError::NoClearPath { target })
}

/// Cast a spell from the actor's own mana.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastSpellAction {
    pub actor: EntityId,
    pub spell: Spell,
    pub target: Option<Position>,
}

impl CastSpellAction {
    pub fn new(actor: EntityId, spell: Spell, target: Option<Position>) -> Self {
        Self {
            actor,
            spell,
            target,
        }
    }
}

impl ActionTransition for CastSpellAction {
    type Error = CastSpellError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, _state: &GameState, env: &GameEnv<'_>) -> u32 {
        env.config().action_cost
    }

    fn pre_validate(
        &self,
        state: &GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let caster = state
            .actor(self.actor)
            .ok_or(CastSpellError::ActorNotFound(self.actor))?;
        let needed = self.spell.mana_cost();
        if caster.mp.current < needed {
            return Err(CastSpellError::InsufficientMana {
                needed,
                available: caster.mp.current,
            });
        }
        spell_path(state, ctx, caster, self.spell, self.target)?;
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let caster = state
            .actor(self.actor)
            .ok_or(CastSpellError::ActorNotFound(self.actor))?;
        let path = spell_path(state, ctx, caster, self.spell, self.target)?;

        if let Some(caster) = state.actor_mut(self.actor) {
            caster.mp.deplete(self.spell.mana_cost());
        }
        apply_spell(
            state,
            ctx.events,
            ctx.env.rng(),
            self.actor,
            self.spell,
            &path,
        );
        Ok(())
    }
}
