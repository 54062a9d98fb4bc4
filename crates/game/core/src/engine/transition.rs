//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionContext, ActionResult, ActionTransition};
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action to its transition and wraps the outcome.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Move(t) => drive_transition(t, state, ctx)
            .map(ActionResult::Move)
            .map_err(ExecuteError::Move),
        Action::Attack(t) => drive_transition(t, state, ctx)
            .map(ActionResult::Attack)
            .map_err(ExecuteError::Attack),
        Action::Wait(t) => drive_transition(t, state, ctx)
            .map(|()| ActionResult::Wait)
            .map_err(ExecuteError::Wait),
        Action::Reload(t) => drive_transition(t, state, ctx)
            .map(|()| ActionResult::Reload)
            .map_err(ExecuteError::Reload),
        Action::CastSpell(t) => drive_transition(t, state, ctx)
            .map(|()| ActionResult::CastSpell)
            .map_err(ExecuteError::CastSpell),
        Action::UseItem(t) => drive_transition(t, state, ctx)
            .map(|()| ActionResult::UseItem)
            .map_err(ExecuteError::UseItem),
        Action::PickUp(t) => drive_transition(t, state, ctx)
            .map(|()| ActionResult::PickUp)
            .map_err(ExecuteError::PickUp),
        Action::Drop(t) => drive_transition(t, state, ctx)
            .map(|()| ActionResult::Drop)
            .map_err(ExecuteError::Drop),
        Action::Equip(t) => drive_transition(t, state, ctx)
            .map(|()| ActionResult::Equip)
            .map_err(ExecuteError::Equip),
        Action::SwapWeapons(t) => drive_transition(t, state, ctx)
            .map(|()| ActionResult::SwapWeapons)
            .map_err(ExecuteError::SwapWeapons),
        Action::Operate(t) => drive_transition(t, state, ctx)
            .map(|()| ActionResult::Operate)
            .map_err(ExecuteError::Operate),
        Action::Stairs(t) => drive_transition(t, state, ctx)
            .map(ActionResult::Stairs)
            .map_err(ExecuteError::Stairs),
    }
}
