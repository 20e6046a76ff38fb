//! Event transition dispatch and execution logic.

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::event::{Event, Move, Record};
use crate::state::{EventIndex, GameState};

use super::errors::{ReduceError, TransitionPhase, TransitionPhaseError};

/// Read-only facts a handler may consult while applying an event.
#[derive(Clone, Copy)]
pub struct TransitionContext<'a> {
    /// Index the event occupies in the log. It is already appended when the
    /// handler runs.
    pub index: EventIndex,
    pub config: &'a GameConfig,
    pub rng: &'a dyn RngOracle,
}

/// Defines how one event variant mutates game state.
///
/// Implementors override the validation hooks to surface the pre- and
/// post-conditions that must hold around the mutation. `pre_validate` should
/// catch every failure `apply` could hit; the reducer still restores the
/// pre-commit state whenever a later phase fails.
pub trait EventTransition {
    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(
        &self,
        _state: &GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        Ok(())
    }

    /// Applies the event by mutating the game state directly. Returns the
    /// derived event the reducer must commit right after this one, if any.
    fn apply(
        &self,
        state: &mut GameState,
        ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(
        &self,
        _state: &GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        Ok(())
    }
}

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and return the derived event
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    ctx: &TransitionContext<'_>,
) -> Result<Option<Event>, TransitionPhaseError<ReduceError>>
where
    T: EventTransition,
{
    transition
        .pre_validate(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let derived = transition
        .apply(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(derived)
}

/// Routes an event to its handler.
///
/// The match is exhaustive: a new variant without a handler does not compile.
pub(super) fn execute_transition(
    event: &Event,
    state: &mut GameState,
    ctx: &TransitionContext<'_>,
) -> Result<Option<Event>, TransitionPhaseError<ReduceError>> {
    match event {
        Event::Move(m) => match m {
            Move::Attack(t) => drive_transition(t, state, ctx),
            Move::ClaimTerritory(t) => drive_transition(t, state, ctx),
            Move::Defend(t) => drive_transition(t, state, ctx),
            Move::DistributeTroops(t) => drive_transition(t, state, ctx),
            Move::Fortify(t) => drive_transition(t, state, ctx),
            Move::PlaceInitialTroop(t) => drive_transition(t, state, ctx),
            Move::RedeemCards(t) => drive_transition(t, state, ctx),
            Move::TroopsAfterAttack(t) => drive_transition(t, state, ctx),
        },
        Event::Record(r) => match r {
            Record::Attack(t) => drive_transition(t, state, ctx),
            Record::Banned(t) => drive_transition(t, state, ctx),
            Record::Cancelled(t) => drive_transition(t, state, ctx),
            Record::DrewCard(t) => drive_transition(t, state, ctx),
            Record::PlayerEliminated(t) => drive_transition(t, state, ctx),
            Record::RedeemedCards(t) => drive_transition(t, state, ctx),
            Record::ShuffledCards(t) => drive_transition(t, state, ctx),
            Record::StartGame(t) => drive_transition(t, state, ctx),
            Record::StartTurn(t) => drive_transition(t, state, ctx),
            Record::TerritoryConquered(t) => drive_transition(t, state, ctx),
            Record::Winner(t) => drive_transition(t, state, ctx),
        },
    }
}
