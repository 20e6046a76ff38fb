//! Event reducer.
//!
//! The [`Reducer`] is the only writer of [`GameState`]. Each
//! [`commit`](Reducer::commit) appends one event to the log, routes it through
//! its handler's pre_validate → apply → post_validate pipeline and, when the
//! handler synthesizes a derived record, commits that record right behind it.
//! A rejected event is taken off the log again and the state is restored to
//! what it was before the commit, so the log only ever holds events whose
//! effect is in the state.

mod errors;
mod handlers;
mod replay;
mod transition;

pub use errors::{CommitError, ReduceError, TransitionPhase, TransitionPhaseError};
pub use replay::replay;
pub use transition::{EventTransition, TransitionContext};

use crate::config::GameConfig;
use crate::env::{PcgRng, RngOracle};
use crate::event::{Event, RecordDrewCard, RecordShuffledCards};
use crate::state::{CardId, EventIndex, GameState, PlayerId};

/// How many derived events may be chained behind one committed event.
pub const MAX_DERIVED_DEPTH: usize = 1;

/// Applies events to a [`GameState`], one at a time.
///
/// Strictly sequential: an event, including anything it derives, is fully
/// processed before `commit` returns. Observers read the state between calls.
pub struct Reducer<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> Reducer<'a> {
    /// Creates a reducer using the default [`PcgRng`].
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self::with_rng(state, config, &PcgRng)
    }

    pub fn with_rng(
        state: &'a mut GameState,
        config: &'a GameConfig,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self { state, config, rng }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    /// Appends `event` to the log and applies it.
    ///
    /// Returns the index the event occupies. Not idempotent: committing the
    /// same event twice appends and applies it twice.
    ///
    /// All or nothing: if the event or anything it derives is rejected, the
    /// log and the state are both left as they were before the call.
    pub fn commit(&mut self, event: impl Into<Event>) -> Result<EventIndex, CommitError> {
        let start = self.state.log.next_index();
        let snapshot = self.state.detached_clone();

        self.commit_at_depth(event.into(), 0).inspect_err(|_| {
            self.state.log.rollback_to(start);
            self.state.restore_detached(snapshot);
        })
    }

    fn commit_at_depth(&mut self, event: Event, depth: usize) -> Result<EventIndex, CommitError> {
        let kind = event.kind();
        let index = self.state.log.next_index();

        if depth > MAX_DERIVED_DEPTH {
            return Err(CommitError::DerivedChainTooDeep { index, kind, depth });
        }

        self.state.log.append(event.clone());

        let ctx = TransitionContext {
            index,
            config: self.config,
            rng: self.rng,
        };

        let derived = match transition::execute_transition(&event, self.state, &ctx) {
            Ok(derived) => derived,
            Err(source) => {
                tracing::error!(
                    %index,
                    %kind,
                    phase = source.phase.as_str(),
                    error = %source.error,
                    "event rejected"
                );
                return Err(CommitError::Rejected {
                    index,
                    kind,
                    source,
                });
            }
        };

        tracing::debug!(%index, %kind, depth, "event committed");

        if let Some(derived) = derived {
            tracing::trace!(parent = %index, derived = %derived.kind(), "committing derived event");
            self.commit_at_depth(derived, depth + 1)?;
        }

        Ok(index)
    }

    /// Draws the top card of the deck into `player`'s hand.
    ///
    /// An exhausted deck is first rebuilt from the discard pile through a
    /// [`RecordShuffledCards`]. Returns `None` when both are empty.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<Option<CardId>, CommitError> {
        if self.state.deck.is_empty() {
            if self.state.discard.is_empty() {
                tracing::debug!(%player, "no card left to draw");
                return Ok(None);
            }
            self.commit(RecordShuffledCards)?;
        }

        let Some(card) = self.state.deck.pop() else {
            return Ok(None);
        };

        match self.commit(RecordDrewCard { player, card }) {
            Ok(_) => Ok(Some(card)),
            Err(err) => {
                self.state.deck.push(card);
                Err(err)
            }
        }
    }

    /// Removes `card` from the deck the way [`Reducer::draw_card`] does before
    /// recording the draw. Returns `false` when the deck does not hold it.
    fn take_from_deck(&mut self, card: CardId) -> bool {
        match self.state.deck.iter().rposition(|&c| c == card) {
            Some(position) => {
                self.state.deck.remove(position);
                true
            }
            None => false,
        }
    }
}
