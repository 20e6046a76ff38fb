//! Rebuilding a state from a recorded log.

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::event::{Event, Record};
use crate::state::GameState;

use super::{CommitError, Reducer};

/// Re-commits `events` onto `initial` and returns the resulting state.
///
/// Synthesized entries are skipped; their handlers regenerate them at the
/// same indices. Recorded draws take their card off the deck first, mirroring
/// [`Reducer::draw_card`]. Given the same initial state, config and RNG, the
/// replayed log equals `events`.
pub fn replay(
    initial: GameState,
    events: &[Event],
    config: &GameConfig,
    rng: &dyn RngOracle,
) -> Result<GameState, CommitError> {
    let mut state = initial;
    let mut reducer = Reducer::with_rng(&mut state, config, rng);

    for event in events.iter().filter(|event| !event.is_synthesized()) {
        if let Event::Record(Record::DrewCard(draw)) = event
            && !reducer.take_from_deck(draw.card)
        {
            tracing::warn!(
                index = %reducer.state().log().next_index(),
                card = %draw.card,
                "drawn card missing from deck"
            );
        }
        reducer.commit(event.clone())?;
    }

    tracing::debug!(events = events.len(), "log replayed");
    Ok(state)
}
