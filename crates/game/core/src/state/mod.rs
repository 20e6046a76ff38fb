//! Authoritative game state representation.
//!
//! [`GameState`] owns every territory, player, the card registry, deck and
//! discard pile, turn order, the redemption counter and the event log. It is
//! created once by [`GameState::setup`] and afterwards mutated exclusively
//! through the [`Reducer`](crate::engine::Reducer); observers read it between
//! commits.
pub mod invariants;
pub mod types;

use std::collections::BTreeMap;

pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use types::{
    Card, CardId, ContinentId, EventIndex, PlayerId, PlayerState, TerritoryId, TerritoryState,
};

use crate::config::GameConfig;
use crate::env::rng::{self, RngOracle, compute_seed};
use crate::env::{Board, BoardError};
use crate::error::{ErrorSeverity, GameError};
use crate::event::EventLog;

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic shuffles.
    ///
    /// Set once at game initialization and never modified. Combined with the
    /// log index of a shuffle record to derive that shuffle's seed.
    pub game_seed: u64,

    pub territories: BTreeMap<TerritoryId, TerritoryState>,
    pub players: BTreeMap<PlayerId, PlayerState>,

    /// Registry of the fixed card set.
    pub cards: BTreeMap<CardId, Card>,

    /// Undrawn cards; the top of the deck is the last element.
    pub deck: Vec<CardId>,
    pub discard: Vec<CardId>,

    /// Fixed by the start-game record.
    pub turn_order: Vec<PlayerId>,

    /// Number of card sets ever redeemed, driving the escalating set bonus.
    pub card_sets_redeemed: u32,

    pub(crate) log: EventLog,
}

/// Reasons a game cannot be set up.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("{count} players cannot play (allowed {min}..={max})")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("player {0} is seated twice")]
    DuplicatePlayer(PlayerId),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerCount { .. } => "INIT_PLAYER_COUNT",
            Self::DuplicatePlayer(_) => "INIT_DUPLICATE_PLAYER",
            Self::Board(inner) => inner.error_code(),
        }
    }
}

impl GameState {
    /// Creates an empty state with no board, players or cards.
    pub fn empty(game_seed: u64) -> Self {
        Self {
            game_seed,
            territories: BTreeMap::new(),
            players: BTreeMap::new(),
            cards: BTreeMap::new(),
            deck: Vec::new(),
            discard: Vec::new(),
            turn_order: Vec::new(),
            card_sets_redeemed: 0,
            log: EventLog::new(),
        }
    }

    /// Sets up a fresh game on `board` for `players`.
    ///
    /// Every territory starts unoccupied, every player starts alive with the
    /// configured initial reserve, and the whole card set is in the deck in an
    /// order derived from `game_seed`.
    pub fn setup(
        board: &Board,
        players: &[PlayerId],
        config: &GameConfig,
        game_seed: u64,
        rng: &dyn RngOracle,
    ) -> Result<Self, InitializationError> {
        board.validate()?;

        let initial_troops =
            config
                .initial_troops_for(players.len())
                .ok_or(InitializationError::PlayerCount {
                    count: players.len(),
                    min: GameConfig::MIN_PLAYERS,
                    max: GameConfig::MAX_PLAYERS,
                })?;

        let mut state = Self::empty(game_seed);

        for &id in players {
            if state
                .players
                .insert(id, PlayerState::new(id, initial_troops))
                .is_some()
            {
                return Err(InitializationError::DuplicatePlayer(id));
            }
        }

        state.territories = board
            .territories
            .iter()
            .map(|def| (def.id, TerritoryState::new(def.id)))
            .collect();
        state.cards = board.cards.iter().map(|card| (card.id, *card)).collect();

        state.deck = state.cards.keys().copied().collect();
        rng::shuffle(
            &mut state.deck,
            rng,
            compute_seed(game_seed, 0, rng::context::SETUP_DECK),
        );

        tracing::debug!(
            players = players.len(),
            territories = state.territories.len(),
            cards = state.deck.len(),
            game_seed,
            "game state set up"
        );

        Ok(state)
    }

    /// Copy of everything except the log, taken before a commit so a
    /// rejected commit can be undone.
    pub(crate) fn detached_clone(&self) -> Self {
        Self {
            game_seed: self.game_seed,
            territories: self.territories.clone(),
            players: self.players.clone(),
            cards: self.cards.clone(),
            deck: self.deck.clone(),
            discard: self.discard.clone(),
            turn_order: self.turn_order.clone(),
            card_sets_redeemed: self.card_sets_redeemed,
            log: EventLog::new(),
        }
    }

    /// Restores a [`detached_clone`](Self::detached_clone), keeping the
    /// current log.
    pub(crate) fn restore_detached(&mut self, snapshot: Self) {
        let log = std::mem::take(&mut self.log);
        *self = snapshot;
        self.log = log;
    }

    /// Read-only view of the event log.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn territory(&self, id: TerritoryId) -> Option<&TerritoryState> {
        self.territories.get(&id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Territories currently occupied by `player`.
    pub fn territories_of(&self, player: PlayerId) -> impl Iterator<Item = &TerritoryState> + '_ {
        self.territories
            .values()
            .filter(move |territory| territory.is_occupied_by(player))
    }
}
