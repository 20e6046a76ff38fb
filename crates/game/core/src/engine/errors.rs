//! Error types for the reducer pipeline.

use crate::error::{ErrorSeverity, GameError};
use crate::event::{CausalityViolation, EventKind};
use crate::state::{CardId, EventIndex, PlayerId, TerritoryId};

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

/// A broken precondition found while applying a single event.
///
/// Every variant is a contract breach by the layer that built the event; none
/// can be retried.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReduceError {
    #[error(transparent)]
    Causality(#[from] CausalityViolation),

    #[error("cannot shuffle: deck still holds {remaining} cards")]
    DeckNotEmpty { remaining: usize },

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("unknown territory {0}")]
    UnknownTerritory(TerritoryId),

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("player {player} does not hold card {card}")]
    CardNotHeld { player: PlayerId, card: CardId },

    #[error("card {card} is listed more than once")]
    DuplicateCard { card: CardId },

    #[error("territory {territory} holds {available} troops, {requested} requested")]
    InsufficientTroops {
        territory: TerritoryId,
        available: u32,
        requested: u32,
    },

    #[error("player {player} has {available} troops in reserve, {requested} requested")]
    InsufficientReserve {
        player: PlayerId,
        available: u32,
        requested: u64,
    },

    #[error("troop count on territory {0} would overflow")]
    TroopOverflow(TerritoryId),
}

impl GameError for ReduceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownPlayer(_) | Self::UnknownTerritory(_) | Self::UnknownCard(_) => {
                ErrorSeverity::Internal
            }
            Self::Causality(inner) => inner.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Causality(inner) => inner.error_code(),
            Self::DeckNotEmpty { .. } => "REDUCE_DECK_NOT_EMPTY",
            Self::UnknownPlayer(_) => "REDUCE_UNKNOWN_PLAYER",
            Self::UnknownTerritory(_) => "REDUCE_UNKNOWN_TERRITORY",
            Self::UnknownCard(_) => "REDUCE_UNKNOWN_CARD",
            Self::CardNotHeld { .. } => "REDUCE_CARD_NOT_HELD",
            Self::DuplicateCard { .. } => "REDUCE_DUPLICATE_CARD",
            Self::InsufficientTroops { .. } => "REDUCE_INSUFFICIENT_TROOPS",
            Self::InsufficientReserve { .. } => "REDUCE_INSUFFICIENT_RESERVE",
            Self::TroopOverflow(_) => "REDUCE_TROOP_OVERFLOW",
        }
    }
}

/// Errors surfaced by [`Reducer::commit`](super::Reducer::commit).
///
/// A rejected event is removed from the log again; no entry is left behind
/// for it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("{kind} at {index} rejected: {source}")]
    Rejected {
        index: EventIndex,
        kind: EventKind,
        #[source]
        source: TransitionPhaseError<ReduceError>,
    },

    #[error("derived chain too deep: {kind} at {index} reached depth {depth}")]
    DerivedChainTooDeep {
        index: EventIndex,
        kind: EventKind,
        depth: usize,
    },
}

impl CommitError {
    /// The handler error behind a rejection.
    pub fn reduce_error(&self) -> Option<&ReduceError> {
        match self {
            Self::Rejected { source, .. } => Some(&source.error),
            Self::DerivedChainTooDeep { .. } => None,
        }
    }

    /// Index the offending event would have occupied.
    pub fn index(&self) -> EventIndex {
        match self {
            Self::Rejected { index, .. } | Self::DerivedChainTooDeep { index, .. } => *index,
        }
    }
}

impl GameError for CommitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected { source, .. } => source.error.severity(),
            Self::DerivedChainTooDeep { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected { source, .. } => source.error.error_code(),
            Self::DerivedChainTooDeep { .. } => "COMMIT_DERIVED_CHAIN_TOO_DEEP",
        }
    }
}
