//! Deterministic rules engine for a turn-based territorial conquest game.
//!
//! `conquest-core` owns the authoritative [`GameState`] and the event taxonomy
//! that drives it. Players issue [`Move`]s, the engine derives [`Record`]s,
//! and both land in a single append-only [`EventLog`] where later entries
//! refer back to earlier ones by index. All state mutation flows through
//! [`engine::Reducer`]; move legality, dice and transport live with callers.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod state;

pub use config::GameConfig;
pub use engine::{
    CommitError, EventTransition, ReduceError, Reducer, TransitionContext, TransitionPhase,
    TransitionPhaseError, replay,
};
pub use env::{Board, BoardError, ContinentDef, PcgRng, RngOracle, TerritoryDef};
pub use error::{ErrorSeverity, GameError};
#[cfg(feature = "serde")]
pub use event::compute_log_root;
pub use event::{CausalityViolation, Event, EventKind, EventLog, Move, Record};
pub use state::{
    Card, CardId, ContinentId, EventIndex, GameState, InitializationError, InvariantViolation,
    PlayerId, PlayerState, TerritoryId, TerritoryState, check_invariants,
};
