//! Data-driven board and rule definitions.
//!
//! This crate ships static content for `conquest-core` and the loaders that
//! read it:
//! - Board layouts: territories, continents, adjacency, cards (RON)
//! - Rule configuration: `GameConfig` (TOML)
//!
//! Content seeds [`GameState::setup`](conquest_core::GameState::setup) and the
//! start-of-turn bonus computation; it never appears in the event log.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{BoardLoader, ConfigLoader, LoadResult, classic_board};
