//! Read-only inputs to the engine: the board definition and the RNG oracle.

pub mod board;
pub mod rng;

pub use board::{Board, BoardError, ContinentDef, TerritoryDef, territory_bonus};
pub use rng::{PcgRng, RngOracle, compute_seed, shuffle};
