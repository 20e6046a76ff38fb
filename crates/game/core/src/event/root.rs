//! Event log root computation.
//!
//! Two games started from the same state and seed must produce byte-identical
//! logs; comparing roots is the cheap way to check that after a replay.

use super::{Event, EventLog};

/// Computes a SHA-256 commitment to a sequence of events.
///
/// - Uses bincode for deterministic serialization
/// - Order matters: the hash is computed sequentially over entries
///
/// Requires the `serde` feature.
pub fn compute_log_root(events: &[Event]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();

    for event in events {
        // Every event type is plain data, so encoding cannot fail
        if let Ok(bytes) = bincode::serialize(event) {
            hasher.update(&bytes);
        }
    }

    hasher.finalize().into()
}

impl EventLog {
    /// Root over every entry currently in the log.
    pub fn root(&self) -> [u8; 32] {
        compute_log_root(self.entries())
    }
}
