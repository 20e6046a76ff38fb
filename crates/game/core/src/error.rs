//! Common error infrastructure for conquest-core.
//!
//! Domain-specific errors (`CausalityViolation`, `ReduceError`, ...) live next
//! to the code that raises them; this module only provides the shared
//! classification.

/// Severity level of an error, used for categorization and logging priority.
///
/// The reducer trusts its caller to validate moves, so nothing it raises is
/// retryable:
/// - **Validation**: malformed input that slipped past the move validator
/// - **Internal**: state inconsistency that indicates a bug in the engine
/// - **Fatal**: a game invariant would break; the event must be rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all conquest-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by what the caller did wrong, not by impact
/// - Error codes are stable identifiers for tests and log filtering
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
