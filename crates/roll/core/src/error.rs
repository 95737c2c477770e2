//! Common error infrastructure for roll-core.
//!
//! The resolution engine itself never fails: malformed input degrades into
//! notes on the [`CombatRollResult`](crate::CombatRollResult). Typed errors only
//! exist at the boundaries, where raw caller data is parsed or validated:
//!
//! - [`FaceParseError`](crate::face::FaceParseError) for die-face tokens
//! - [`ConfigError`](crate::config::ConfigError) for engine configuration
//!
//! Both implement [`RollError`] so callers can classify them uniformly.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the engine already degraded gracefully (e.g. a face token
///   was dropped and recorded as a note)
/// - **Validation**: invalid input that should be rejected without retry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Input was skipped; the computation continued without it.
    Recoverable,

    /// Invalid input, should not retry without changes.
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all roll-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait RollError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization and testing. The default
    /// implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
