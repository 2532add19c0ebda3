//! Engine error taxonomy.
//!
//! Three classes, with different meanings for the driver:
//!
//! - `IllegalAction`: the action does not fit the current phase, step or
//!   priority. Recoverable: re-enumerate and pick again. The caller's
//!   state is untouched.
//! - `InsufficientResources`: a cost exceeded floating plus pitch. The
//!   enumerator pre-filters these, so seeing one from `apply_action`
//!   means the driver bypassed enumeration.
//! - `InvariantViolation`: a state invariant would have broken. Always a
//!   bug in the engine or its inputs; never absorb it.
//!
//! All three are returned before the caller-visible state changes.

use thiserror::Error;

/// Errors from the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The action is not legal in the current state.
    #[error("illegal action: {reason}")]
    IllegalAction { reason: String },

    /// A cost could not be paid from floating resources plus pitch.
    #[error("insufficient resources: need {needed}, have {available}")]
    InsufficientResources { needed: i64, available: i64 },

    /// A state invariant would break; fatal.
    #[error("invariant violation: {detail}")]
    InvariantViolation { detail: String },
}

impl EngineError {
    /// Build an `IllegalAction`.
    #[must_use]
    pub fn illegal(reason: impl Into<String>) -> Self {
        Self::IllegalAction { reason: reason.into() }
    }

    /// Build an `InvariantViolation`.
    #[must_use]
    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::InvariantViolation { detail: detail.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::illegal("only PASS is legal during the layer step");
        assert_eq!(err.to_string(), "illegal action: only PASS is legal during the layer step");

        let err = EngineError::InsufficientResources { needed: 3, available: 1 };
        assert_eq!(err.to_string(), "insufficient resources: need 3, have 1");
    }
}
