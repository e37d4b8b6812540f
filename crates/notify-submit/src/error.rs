//! Error types for the submission pipeline.

use notify_model::UnknownConfigKind;
use thiserror::Error;

/// Programming errors at the submission boundary.
///
/// These indicate a caller bug and should never occur in a correct
/// integration; user-recoverable failures are surfaced as
/// [`crate::SubmissionOutcome`] data instead.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// A wire kind string did not resolve to a known configuration kind.
    #[error(transparent)]
    UnknownKind(#[from] UnknownConfigKind),

    /// A payload build or destructive action was attempted before its
    /// precondition held.
    #[error("precondition violated: {reason}")]
    PreconditionViolated {
        /// Why the precondition did not hold.
        reason: String,
    },

    /// A submission was requested while another one is in flight; the
    /// request is rejected, not queued.
    #[error("a submission is already in flight")]
    InFlight,
}

impl SubmitError {
    /// Creates a precondition violation with the given reason.
    #[must_use]
    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::PreconditionViolated {
            reason: reason.into(),
        }
    }
}

/// Result type for submission operations.
pub type Result<T> = std::result::Result<T, SubmitError>;
