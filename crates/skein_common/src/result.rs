//! Common result and error types for the skein translation core.

/// The standard result type for fallible internal operations.
///
/// `Ok` contains the result value (which may be partial or degraded after
/// error recovery). `Err` indicates an unrecoverable internal error (a bug
/// in skein), not a user-facing problem. User-facing findings are reported
/// through [`DiagnosticSink`](../../skein_diagnostics) or the per-component
/// error enums, and the operation still returns `Ok` where recovery makes
/// sense.
pub type SkeinResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in skein, not a user input problem.
///
/// These errors should never occur during normal operation. If one does
/// occur, it means there is a logic error in the translator that should be
/// fixed.
#[derive(Debug, thiserror::Error)]
#[error("internal translator error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
