//! Error kinds surfaced by the quiz client. Every message is display-ready.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QuizError {
    /// Caller input rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// Backend answered with `successful: false`.
    #[error("{0}")]
    Backend(String),
    /// Network failure, timeout, or an HTTP error without an envelope.
    #[error("{0}")]
    Transport(String),
    /// A 2xx response that does not match the expected schema.
    #[error("Unexpected response from the quiz service: {0}")]
    Protocol(String),
    /// Operation not allowed in the controller's current state.
    #[error("Cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },
}

impl QuizError {
    /// True for errors raised before any network round-trip.
    pub fn is_local(&self) -> bool {
        matches!(self, QuizError::Validation(_) | QuizError::InvalidState { .. })
    }
}
