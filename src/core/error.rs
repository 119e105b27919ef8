//! Error taxonomy for the server core.
//!
//! Every failure is detected at the action gateway before any mutation
//! and surfaces as one of four stable kinds. Nothing is retried
//! automatically; re-polling is a client responsibility.

use thiserror::Error;

/// Errors surfaced by the server core.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Caller is not a participant of the match (or not authenticated).
    #[error("not authorized: {0}")]
    Authorization(String),

    /// Unknown match id or card uid.
    #[error("not found: {0}")]
    NotFound(String),

    /// Action illegal for the current state, phase, or priority, or a
    /// malformed selection.
    #[error("invalid action: {0}")]
    Validation(String),

    /// A matchmaking claim raced with another; the caller should retry.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl GameError {
    /// Authorization error with a formatted message.
    pub fn authorization(msg: impl Into<String>) -> Self {
        Self::Authorization(msg.into())
    }

    /// Not-found error with a formatted message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Validation error with a formatted message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;
