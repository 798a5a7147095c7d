//! Error codes for the Memory Matcher API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Card position outside the deck
    InvalidPosition,
    /// Empty or oversized player name
    InvalidPlayerName,
    /// Malformed email address
    InvalidEmail,
    /// Attempt count outside the accepted range
    InvalidAttempts,
    /// Session id is not a UUID
    InvalidSessionId,
    /// General validation error
    ValidationError,
    /// Malformed request body
    BadRequest,

    // Session state machine
    /// Score submitted before the session was complete
    SessionIncomplete,
    /// Command not allowed in the current session state
    InvalidTransition,

    // Resource Not Found
    SessionNotFound,
    PlayerNotFound,
    NotFound,

    // System Errors
    DbError,
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPosition => "INVALID_POSITION",
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidAttempts => "INVALID_ATTEMPTS",
            Self::InvalidSessionId => "INVALID_SESSION_ID",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::SessionIncomplete => "SESSION_INCOMPLETE",
            Self::InvalidTransition => "INVALID_TRANSITION",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
