//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
///
/// Each variant maps to exactly one wire-level error code (see
/// [`DomainError::code`]), so callers can surface a distinct, user-facing
/// failure reason per condition.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A required input is missing or malformed, or a submitted code did
    /// not match
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The channel is administratively disabled
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    /// The requested record does not exist
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// The code was already consumed by a successful verification
    #[error("Code already used")]
    AlreadyVerified,

    /// The code's expiry timestamp has passed
    #[error("Code expired")]
    Expired,

    /// The attempt budget for the current code is spent
    #[error("Too many attempts")]
    AttemptsExhausted,

    /// A resend was requested before the cooldown elapsed
    #[error("Wait {retry_after_seconds} seconds before requesting a new code")]
    CooldownActive { retry_after_seconds: i64 },

    /// Unexpected transport or store failure, wrapping the underlying cause
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Wire-level error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidArgument { .. } => "invalid-argument",
            DomainError::Unavailable { .. } => "unavailable",
            DomainError::NotFound { .. } => "not-found",
            DomainError::AlreadyVerified => "already-exists",
            DomainError::Expired => "deadline-exceeded",
            DomainError::AttemptsExhausted | DomainError::CooldownActive { .. } => {
                "resource-exhausted"
            }
            DomainError::Internal { .. } => "internal",
        }
    }

    /// Wrap an unclassified failure, preserving the original message for
    /// diagnostics. Errors that already carry a recognized kind must be
    /// propagated with `?` instead of passing through here.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        DomainError::Internal {
            message: cause.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
