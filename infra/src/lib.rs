//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborator traits defined in
//! `sendy_core`:
//! - **SMS**: Twilio transport for verification codes
//! - **Push**: FCM HTTP transport for order notifications
//! - **Email**: transactional-mail HTTP transport for admin alerts
//! - **Store**: in-memory record store for development and testing
//! - **Config**: environment-backed policy source
//!
//! ## Features
//!
//! - `twilio-sms`: Enable the Twilio SMS transport (default)

use thiserror::Error;

pub mod config_source;
pub mod email;
pub mod push;
/// SMS transport module - external SMS providers
pub mod sms;
pub mod store;

/// Infrastructure-level errors, converted to strings or
/// `DomainError::Internal` at the trait boundary
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("SMS transport error: {0}")]
    Sms(String),

    #[error("Push transport error: {0}")]
    Push(String),

    #[error("Email transport error: {0}")]
    Email(String),
}
