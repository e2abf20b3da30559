//! OTP verification engine for SMS-based phone verification
//!
//! This module provides the complete one-time-code workflow:
//! - Code generation and SMS dispatch
//! - Verification with expiry and attempt tracking
//! - Resend cooldown enforcement
//! - Best-effort delivery logging for every outcome

mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use service::OtpService;
pub use traits::SmsTransport;
pub use types::{IssueOutcome, VerifyOutcome};
