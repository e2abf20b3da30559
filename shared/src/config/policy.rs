//! Policy and provider configuration

use serde::{Deserialize, Serialize};

/// Tunable policy for the OTP verification engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpPolicy {
    /// Number of digits in a generated code
    pub code_length: u32,

    /// Minutes before an issued code expires
    pub expiry_minutes: i64,

    /// Maximum verification attempts per issued code
    pub max_attempts: i32,

    /// Minimum seconds between code issuances for the same identifier
    pub resend_cooldown_seconds: i64,

    /// Whether the SMS channel is enabled at all
    pub enabled: bool,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            code_length: 6,
            expiry_minutes: 5,
            max_attempts: 3,
            resend_cooldown_seconds: 60,
            enabled: true,
        }
    }
}

/// Credentials for the outbound SMS provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct SmsProviderConfig {
    /// Provider account identifier
    pub account_sid: String,

    /// Provider auth token
    pub auth_token: String,

    /// Sender phone number (E.164)
    pub from_number: String,
}

/// Admin alerting configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdminConfig {
    /// Distribution list for moderation alert emails
    pub recipients: Vec<String>,

    /// Sender address for alert emails
    pub from_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            recipients: Vec::new(),
            from_address: String::from("alerts@sendy.app"),
        }
    }
}

/// Complete policy snapshot served by the config provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// OTP engine policy
    pub otp: OtpPolicy,

    /// SMS provider credentials
    pub sms: SmsProviderConfig,

    /// Admin alerting configuration
    pub admin: AdminConfig,
}
