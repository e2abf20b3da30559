//! Twilio SMS Transport
//!
//! Implements the core `SmsTransport` trait over the Twilio API.
//!
//! ## Features
//!
//! - E.164 format validation via the `phonenumber` crate
//! - Retry with exponential backoff for transient provider errors
//! - Phone number masking in logs

use std::time::Duration;

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use sendy_core::services::otp::SmsTransport;
use sendy_shared::config::SmsProviderConfig;
use sendy_shared::phone::mask_phone;

use crate::InfraError;

/// Twilio transport configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum attempts for transient provider failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl TwilioConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| InfraError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| InfraError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = std::env::var("TWILIO_FROM_NUMBER")
            .map_err(|_| InfraError::Config("TWILIO_FROM_NUMBER not set".to_string()))?;

        if !from_number.starts_with('+') {
            return Err(InfraError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            max_retries: std::env::var("TWILIO_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("TWILIO_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
        })
    }

    /// Create configuration from the policy snapshot's provider credentials
    pub fn from_policy(sms: &SmsProviderConfig) -> Result<Self, InfraError> {
        if sms.account_sid.is_empty() || sms.auth_token.is_empty() {
            return Err(InfraError::Config(
                "SMS provider credentials missing from policy".to_string(),
            ));
        }
        Ok(Self {
            account_sid: sms.account_sid.clone(),
            auth_token: sms.auth_token.clone(),
            from_number: sms.from_number.clone(),
            max_retries: 3,
            retry_delay_ms: 1000,
        })
    }
}

/// Twilio SMS transport implementation
pub struct TwilioSmsTransport {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsTransport {
    /// Create a new Twilio transport
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            "Twilio SMS transport initialized with from number: {}",
            mask_phone(&config.from_number)
        );

        Self { client, config }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        Ok(Self::new(TwilioConfig::from_env()?))
    }

    /// Validate and normalize a phone number to E.164 format
    fn validate_phone_number(&self, phone: &str) -> Result<String, InfraError> {
        let candidate = if phone.starts_with('+') {
            phone.to_string()
        } else {
            format!("+{}", phone)
        };
        match candidate.parse::<PhoneNumber>() {
            Ok(parsed) => {
                let formatted = parsed.format().mode(Mode::E164).to_string();
                debug!("Validated phone number: {}", mask_phone(&formatted));
                Ok(formatted)
            }
            Err(e) => {
                error!("Invalid phone number format: {}", e);
                Err(InfraError::Sms(format!(
                    "Invalid phone number format: {}",
                    e
                )))
            }
        }
    }

    /// Send with retry for transient provider failures
    async fn send_with_retry(&self, to: &str, body: &str) -> Result<String, InfraError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_phone(to)
            );

            let msg = OutboundMessage::new(&self.config.from_number, to, body);

            match self.client.send_message(msg).await {
                Ok(response) => {
                    info!(
                        "SMS sent to {} with SID: {}",
                        mask_phone(to),
                        response.sid
                    );
                    return Ok(response.sid);
                }
                Err(e) => {
                    error!(
                        "Failed to send SMS (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );

                    if attempts >= self.config.max_retries {
                        return Err(InfraError::Sms(format!(
                            "Failed to send SMS after {} attempts: {}",
                            self.config.max_retries, e
                        )));
                    }

                    let error_msg = e.to_string();
                    if error_msg.contains("400") || error_msg.contains("invalid") {
                        // Client errors are not retryable
                        return Err(InfraError::Sms(format!("Invalid request: {}", e)));
                    }
                    if error_msg.contains("429") || error_msg.contains("rate") {
                        warn!("Rate limit detected, backing off for {:?}", delay);
                    }

                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

#[async_trait]
impl SmsTransport for TwilioSmsTransport {
    async fn send(&self, phone: &str, body: &str) -> Result<String, String> {
        let normalized = self
            .validate_phone_number(phone)
            .map_err(|e| e.to_string())?;

        // Twilio rejects bodies over 1600 characters
        if body.len() > 1600 {
            return Err("Message exceeds maximum length of 1600 characters".to_string());
        }

        self.send_with_retry(&normalized, body)
            .await
            .map_err(|e| e.to_string())
    }
}
