//! Transactional-mail HTTP transport.
//!
//! Implements the core `EmailTransport` trait by posting a JSON payload to a
//! transactional-mail provider endpoint. One request carries the full
//! recipient list as a single message.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use sendy_core::services::notify::EmailTransport;

use crate::InfraError;

/// Mailer configuration
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Provider API endpoint
    pub endpoint: String,
    /// Provider API key, sent as a bearer token
    pub api_key: String,
    /// Sender address
    pub from_address: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl MailerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        let endpoint = std::env::var("MAIL_API_ENDPOINT")
            .map_err(|_| InfraError::Config("MAIL_API_ENDPOINT not set".to_string()))?;
        let api_key = std::env::var("MAIL_API_KEY")
            .map_err(|_| InfraError::Config("MAIL_API_KEY not set".to_string()))?;
        let from_address = std::env::var("MAIL_FROM_ADDRESS")
            .map_err(|_| InfraError::Config("MAIL_FROM_ADDRESS not set".to_string()))?;

        Ok(Self {
            endpoint,
            api_key,
            from_address,
            request_timeout_secs: std::env::var("MAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        })
    }
}

#[derive(Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

/// HTTP email transport implementation
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailerConfig,
}

impl HttpMailer {
    /// Create a new mailer
    pub fn new(config: MailerConfig) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfraError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        Self::new(MailerConfig::from_env()?)
    }
}

#[async_trait]
impl EmailTransport for HttpMailer {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<(), String> {
        if recipients.is_empty() {
            return Err("No recipients provided".to_string());
        }

        let request = MailRequest {
            from: &self.config.from_address,
            to: recipients,
            subject,
            html: html_body,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Mail request failed: {}", e))?;

        let status = response.status();
        if status.is_success() {
            debug!(status = %status, recipients = recipients.len(), "Mail provider accepted message");
            Ok(())
        } else {
            let detail = response.text().await.unwrap_or_default();
            warn!(status = %status, "Mail provider rejected message");
            Err(format!("Mail provider returned {}: {}", status, detail))
        }
    }
}
