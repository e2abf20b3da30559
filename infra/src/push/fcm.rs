//! FCM push transport.
//!
//! Implements the core `PushTransport` trait over the FCM HTTP API with a
//! `reqwest` client. One call delivers one notification to one device token;
//! callers treat failures as non-fatal.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use sendy_core::services::notify::{PushMessage, PushTransport};

use crate::InfraError;

const DEFAULT_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// FCM transport configuration
#[derive(Debug, Clone)]
pub struct FcmConfig {
    /// FCM server key
    pub server_key: String,
    /// API endpoint; overridable for testing
    pub endpoint: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl FcmConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        let server_key = std::env::var("FCM_SERVER_KEY")
            .map_err(|_| InfraError::Config("FCM_SERVER_KEY not set".to_string()))?;

        Ok(Self {
            server_key,
            endpoint: std::env::var("FCM_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            request_timeout_secs: std::env::var("FCM_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}

#[derive(Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct FcmRequest<'a> {
    to: &'a str,
    notification: FcmNotification<'a>,
    data: &'a std::collections::HashMap<String, String>,
}

/// FCM push transport implementation
pub struct FcmPushTransport {
    client: reqwest::Client,
    config: FcmConfig,
}

impl FcmPushTransport {
    /// Create a new FCM transport
    pub fn new(config: FcmConfig) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfraError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        Self::new(FcmConfig::from_env()?)
    }
}

#[async_trait]
impl PushTransport for FcmPushTransport {
    async fn send(&self, token: &str, message: &PushMessage) -> Result<(), String> {
        let request = FcmRequest {
            to: token,
            notification: FcmNotification {
                title: &message.title,
                body: &message.body,
            },
            data: &message.data,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("key={}", self.config.server_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("FCM request failed: {}", e))?;

        let status = response.status();
        if status.is_success() {
            debug!(status = %status, "FCM accepted push notification");
            Ok(())
        } else {
            let detail = response.text().await.unwrap_or_default();
            warn!(status = %status, "FCM rejected push notification");
            Err(format!("FCM returned {}: {}", status, detail))
        }
    }
}
