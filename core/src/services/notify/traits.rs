//! Traits for push and email transport integration

use std::collections::HashMap;

use async_trait::async_trait;

/// A push notification payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    /// Notification title
    pub title: String,
    /// Notification body
    pub body: String,
    /// Structured data payload delivered alongside the notification
    pub data: HashMap<String, String>,
}

impl PushMessage {
    /// Create a message with an empty data payload
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: HashMap::new(),
        }
    }

    /// Attach a data field
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Trait for the push notification transport.
///
/// Failures are non-fatal to callers; the fan-out logs and swallows them.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Deliver one notification to one device token
    async fn send(&self, token: &str, message: &PushMessage) -> Result<(), String>;
}

/// Trait for the outbound email transport.
///
/// One call delivers a single message to the whole recipient list. Failures
/// are non-fatal to callers.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Send one HTML email to the given recipients
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<(), String>;
}
