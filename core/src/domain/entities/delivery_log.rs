//! Best-effort delivery log entries.
//!
//! Every OTP outcome and every outbound alert appends one of these to the
//! log sink. The core never reads them back; a failed append is swallowed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery channel the entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryChannel {
    Sms,
    Push,
    Email,
}

/// Outcome recorded by the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Message handed to the transport
    Sent,
    /// Transport reported failure
    Failed,
    /// Code successfully verified
    Verified,
    /// Verification attempt rejected
    Rejected,
}

/// A single append-only delivery log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryLogEntry {
    /// Entry identifier
    pub id: Uuid,

    /// Channel this entry refers to
    pub channel: DeliveryChannel,

    /// Identifier the message targeted (masked phone, user id, or subject)
    pub identifier: String,

    /// Recorded outcome
    pub status: DeliveryStatus,

    /// Free-form detail: correlation id, error message, or action name
    pub detail: Option<String>,

    /// Timestamp of the entry
    pub recorded_at: DateTime<Utc>,
}

impl DeliveryLogEntry {
    /// Create a new entry timestamped now
    pub fn new(
        channel: DeliveryChannel,
        identifier: impl Into<String>,
        status: DeliveryStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel,
            identifier: identifier.into(),
            status,
            detail: None,
            recorded_at: Utc::now(),
        }
    }

    /// Attach a detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
