//! Delivery log sink trait.

use async_trait::async_trait;

use crate::domain::entities::delivery_log::DeliveryLogEntry;
use crate::errors::DomainError;

/// Append-only sink for delivery log entries.
///
/// Callers treat appends as best-effort: a failed append is logged and
/// swallowed, never surfaced in the caller's own result.
#[async_trait]
pub trait DeliveryLog: Send + Sync {
    /// Append one entry to the log
    async fn append(&self, entry: DeliveryLogEntry) -> Result<(), DomainError>;
}
