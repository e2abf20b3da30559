//! Verification record store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::DomainError;

/// Store for in-flight verification records, keyed by normalized phone
/// identifier.
///
/// Implementations must provide read-after-write consistency for a single
/// key. `increment_attempts` is a last-write-consistent read-modify-write:
/// concurrent verification attempts against the same identifier may race,
/// and an occasional lost increment under true concurrency is an accepted
/// tradeoff rather than a reason to impose a transaction.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Load the record for an identifier
    ///
    /// # Returns
    /// * `Ok(Some(record))` - A record exists for the identifier
    /// * `Ok(None)` - No record has been issued, or it was overwritten
    /// * `Err(DomainError)` - Store failure
    async fn get(&self, phone: &str) -> Result<Option<VerificationRecord>, DomainError>;

    /// Write a record, overwriting any existing record for the identifier
    async fn put(&self, phone: &str, record: VerificationRecord) -> Result<(), DomainError>;

    /// Increment the attempt counter for the identifier's record by one
    async fn increment_attempts(&self, phone: &str) -> Result<(), DomainError>;

    /// Mark the identifier's record as verified at the given instant
    async fn mark_verified(&self, phone: &str, at: DateTime<Utc>) -> Result<(), DomainError>;
}
