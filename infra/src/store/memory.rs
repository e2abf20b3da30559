//! In-memory store for development and testing.
//!
//! Backs the `VerificationStore`, `DeliveryLog`, and `UserDirectory` traits
//! with `tokio::sync::RwLock`-guarded maps. The production document store is
//! an external collaborator; this implementation exists so the services can
//! run end-to-end without one.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use sendy_core::domain::entities::delivery_log::DeliveryLogEntry;
use sendy_core::domain::entities::user::UserSnapshot;
use sendy_core::domain::entities::verification_record::VerificationRecord;
use sendy_core::errors::{DomainError, DomainResult};
use sendy_core::repositories::{DeliveryLog, UserDirectory, VerificationStore};

/// In-memory implementation of the store and directory traits
pub struct MemoryStore {
    records: RwLock<HashMap<String, VerificationRecord>>,
    log: RwLock<Vec<DeliveryLogEntry>>,
    users: RwLock<HashMap<String, UserSnapshot>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            log: RwLock::new(Vec::new()),
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace a user snapshot
    pub async fn seed_user(&self, user: UserSnapshot) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    /// Snapshot of the delivery log, oldest first
    pub async fn log_entries(&self) -> Vec<DeliveryLogEntry> {
        self.log.read().await.clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationStore for MemoryStore {
    async fn get(&self, phone: &str) -> DomainResult<Option<VerificationRecord>> {
        Ok(self.records.read().await.get(phone).cloned())
    }

    async fn put(&self, phone: &str, record: VerificationRecord) -> DomainResult<()> {
        self.records
            .write()
            .await
            .insert(phone.to_string(), record);
        Ok(())
    }

    async fn increment_attempts(&self, phone: &str) -> DomainResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(phone)
            .ok_or_else(|| DomainError::NotFound {
                resource: "verification code".to_string(),
            })?;
        record.attempts += 1;
        Ok(())
    }

    async fn mark_verified(&self, phone: &str, at: DateTime<Utc>) -> DomainResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(phone)
            .ok_or_else(|| DomainError::NotFound {
                resource: "verification code".to_string(),
            })?;
        record.verified = true;
        record.verified_at = Some(at);
        Ok(())
    }
}

#[async_trait]
impl DeliveryLog for MemoryStore {
    async fn append(&self, entry: DeliveryLogEntry) -> DomainResult<()> {
        self.log.write().await.push(entry);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<UserSnapshot>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_approved_delivery(
        &self,
        city: Option<&str>,
    ) -> DomainResult<Vec<UserSnapshot>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.is_approved_delivery())
            .filter(|u| match city {
                Some(city) => u.city.as_deref() == Some(city),
                None => true,
            })
            .cloned()
            .collect())
    }
}
