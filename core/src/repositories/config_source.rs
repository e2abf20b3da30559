//! Config source trait.

use async_trait::async_trait;

use sendy_shared::config::PolicyConfig;

use crate::errors::DomainError;

/// Source of the policy configuration snapshot.
///
/// Assumed eventually consistent; the core applies its own time-bounded
/// cache on top (see [`crate::services::policy::PolicyProvider`]), so
/// implementations are free to hit the backing store on every fetch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetch the current policy configuration
    async fn fetch(&self) -> Result<PolicyConfig, DomainError>;
}
