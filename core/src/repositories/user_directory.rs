//! User directory trait used to resolve notification audiences.

use async_trait::async_trait;

use crate::domain::entities::user::UserSnapshot;
use crate::errors::DomainError;

/// Read-only directory over the persisted user documents.
///
/// Used by the notification fan-out to enrich payloads (restaurant display
/// name, city) and to resolve the delivery broadcast audience. The filtered
/// query's result set size is unbounded; callers must fan out to each match
/// independently.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Load one user by id
    async fn find_by_id(&self, id: &str) -> Result<Option<UserSnapshot>, DomainError>;

    /// All approved delivery users, optionally restricted to a city.
    ///
    /// `city = None` matches every approved delivery user regardless of
    /// city; `Some(city)` requires exact equality.
    async fn find_approved_delivery(
        &self,
        city: Option<&str>,
    ) -> Result<Vec<UserSnapshot>, DomainError>;
}
