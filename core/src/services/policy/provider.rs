//! Cached policy provider implementation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing;

use sendy_shared::config::PolicyConfig;

use crate::errors::DomainResult;
use crate::repositories::ConfigSource;

/// Default time-to-live for a cached policy snapshot (5 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

struct CachedSnapshot {
    config: Arc<PolicyConfig>,
    fetched_at: Instant,
}

/// Owned, injectable cache over a [`ConfigSource`].
///
/// Both the OTP engine and the notification fan-out hold a shared handle to
/// one provider instance rather than each refetching configuration per call.
/// The snapshot is replaced wholesale when stale: a concurrent reader sees
/// either the old or the new snapshot, never a torn mix of fields.
///
/// Uses `tokio::time::Instant` for staleness so tests under
/// `#[tokio::test(start_paused = true)]` can advance time deterministically.
pub struct PolicyProvider<S: ConfigSource> {
    source: Arc<S>,
    ttl: Duration,
    cached: RwLock<Option<CachedSnapshot>>,
}

impl<S: ConfigSource> PolicyProvider<S> {
    /// Create a provider with the default TTL
    pub fn new(source: Arc<S>) -> Self {
        Self::with_ttl(source, DEFAULT_CACHE_TTL)
    }

    /// Create a provider with a custom TTL
    pub fn with_ttl(source: Arc<S>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cached: RwLock::new(None),
        }
    }

    /// Current policy snapshot, served from cache when fresh.
    ///
    /// A stale or empty cache triggers a fetch from the source; fetch
    /// failures are surfaced to the caller and leave the prior snapshot
    /// in place for the next attempt.
    pub async fn get(&self) -> DomainResult<Arc<PolicyConfig>> {
        {
            let cached = self.cached.read().await;
            if let Some(snapshot) = cached.as_ref() {
                if snapshot.fetched_at.elapsed() < self.ttl {
                    return Ok(Arc::clone(&snapshot.config));
                }
            }
        }

        let fresh = Arc::new(self.source.fetch().await?);

        tracing::debug!(event = "policy_refreshed", "Refreshed policy configuration");

        let mut cached = self.cached.write().await;
        *cached = Some(CachedSnapshot {
            config: Arc::clone(&fresh),
            fetched_at: Instant::now(),
        });

        Ok(fresh)
    }

    /// Drop the cached snapshot so the next `get` refetches
    pub async fn invalidate(&self) {
        let mut cached = self.cached.write().await;
        *cached = None;
    }
}
