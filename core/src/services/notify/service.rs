//! Notification fan-out service.

use std::sync::Arc;

use tracing;

use crate::domain::entities::user::UserSnapshot;
use crate::repositories::{ConfigSource, DeliveryLog, UserDirectory};
use crate::services::policy::PolicyProvider;

use super::events::EntityChange;
use super::traits::{EmailTransport, PushMessage, PushTransport};

/// Fan-out service dispatching notifications for entity state transitions.
///
/// Exposes a single entry point, [`on_entity_changed`], that never returns
/// an error: every transport or directory failure is logged and swallowed so
/// the triggering write is never failed by its notifications.
///
/// [`on_entity_changed`]: NotificationService::on_entity_changed
pub struct NotificationService<D, P, E, L, C>
where
    D: UserDirectory,
    P: PushTransport,
    E: EmailTransport,
    L: DeliveryLog,
    C: ConfigSource,
{
    pub(super) directory: Arc<D>,
    pub(super) push: Arc<P>,
    pub(super) email: Arc<E>,
    pub(super) log: Arc<L>,
    pub(super) policy: Arc<PolicyProvider<C>>,
}

impl<D, P, E, L, C> NotificationService<D, P, E, L, C>
where
    D: UserDirectory + 'static,
    P: PushTransport + 'static,
    E: EmailTransport + 'static,
    L: DeliveryLog + 'static,
    C: ConfigSource + 'static,
{
    /// Create a new fan-out service
    pub fn new(
        directory: Arc<D>,
        push: Arc<P>,
        email: Arc<E>,
        log: Arc<L>,
        policy: Arc<PolicyProvider<C>>,
    ) -> Self {
        Self {
            directory,
            push,
            email,
            log,
            policy,
        }
    }

    /// Evaluate one entity transition and dispatch whatever it triggers.
    ///
    /// Each transition rule is evaluated independently; a single write may
    /// trigger none, one, or several dispatches. Completes only after every
    /// dispatch it started has finished, so no in-flight work outlives the
    /// handler.
    pub async fn on_entity_changed(&self, change: EntityChange) {
        match change {
            EntityChange::Order { id, before, after } => {
                self.handle_order_change(&id, before.as_ref(), after.as_ref())
                    .await;
            }
            EntityChange::User { id, before, after } => {
                self.handle_user_change(&id, before.as_ref(), after.as_ref())
                    .await;
            }
            EntityChange::MenuItem { id, before, after } => {
                self.handle_menu_item_change(&id, before.as_ref(), after.as_ref())
                    .await;
            }
        }
    }

    /// Push to a single user; a missing token is a no-op, a transport
    /// failure is logged and swallowed
    pub(super) async fn dispatch_push(&self, user: &UserSnapshot, message: PushMessage) {
        let Some(token) = user.push_token.as_deref().filter(|t| !t.is_empty()) else {
            tracing::debug!(
                user_id = %user.id,
                event = "push_skipped_no_token",
                "Skipping push for user without a registered token"
            );
            return;
        };

        if let Err(e) = self.push.send(token, &message).await {
            tracing::warn!(
                user_id = %user.id,
                error = %e,
                event = "push_send_failed",
                "Push transport failed; notification dropped"
            );
        }
    }
}
