//! Moderation alert rules: admin emails for registrations and catalog
//! changes awaiting review.

use tracing;

use crate::domain::entities::delivery_log::{DeliveryChannel, DeliveryLogEntry, DeliveryStatus};
use crate::domain::entities::menu_item::{MenuItemSnapshot, ModerationState};
use crate::domain::entities::user::{UserRole, UserSnapshot};
use crate::repositories::{ConfigSource, DeliveryLog, UserDirectory};

use super::service::NotificationService;
use super::traits::{EmailTransport, PushTransport};

impl<D, P, E, L, C> NotificationService<D, P, E, L, C>
where
    D: UserDirectory + 'static,
    P: PushTransport + 'static,
    E: EmailTransport + 'static,
    L: DeliveryLog + 'static,
    C: ConfigSource + 'static,
{
    /// Evaluate user transitions that require admin review.
    ///
    /// Each alert fires only on its specific flip: a new restaurant or
    /// delivery registration, or `has_pending_image_change` going
    /// false to true. Unrelated field changes trigger nothing.
    pub(super) async fn handle_user_change(
        &self,
        id: &str,
        before: Option<&UserSnapshot>,
        after: Option<&UserSnapshot>,
    ) {
        let Some(after) = after else {
            return;
        };

        if before.is_none() && matches!(after.role, UserRole::Restaurant | UserRole::Delivery) {
            let kind = match after.role {
                UserRole::Restaurant => "restaurant",
                _ => "delivery",
            };
            let subject = format!("New {} registration pending review", kind);
            let body = format!(
                "<h2>New {} registration</h2>\
                 <p><strong>Name:</strong> {}</p>\
                 <p><strong>City:</strong> {}</p>\
                 <p>Account <code>{}</code> is awaiting approval.</p>",
                kind,
                after.display_label(),
                after.city.as_deref().unwrap_or("-"),
                id,
            );
            self.send_admin_alert(&subject, &body, id).await;
        }

        let was_pending = before.map(|b| b.has_pending_image_change).unwrap_or(false);
        if before.is_some() && !was_pending && after.has_pending_image_change {
            let subject = "Profile image change pending review".to_string();
            let body = format!(
                "<h2>Profile image change request</h2>\
                 <p><strong>Account:</strong> {} (<code>{}</code>)</p>\
                 <p>A new profile image is awaiting approval.</p>",
                after.display_label(),
                id,
            );
            self.send_admin_alert(&subject, &body, id).await;
        }
    }

    /// Evaluate menu item transitions that require admin review: a newly
    /// created item, or an existing item edited back into pending state.
    pub(super) async fn handle_menu_item_change(
        &self,
        id: &str,
        before: Option<&MenuItemSnapshot>,
        after: Option<&MenuItemSnapshot>,
    ) {
        let Some(after) = after else {
            return;
        };

        let newly_created = before.is_none();
        let edited_back_to_pending = before
            .map(|b| b.state != ModerationState::Pending && after.state == ModerationState::Pending)
            .unwrap_or(false);

        if newly_created {
            let subject = "New menu item pending review".to_string();
            let body = format!(
                "<h2>New menu item</h2>\
                 <p><strong>Item:</strong> {} ({:.2})</p>\
                 <p><strong>Restaurant:</strong> <code>{}</code></p>\
                 <p>Item <code>{}</code> is awaiting approval.</p>",
                after.name, after.price, after.restaurant_id, id,
            );
            self.send_admin_alert(&subject, &body, id).await;
        } else if edited_back_to_pending {
            let subject = "Edited menu item pending review".to_string();
            let body = format!(
                "<h2>Menu item edited</h2>\
                 <p><strong>Item:</strong> {} ({:.2})</p>\
                 <p><strong>Restaurant:</strong> <code>{}</code></p>\
                 <p>Item <code>{}</code> was edited and moved back to pending.</p>",
                after.name, after.price, after.restaurant_id, id,
            );
            self.send_admin_alert(&subject, &body, id).await;
        }
    }

    /// Send one email to the full admin distribution list and append a
    /// best-effort sent/failed record to the delivery log. Never fails the
    /// caller.
    pub(super) async fn send_admin_alert(&self, subject: &str, html_body: &str, entity_id: &str) {
        let policy = match self.policy.get().await {
            Ok(policy) => policy,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    event = "admin_alert_config_failed",
                    "Could not load admin recipients; dropping alert"
                );
                return;
            }
        };

        let recipients = &policy.admin.recipients;
        if recipients.is_empty() {
            tracing::debug!(
                subject = subject,
                event = "admin_alert_no_recipients",
                "No admin recipients configured; dropping alert"
            );
            return;
        }

        let status = match self.email.send(recipients, subject, html_body).await {
            Ok(()) => {
                tracing::info!(
                    subject = subject,
                    recipients = recipients.len(),
                    event = "admin_alert_sent",
                    "Moderation alert emailed to admins"
                );
                DeliveryStatus::Sent
            }
            Err(e) => {
                tracing::warn!(
                    subject = subject,
                    error = %e,
                    event = "admin_alert_failed",
                    "Email transport failed; alert dropped"
                );
                DeliveryStatus::Failed
            }
        };

        let entry = DeliveryLogEntry::new(DeliveryChannel::Email, entity_id, status)
            .with_detail(subject.to_string());
        if let Err(e) = self.log.append(entry).await {
            tracing::warn!(
                error = %e,
                event = "delivery_log_append_failed",
                "Failed to append delivery log entry"
            );
        }
    }
}
