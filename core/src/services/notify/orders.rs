//! Order lifecycle transition rules.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing;

use crate::domain::entities::order::{OrderSnapshot, OrderStatus};
use crate::repositories::{ConfigSource, DeliveryLog, UserDirectory};

use super::service::NotificationService;
use super::traits::{EmailTransport, PushMessage, PushTransport};

impl<D, P, E, L, C> NotificationService<D, P, E, L, C>
where
    D: UserDirectory + 'static,
    P: PushTransport + 'static,
    E: EmailTransport + 'static,
    L: DeliveryLog + 'static,
    C: ConfigSource + 'static,
{
    /// Evaluate the order transition rules.
    ///
    /// Rules are independent predicates over `(before.status, after.status)`;
    /// a write that matches several dispatches several times. Status
    /// regressions match no rule by construction of the predicates.
    pub(super) async fn handle_order_change(
        &self,
        id: &str,
        before: Option<&OrderSnapshot>,
        after: Option<&OrderSnapshot>,
    ) {
        let Some(after) = after else {
            // Deletions trigger nothing
            return;
        };
        let before_status = before.map(|o| o.status);

        if before.is_none() {
            self.notify_restaurant_new_order(id, after).await;
        }

        if before_status != Some(OrderStatus::Accepted) && after.status == OrderStatus::Accepted {
            self.broadcast_delivery_available(id, after).await;
        }

        if before_status != Some(OrderStatus::PickedUp)
            && after.status == OrderStatus::PickedUp
            && after.delivery_person_id.is_some()
        {
            self.notify_client(
                id,
                after,
                PushMessage::new("Order in progress", "A courier has picked up your order")
                    .with_data("type", "order_picked_up")
                    .with_data("order_id", id),
            )
            .await;
        }

        if before_status != Some(OrderStatus::Delivered) && after.status == OrderStatus::Delivered {
            self.notify_client(
                id,
                after,
                PushMessage::new("Order delivered", "Your order has been delivered. Enjoy!")
                    .with_data("type", "order_delivered")
                    .with_data("order_id", id),
            )
            .await;
        }
    }

    /// New order: push to the owning restaurant's registered token
    async fn notify_restaurant_new_order(&self, id: &str, order: &OrderSnapshot) {
        let restaurant = match self.directory.find_by_id(&order.restaurant_id).await {
            Ok(Some(restaurant)) => restaurant,
            Ok(None) => {
                tracing::warn!(
                    order_id = %id,
                    restaurant_id = %order.restaurant_id,
                    event = "order_restaurant_missing",
                    "Restaurant not found for new order"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(
                    order_id = %id,
                    error = %e,
                    event = "order_directory_failed",
                    "Directory lookup failed; dropping new-order notification"
                );
                return;
            }
        };

        let message = PushMessage::new(
            "New order",
            format!("{} items \u{2022} {:.2}", order.item_count, order.total),
        )
        .with_data("type", "order_created")
        .with_data("order_id", id);

        self.dispatch_push(&restaurant, message).await;
    }

    /// Order accepted: broadcast to every approved delivery user in the
    /// restaurant's city, or to all approved delivery users when the
    /// restaurant has no city.
    ///
    /// Deliveries run concurrently and are all awaited before returning;
    /// one user's failure never blocks the others.
    async fn broadcast_delivery_available(&self, id: &str, order: &OrderSnapshot) {
        let restaurant = match self.directory.find_by_id(&order.restaurant_id).await {
            Ok(restaurant) => restaurant,
            Err(e) => {
                tracing::warn!(
                    order_id = %id,
                    error = %e,
                    event = "order_directory_failed",
                    "Directory lookup failed; dropping delivery broadcast"
                );
                return;
            }
        };
        let city = restaurant.as_ref().and_then(|r| r.city.as_deref());

        let couriers = match self.directory.find_approved_delivery(city).await {
            Ok(couriers) => couriers,
            Err(e) => {
                tracing::warn!(
                    order_id = %id,
                    error = %e,
                    event = "order_directory_failed",
                    "Courier query failed; dropping delivery broadcast"
                );
                return;
            }
        };

        let address = order
            .address
            .clone()
            .unwrap_or_else(|| "No address provided".to_string());
        let message = PushMessage::new(
            "Delivery available",
            format!(
                "{} items \u{2022} {:.2} \u{2022} {}",
                order.item_count, order.total, address
            ),
        )
        .with_data("type", "delivery_available")
        .with_data("order_id", id);

        tracing::info!(
            order_id = %id,
            courier_count = couriers.len(),
            city = city.unwrap_or("*"),
            event = "delivery_broadcast",
            "Broadcasting delivery availability"
        );

        let mut deliveries = JoinSet::new();
        for courier in couriers {
            let Some(token) = courier.push_token.clone().filter(|t| !t.is_empty()) else {
                tracing::debug!(
                    user_id = %courier.id,
                    event = "push_skipped_no_token",
                    "Skipping courier without a registered token"
                );
                continue;
            };
            let push = Arc::clone(&self.push);
            let message = message.clone();
            deliveries.spawn(async move {
                if let Err(e) = push.send(&token, &message).await {
                    tracing::warn!(
                        user_id = %courier.id,
                        error = %e,
                        event = "push_send_failed",
                        "Push transport failed; notification dropped"
                    );
                }
            });
        }

        // Partial delivery is the expected common case; wait for every
        // in-flight send without propagating individual failures
        while deliveries.join_next().await.is_some() {}
    }

    /// Push to the ordering client
    async fn notify_client(&self, id: &str, order: &OrderSnapshot, message: PushMessage) {
        match self.directory.find_by_id(&order.client_id).await {
            Ok(Some(client)) => self.dispatch_push(&client, message).await,
            Ok(None) => {
                tracing::warn!(
                    order_id = %id,
                    client_id = %order.client_id,
                    event = "order_client_missing",
                    "Client not found for order notification"
                );
            }
            Err(e) => {
                tracing::warn!(
                    order_id = %id,
                    error = %e,
                    event = "order_directory_failed",
                    "Directory lookup failed; dropping client notification"
                );
            }
        }
    }
}
