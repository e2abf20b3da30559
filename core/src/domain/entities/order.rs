//! Order snapshot and lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// The persisted documents store this as an ordinal; statuses only move
/// forward. Regressions and unknown ordinals are simply not matched by any
/// transition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed by the client, awaiting the restaurant
    Created,
    /// Restaurant accepted, looking for a delivery person
    Accepted,
    /// A delivery person picked the order up
    PickedUp,
    /// Order handed to the client
    Delivered,
}

impl OrderStatus {
    /// Decode a persisted ordinal. Unknown ordinals yield `None`.
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(OrderStatus::Created),
            1 => Some(OrderStatus::Accepted),
            2 => Some(OrderStatus::PickedUp),
            3 => Some(OrderStatus::Delivered),
            _ => None,
        }
    }

    /// Ordinal used in the persisted documents
    pub fn ordinal(&self) -> i64 {
        match self {
            OrderStatus::Created => 0,
            OrderStatus::Accepted => 1,
            OrderStatus::PickedUp => 2,
            OrderStatus::Delivered => 3,
        }
    }
}

/// Structured snapshot of a persisted order document. The order id travels
/// on the entity change event carrying the snapshot, not in the snapshot
/// itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// Lifecycle status
    pub status: OrderStatus,

    /// The ordering client
    pub client_id: String,

    /// The restaurant fulfilling the order
    pub restaurant_id: String,

    /// Assigned delivery person, once one accepts the delivery
    pub delivery_person_id: Option<String>,

    /// Number of items in the order
    pub item_count: u32,

    /// Order total in the restaurant's currency
    pub total: f64,

    /// Delivery address, when the client provided one
    pub address: Option<String>,
}
