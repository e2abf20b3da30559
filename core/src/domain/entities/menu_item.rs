//! Menu item snapshot consumed by the moderation alerts.

use serde::{Deserialize, Serialize};

/// Moderation state of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationState {
    /// Awaiting admin review
    Pending,
    /// Visible in the catalog
    Approved,
    /// Rejected by an admin
    Rejected,
}

/// Structured snapshot of a persisted menu item document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemSnapshot {
    /// Item name shown in the catalog
    pub name: String,

    /// Owning restaurant
    pub restaurant_id: String,

    /// Price in the restaurant's currency
    pub price: f64,

    /// Moderation state
    pub state: ModerationState,
}
