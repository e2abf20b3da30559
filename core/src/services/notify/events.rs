//! Entity change events consumed by the fan-out.

use crate::domain::entities::menu_item::MenuItemSnapshot;
use crate::domain::entities::order::OrderSnapshot;
use crate::domain::entities::user::UserSnapshot;

/// A state transition of one persisted entity.
///
/// Ephemeral: derived from the store's before/after pair at write time,
/// consumed exactly once, never persisted by the core. A `None` before means
/// the entity was created by this write; a `None` after means it was
/// deleted.
#[derive(Debug, Clone)]
pub enum EntityChange {
    /// An order document changed
    Order {
        id: String,
        before: Option<OrderSnapshot>,
        after: Option<OrderSnapshot>,
    },
    /// A user document changed
    User {
        id: String,
        before: Option<UserSnapshot>,
        after: Option<UserSnapshot>,
    },
    /// A menu item document changed
    MenuItem {
        id: String,
        before: Option<MenuItemSnapshot>,
        after: Option<MenuItemSnapshot>,
    },
}
