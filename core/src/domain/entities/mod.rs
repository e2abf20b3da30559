//! Domain entities and entity snapshots.
//!
//! The verification record is the only entity the core owns end-to-end. The
//! order, user, and menu-item types are structured snapshots of externally
//! persisted documents, consumed by the notification fan-out as before/after
//! pairs.

pub mod delivery_log;
pub mod menu_item;
pub mod order;
pub mod user;
pub mod verification_record;

pub use delivery_log::{DeliveryChannel, DeliveryLogEntry, DeliveryStatus};
pub use menu_item::{MenuItemSnapshot, ModerationState};
pub use order::{OrderSnapshot, OrderStatus};
pub use user::{ApprovalStatus, UserRole, UserSnapshot};
pub use verification_record::VerificationRecord;
