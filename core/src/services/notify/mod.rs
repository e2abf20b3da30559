//! Notification fan-out for entity state transitions
//!
//! Watches before/after pairs of persisted entities (orders, users, menu
//! items) and dispatches targeted messages: push notifications to a single
//! user or a filtered broadcast audience, and moderation alert emails to the
//! admin distribution list. Dispatch is fire-and-forget from the caller's
//! perspective; no failure here may fail the triggering write.

mod events;
mod moderation;
mod orders;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use events::EntityChange;
pub use service::NotificationService;
pub use traits::{EmailTransport, PushMessage, PushTransport};
