//! Configuration types shared between the core services and infrastructure.
//!
//! The aggregate [`PolicyConfig`] is the snapshot the config provider caches
//! and hands out to the OTP engine and the notification fan-out. Neither
//! service keeps its own copy; they borrow a snapshot per call.

mod policy;

pub use policy::{AdminConfig, OtpPolicy, PolicyConfig, SmsProviderConfig};
