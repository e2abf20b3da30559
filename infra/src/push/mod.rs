//! Push notification transport implementations

mod fcm;

pub use fcm::{FcmConfig, FcmPushTransport};
