//! Business services containing domain logic and use cases.

pub mod notify;
pub mod otp;
pub mod policy;

// Re-export commonly used types
pub use notify::{
    EmailTransport, EntityChange, NotificationService, PushMessage, PushTransport,
};
pub use otp::{IssueOutcome, OtpService, SmsTransport, VerifyOutcome};
pub use policy::PolicyProvider;
