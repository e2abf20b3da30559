//! SMS transport implementations

#[cfg(feature = "twilio-sms")]
mod twilio;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsTransport};
