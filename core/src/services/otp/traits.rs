//! Traits for SMS transport integration

use async_trait::async_trait;

/// Trait for the outbound SMS transport
#[async_trait]
pub trait SmsTransport: Send + Sync {
    /// Send an SMS, returning the provider's correlation id.
    ///
    /// Timeouts and provider-level retries belong to the implementation;
    /// the OTP engine surfaces a failure to its caller without retrying.
    async fn send(&self, phone: &str, body: &str) -> Result<String, String>;
}
