//! Environment-backed policy source.

use async_trait::async_trait;

use sendy_core::errors::DomainResult;
use sendy_core::repositories::ConfigSource;
use sendy_shared::config::{AdminConfig, OtpPolicy, PolicyConfig, SmsProviderConfig};

/// Policy source reading from environment variables with production
/// defaults.
///
/// Every `fetch` re-reads the environment; the core's policy provider
/// caches the snapshot, so a live environment change is picked up within
/// one cache TTL.
pub struct EnvConfigSource;

impl EnvConfigSource {
    pub fn new() -> Self {
        Self
    }

    fn var_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

impl Default for EnvConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigSource for EnvConfigSource {
    async fn fetch(&self) -> DomainResult<PolicyConfig> {
        let defaults = OtpPolicy::default();

        let recipients = std::env::var("ADMIN_ALERT_RECIPIENTS")
            .map(|v| {
                v.split(',')
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(PolicyConfig {
            otp: OtpPolicy {
                code_length: Self::var_or("OTP_CODE_LENGTH", defaults.code_length),
                expiry_minutes: Self::var_or("OTP_EXPIRY_MINUTES", defaults.expiry_minutes),
                max_attempts: Self::var_or("OTP_MAX_ATTEMPTS", defaults.max_attempts),
                resend_cooldown_seconds: Self::var_or(
                    "OTP_RESEND_COOLDOWN_SECONDS",
                    defaults.resend_cooldown_seconds,
                ),
                enabled: Self::var_or("OTP_ENABLED", defaults.enabled),
            },
            sms: SmsProviderConfig {
                account_sid: std::env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
                auth_token: std::env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
                from_number: std::env::var("TWILIO_FROM_NUMBER").unwrap_or_default(),
            },
            admin: AdminConfig {
                recipients,
                from_address: std::env::var("MAIL_FROM_ADDRESS")
                    .unwrap_or_else(|_| AdminConfig::default().from_address),
            },
        })
    }
}

/// Policy source yielding a fixed snapshot, for tests and demos
pub struct StaticConfigSource {
    config: PolicyConfig,
}

impl StaticConfigSource {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ConfigSource for StaticConfigSource {
    async fn fetch(&self) -> DomainResult<PolicyConfig> {
        Ok(self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the ADMIN_ALERT_RECIPIENTS mutations cannot race
    // across parallel test threads.
    #[tokio::test]
    async fn test_env_source_defaults_and_recipient_parsing() {
        std::env::remove_var("OTP_CODE_LENGTH");
        std::env::remove_var("OTP_EXPIRY_MINUTES");
        std::env::remove_var("ADMIN_ALERT_RECIPIENTS");

        let config = EnvConfigSource::new().fetch().await.unwrap();
        assert_eq!(config.otp.code_length, 6);
        assert_eq!(config.otp.expiry_minutes, 5);
        assert!(config.admin.recipients.is_empty());

        std::env::set_var(
            "ADMIN_ALERT_RECIPIENTS",
            "ops@sendy.app, mod@sendy.app ,,",
        );

        let config = EnvConfigSource::new().fetch().await.unwrap();
        assert_eq!(
            config.admin.recipients,
            vec!["ops@sendy.app".to_string(), "mod@sendy.app".to_string()]
        );

        std::env::remove_var("ADMIN_ALERT_RECIPIENTS");
    }

    #[tokio::test]
    async fn test_static_source_yields_fixed_snapshot() {
        let mut config = PolicyConfig::default();
        config.otp.code_length = 4;

        let source = StaticConfigSource::new(config.clone());
        assert_eq!(source.fetch().await.unwrap(), config);
    }
}
