//! Main OTP engine implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use tracing;

use sendy_shared::phone::{is_valid_phone, mask_phone, normalize_phone_number, subject_id};

use crate::domain::entities::delivery_log::{DeliveryChannel, DeliveryLogEntry, DeliveryStatus};
use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ConfigSource, DeliveryLog, VerificationStore};
use crate::services::policy::PolicyProvider;

use super::traits::SmsTransport;
use super::types::{IssueOutcome, VerifyOutcome};

/// OTP verification engine.
///
/// Issues short-lived numeric codes bound to a phone identifier, enforces
/// expiry, attempt limits, and resend cooldowns, and records a best-effort
/// delivery log entry for every outcome. Policy values are read through the
/// shared [`PolicyProvider`] on each call; the engine holds no private copy.
pub struct OtpService<St, Sm, L, C>
where
    St: VerificationStore,
    Sm: SmsTransport,
    L: DeliveryLog,
    C: ConfigSource,
{
    store: Arc<St>,
    sms: Arc<Sm>,
    log: Arc<L>,
    policy: Arc<PolicyProvider<C>>,
}

impl<St, Sm, L, C> OtpService<St, Sm, L, C>
where
    St: VerificationStore,
    Sm: SmsTransport,
    L: DeliveryLog,
    C: ConfigSource,
{
    /// Create a new OTP engine
    pub fn new(
        store: Arc<St>,
        sms: Arc<Sm>,
        log: Arc<L>,
        policy: Arc<PolicyProvider<C>>,
    ) -> Self {
        Self {
            store,
            sms,
            log,
            policy,
        }
    }

    /// Issue a fresh code for an identifier and dispatch it over SMS.
    ///
    /// Overwrites any existing record for the identifier, resetting the
    /// attempt counter. Fails with `Unavailable` when policy disables the
    /// channel and with `Internal` when the transport rejects the send; the
    /// engine never retries a failed send. Every failure past input
    /// validation appends a failed entry to the delivery log.
    pub async fn issue(&self, phone: &str) -> DomainResult<IssueOutcome> {
        if phone.trim().is_empty() {
            return Err(DomainError::InvalidArgument {
                message: "Phone number required".to_string(),
            });
        }
        let identifier = normalize_phone_number(phone);
        if !is_valid_phone(&identifier) {
            return Err(DomainError::InvalidArgument {
                message: "Invalid phone number format".to_string(),
            });
        }

        match self.issue_code(&identifier).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.audit(
                    DeliveryLogEntry::new(DeliveryChannel::Sms, &identifier, DeliveryStatus::Failed)
                        .with_detail(e.to_string()),
                )
                .await;
                Err(e)
            }
        }
    }

    async fn issue_code(&self, identifier: &str) -> DomainResult<IssueOutcome> {
        let policy = self.policy.get().await?;
        if !policy.otp.enabled {
            tracing::warn!(
                event = "otp_channel_disabled",
                "Rejecting code request while the SMS channel is disabled"
            );
            return Err(DomainError::Unavailable {
                message: "Verification service is currently unavailable".to_string(),
            });
        }

        let code = generate_code(policy.otp.code_length);
        let now = Utc::now();
        let record = VerificationRecord::issue(
            code.clone(),
            now,
            policy.otp.expiry_minutes,
            policy.otp.max_attempts,
        );
        self.store.put(identifier, record).await?;

        tracing::info!(
            phone = %mask_phone(identifier),
            event = "otp_generated",
            "Generated new verification code"
        );

        let body = format!(
            "Sendy - Code: {}\nExpires in {} minutes.\n\nNever share this code.",
            code, policy.otp.expiry_minutes
        );

        match self.sms.send(identifier, &body).await {
            Ok(message_id) => {
                tracing::info!(
                    phone = %mask_phone(identifier),
                    message_id = %message_id,
                    event = "otp_sms_sent",
                    "Verification code handed to SMS transport"
                );
                self.audit(
                    DeliveryLogEntry::new(DeliveryChannel::Sms, identifier, DeliveryStatus::Sent)
                        .with_detail(message_id.clone()),
                )
                .await;

                Ok(IssueOutcome {
                    expiry_minutes: policy.otp.expiry_minutes,
                    message_id,
                    next_resend_at: now + Duration::seconds(policy.otp.resend_cooldown_seconds),
                })
            }
            Err(e) => {
                tracing::error!(
                    phone = %mask_phone(identifier),
                    error = %e,
                    event = "otp_sms_failed",
                    "SMS transport rejected the verification code"
                );
                Err(DomainError::internal(format!("Failed to send SMS: {}", e)))
            }
        }
    }

    /// Verify a submitted code against the identifier's record.
    ///
    /// The check order is significant and preserved exactly: existence,
    /// already-verified, expiry, attempt exhaustion, then mismatch. A
    /// mismatch still costs an attempt even though the earlier checks
    /// passed. The incremented counter is not re-checked on the same call,
    /// so the wrong guess that spends the last attempt reports a plain
    /// mismatch and exhaustion surfaces on the next call.
    pub async fn verify(&self, phone: &str, code: &str) -> DomainResult<VerifyOutcome> {
        if phone.trim().is_empty() || code.trim().is_empty() {
            return Err(DomainError::InvalidArgument {
                message: "Missing parameters".to_string(),
            });
        }

        let identifier = normalize_phone_number(phone);
        let outcome = self.check_code(&identifier, code).await;

        match &outcome {
            Ok(result) => {
                tracing::info!(
                    phone = %mask_phone(&identifier),
                    subject_id = %result.subject_id,
                    event = "otp_verified",
                    "Verification code accepted"
                );
                self.audit(
                    DeliveryLogEntry::new(
                        DeliveryChannel::Sms,
                        &identifier,
                        DeliveryStatus::Verified,
                    )
                    .with_detail("verified"),
                )
                .await;
            }
            Err(e) => {
                tracing::warn!(
                    phone = %mask_phone(&identifier),
                    code = e.code(),
                    event = "otp_verify_rejected",
                    "Verification attempt rejected"
                );
                self.audit(
                    DeliveryLogEntry::new(
                        DeliveryChannel::Sms,
                        &identifier,
                        DeliveryStatus::Rejected,
                    )
                    .with_detail(e.to_string()),
                )
                .await;
            }
        }

        outcome
    }

    /// Re-issue a code, enforcing the resend cooldown.
    ///
    /// A missing record means no cooldown is active; the request falls
    /// through to a fresh issuance.
    pub async fn resend(&self, phone: &str) -> DomainResult<IssueOutcome> {
        if phone.trim().is_empty() {
            return Err(DomainError::InvalidArgument {
                message: "Phone number required".to_string(),
            });
        }

        let policy = self.policy.get().await?;
        let identifier = normalize_phone_number(phone);

        if let Some(record) = self.store.get(&identifier).await? {
            let now = Utc::now();
            if let Some(wait) =
                record.cooldown_remaining(now, policy.otp.resend_cooldown_seconds)
            {
                tracing::warn!(
                    phone = %mask_phone(&identifier),
                    retry_after_seconds = wait,
                    event = "otp_resend_throttled",
                    "Resend requested inside the cooldown window"
                );
                return Err(DomainError::CooldownActive {
                    retry_after_seconds: wait,
                });
            }
        }

        self.issue(phone).await
    }

    async fn check_code(&self, identifier: &str, code: &str) -> DomainResult<VerifyOutcome> {
        let record = self
            .store
            .get(identifier)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "verification code".to_string(),
            })?;

        if record.verified {
            return Err(DomainError::AlreadyVerified);
        }

        let now = Utc::now();
        if record.is_expired(now) {
            return Err(DomainError::Expired);
        }

        if record.attempts_exhausted() {
            return Err(DomainError::AttemptsExhausted);
        }

        if !codes_match(&record.code, code) {
            // Persist the failed attempt before reporting the mismatch
            self.store.increment_attempts(identifier).await?;
            return Err(DomainError::InvalidArgument {
                message: "Incorrect code".to_string(),
            });
        }

        self.store.mark_verified(identifier, now).await?;

        Ok(VerifyOutcome {
            subject_id: subject_id(identifier),
            phone: identifier.to_string(),
        })
    }

    /// Best-effort append to the delivery log; failures never affect the
    /// caller's result
    async fn audit(&self, entry: DeliveryLogEntry) {
        if let Err(e) = self.log.append(entry).await {
            tracing::warn!(
                error = %e,
                event = "delivery_log_append_failed",
                "Failed to append delivery log entry"
            );
        }
    }
}

/// Generate a numeric code of the given length, drawn uniformly from
/// `[10^(n-1), 10^n - 1]` inclusive. Lengths are clamped to what fits a
/// `u64`.
fn generate_code(length: u32) -> String {
    let len = length.clamp(1, 18);
    let min = 10u64.pow(len - 1);
    let max = 10u64.pow(len) - 1;
    rand::thread_rng().gen_range(min..=max).to_string()
}

/// Constant-time code comparison
fn codes_match(stored: &str, submitted: &str) -> bool {
    if stored.len() != submitted.len() {
        return false;
    }
    constant_time_eq(stored.as_bytes(), submitted.as_bytes())
}
