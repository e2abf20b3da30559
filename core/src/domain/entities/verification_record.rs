//! Verification record entity for SMS-based phone verification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Verification record for a single in-flight code.
///
/// Records are keyed externally by the normalized phone identifier, so at
/// most one code is in flight per identifier. A new issuance overwrites the
/// whole record; there is no explicit deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// The fixed-length numeric code
    pub code: String,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully verified. Set exactly once;
    /// a verified record is terminal until overwritten by a fresh issuance.
    pub verified: bool,

    /// Timestamp of the successful verification, if any
    pub verified_at: Option<DateTime<Utc>>,

    /// Number of mismatched verification attempts. Never decremented.
    pub attempts: i32,

    /// Attempt budget snapshotted from policy at issuance time, so later
    /// policy changes do not retroactively affect in-flight codes.
    pub max_attempts: i32,
}

impl VerificationRecord {
    /// Create a fresh record for a newly issued code
    pub fn issue(code: String, now: DateTime<Utc>, expiry_minutes: i64, max_attempts: i32) -> Self {
        Self {
            code,
            created_at: now,
            expires_at: now + Duration::minutes(expiry_minutes),
            verified: false,
            verified_at: None,
            attempts: 0,
            max_attempts,
        }
    }

    /// Whether the code's expiry has passed at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether the attempt budget is spent
    pub fn attempts_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Seconds remaining in the resend cooldown at `now`, rounded up to
    /// whole seconds. `None` when the cooldown has fully elapsed.
    pub fn cooldown_remaining(&self, now: DateTime<Utc>, cooldown_seconds: i64) -> Option<i64> {
        let elapsed_ms = (now - self.created_at).num_milliseconds();
        let cooldown_ms = cooldown_seconds * 1000;
        if elapsed_ms >= cooldown_ms {
            return None;
        }
        let remaining_ms = cooldown_ms - elapsed_ms;
        Some((remaining_ms + 999) / 1000)
    }
}
