//! Types for OTP engine results

use chrono::{DateTime, Utc};

/// Result of issuing a code.
///
/// Never carries the code itself; the code only travels over the SMS
/// transport.
#[derive(Debug, Clone)]
pub struct IssueOutcome {
    /// Minutes until the issued code expires
    pub expiry_minutes: i64,

    /// Correlation id returned by the SMS transport
    pub message_id: String,

    /// When the identifier may request another code
    pub next_resend_at: DateTime<Utc>,
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    /// Stable external identifier: the phone number stripped to digits
    pub subject_id: String,

    /// Normalized phone identifier the code was bound to
    pub phone: String,
}
