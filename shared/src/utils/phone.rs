//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

/// Normalize a phone number by removing whitespace and formatting characters,
/// keeping digits and a leading `+`
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Derive the stable external identifier for a verified phone number by
/// stripping every non-digit character
pub fn subject_id(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check if a phone number is valid international E.164 format
pub fn is_valid_phone(phone: &str) -> bool {
    INTERNATIONAL_PHONE_REGEX.is_match(&normalize_phone_number(phone))
}

/// Mask a phone number for logging, keeping the prefix and last two digits
pub fn mask_phone(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() <= 6 {
        return "*".repeat(normalized.len());
    }
    let prefix = &normalized[..4];
    let suffix = &normalized[normalized.len() - 2..];
    format!("{}{}{}", prefix, "*".repeat(normalized.len() - 6), suffix)
}
