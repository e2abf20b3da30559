//! User snapshot consumed by the notification fan-out.

use serde::{Deserialize, Serialize};

use sendy_shared::phone::mask_phone;

/// Role of a user in the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A customer placing orders
    Client,
    /// A restaurant fulfilling orders
    Restaurant,
    /// A delivery person carrying orders
    Delivery,
    /// Back-office administrator
    Admin,
}

/// Moderation approval state of a registered account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Structured snapshot of a persisted user document.
///
/// The persisted documents carry loosely populated fields; every field the
/// fan-out reads by name is an explicit optional here, with fallback rules
/// documented on the accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    /// User identifier
    pub id: String,

    /// Role of the account
    pub role: UserRole,

    /// Moderation approval state
    pub approval: ApprovalStatus,

    /// Contact phone number (E.164)
    pub phone: Option<String>,

    /// Business name, present on restaurant accounts
    pub business_name: Option<String>,

    /// Personal display name
    pub display_name: Option<String>,

    /// City the account operates in; used to match delivery users to
    /// restaurants
    pub city: Option<String>,

    /// Registered push notification token, if the device registered one
    pub push_token: Option<String>,

    /// Whether a profile-image change is awaiting moderation
    pub has_pending_image_change: bool,
}

impl UserSnapshot {
    /// Display label for alert templates.
    ///
    /// Falls back through `business_name`, then `display_name`, then the
    /// masked phone number, then a fixed placeholder.
    pub fn display_label(&self) -> String {
        if let Some(name) = self.business_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        if let Some(name) = self.display_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.is_empty()) {
            return mask_phone(phone);
        }
        "Unknown".to_string()
    }

    /// Whether this account is an approved delivery user
    pub fn is_approved_delivery(&self) -> bool {
        self.role == UserRole::Delivery && self.approval == ApprovalStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> UserSnapshot {
        UserSnapshot {
            id: "u1".to_string(),
            role: UserRole::Restaurant,
            approval: ApprovalStatus::Pending,
            phone: Some("+212600000000".to_string()),
            business_name: Some("Chez Fatima".to_string()),
            display_name: Some("Fatima".to_string()),
            city: Some("Casablanca".to_string()),
            push_token: None,
            has_pending_image_change: false,
        }
    }

    #[test]
    fn test_display_label_prefers_business_name() {
        assert_eq!(snapshot().display_label(), "Chez Fatima");
    }

    #[test]
    fn test_display_label_falls_back_to_display_name() {
        let mut user = snapshot();
        user.business_name = None;
        assert_eq!(user.display_label(), "Fatima");

        user.business_name = Some(String::new());
        assert_eq!(user.display_label(), "Fatima");
    }

    #[test]
    fn test_display_label_falls_back_to_masked_phone() {
        let mut user = snapshot();
        user.business_name = None;
        user.display_name = None;
        let label = user.display_label();
        assert!(label.starts_with("+212"));
        assert!(label.contains('*'));
    }

    #[test]
    fn test_display_label_placeholder() {
        let mut user = snapshot();
        user.business_name = None;
        user.display_name = None;
        user.phone = None;
        assert_eq!(user.display_label(), "Unknown");
    }

    #[test]
    fn test_is_approved_delivery() {
        let mut user = snapshot();
        assert!(!user.is_approved_delivery());

        user.role = UserRole::Delivery;
        assert!(!user.is_approved_delivery());

        user.approval = ApprovalStatus::Approved;
        assert!(user.is_approved_delivery());
    }
}
