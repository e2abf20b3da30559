//! Shared utilities and common types for the Sendy server
//!
//! This crate provides functionality used across all server modules:
//! - Policy and provider configuration types
//! - Phone number utilities (normalization, validation, masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AdminConfig, OtpPolicy, PolicyConfig, SmsProviderConfig};
pub use utils::phone;
