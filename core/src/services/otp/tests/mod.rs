//! Unit tests for the OTP engine
