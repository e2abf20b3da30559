//! Unit tests for the notification fan-out

mod mocks;
mod order_tests;
