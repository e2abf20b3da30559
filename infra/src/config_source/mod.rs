//! Policy configuration sources

mod env;

pub use env::{EnvConfigSource, StaticConfigSource};
