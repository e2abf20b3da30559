//! Policy configuration provider with a time-bounded cache.

mod provider;


pub use provider::{PolicyProvider, DEFAULT_CACHE_TTL};
