//! Domain layer containing entities and snapshots consumed by the services.

pub mod entities;

pub use entities::*;
