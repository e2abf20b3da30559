//! Collaborator traits for external stores and directories.
//!
//! These traits define the abstraction boundary between the domain services
//! and the persistent document store. Implementations live in the
//! infrastructure layer; the services are generic over them so tests can
//! inject in-memory fakes.

mod config_source;
mod delivery_log;
mod user_directory;
mod verification_store;

pub use config_source::ConfigSource;
pub use delivery_log::DeliveryLog;
pub use user_directory::UserDirectory;
pub use verification_store::VerificationStore;
