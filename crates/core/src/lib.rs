//! Folio Advisor Core - domain entities, services, and repository traits.
//!
//! This crate is storage-agnostic. It defines the repository traits that the
//! `storage-sqlite` and `storage-kv` crates implement, plus the services the
//! HTTP layer drives.

pub mod errors;
pub mod profiles;
pub mod projects;
pub mod recommendations;
pub mod store;
pub mod users;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use store::RecordStore;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
