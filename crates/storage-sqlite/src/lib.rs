//! SQLite storage implementation for the portfolio advisor.
//!
//! Implements the repository traits from `folioadvisor-core` with Diesel on
//! top of an r2d2 pool. Reads go straight to the pool; every write is funneled
//! through a single writer task so SQLite never sees two writers at once.
//!
//! ```text
//!   core (domain traits)
//!          │
//!          ▼
//!   storage-sqlite (this crate) ──► SQLite file (WAL)
//! ```

pub mod db;
pub mod errors;
pub mod schema;

pub mod profiles;
pub mod projects;
pub mod recommendations;
pub mod users;

use std::sync::Arc;

use folioadvisor_core::RecordStore;
use log::info;

pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};
pub use errors::{IntoCore, StorageError};
pub use folioadvisor_core::errors::{DatabaseError, Error, Result};

use profiles::ProfileRepository;
use projects::ProjectRepository;
use recommendations::RecommendationRepository;
use users::UserRepository;

/// Opens (creating if needed) the database at `db_path`, applies pending
/// migrations and returns a `RecordStore` backed by it.
///
/// Must be called from within a Tokio runtime; the writer task is spawned on it.
pub fn open_record_store(db_path: &str) -> Result<RecordStore> {
    let db_path = init(db_path)?;
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone())?;
    info!("SQLite record store ready at {}", db_path);

    Ok(RecordStore::new(
        Arc::new(UserRepository::new(Arc::clone(&pool), writer.clone())),
        Arc::new(ProfileRepository::new(Arc::clone(&pool), writer.clone())),
        Arc::new(ProjectRepository::new(Arc::clone(&pool), writer.clone())),
        Arc::new(RecommendationRepository::new(pool, writer)),
    ))
}
