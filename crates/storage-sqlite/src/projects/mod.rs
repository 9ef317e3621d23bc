//! SQLite storage implementation for the project catalog.

mod model;
mod repository;

pub use model::{NewProjectDB, ProjectChangesDB, ProjectDB};
pub use repository::ProjectRepository;
