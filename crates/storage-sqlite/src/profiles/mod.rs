//! SQLite storage implementation for investment profiles.

mod model;
mod repository;

pub use model::{NewProfileDB, ProfileDB};
pub(crate) use model::parse_label;
pub use repository::ProfileRepository;
