//! SQLite storage implementation for recommendation history.

mod model;
mod repository;

pub use model::{NewRecommendationDB, RecommendationDB};
pub use repository::RecommendationRepository;
