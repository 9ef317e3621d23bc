use async_trait::async_trait;

use crate::errors::Result;
use crate::recommendations::recommendations_model::{AllocationPlan, Recommendation};

/// Trait for recommendation repository operations. Recommendations are
/// append-only: there is no update or delete.
#[async_trait]
pub trait RecommendationRepositoryTrait: Send + Sync {
    async fn create_recommendation(
        &self,
        user_id: i64,
        plan: AllocationPlan,
    ) -> Result<Recommendation>;
    async fn get_recommendation(&self, recommendation_id: i64) -> Result<Option<Recommendation>>;
    /// Always most recent first.
    async fn list_recommendations_by_user_id(&self, user_id: i64) -> Result<Vec<Recommendation>>;
    async fn list_recommendations(&self) -> Result<Vec<Recommendation>>;
}

/// Trait for recommendation history operations.
#[async_trait]
pub trait RecommendationServiceTrait: Send + Sync {
    async fn save_to_history(&self, user_id: i64, plan: AllocationPlan)
        -> Result<Recommendation>;
    async fn get_history(&self, user_id: i64) -> Result<Vec<Recommendation>>;
}
