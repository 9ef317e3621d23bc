use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::recommendations_model::{AllocationPlan, Recommendation};
use super::recommendations_traits::{RecommendationRepositoryTrait, RecommendationServiceTrait};
use crate::errors::Result;

pub struct RecommendationService {
    repository: Arc<dyn RecommendationRepositoryTrait>,
}

impl RecommendationService {
    pub fn new(repository: Arc<dyn RecommendationRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RecommendationServiceTrait for RecommendationService {
    async fn save_to_history(
        &self,
        user_id: i64,
        plan: AllocationPlan,
    ) -> Result<Recommendation> {
        let saved = self.repository.create_recommendation(user_id, plan).await?;
        info!("Saved recommendation {} for user {}", saved.id, user_id);
        Ok(saved)
    }

    async fn get_history(&self, user_id: i64) -> Result<Vec<Recommendation>> {
        self.repository.list_recommendations_by_user_id(user_id).await
    }
}
