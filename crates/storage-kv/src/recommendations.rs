use async_trait::async_trait;
use folioadvisor_core::recommendations::{
    sort_most_recent_first, AllocationPlan, Recommendation, RecommendationRepositoryTrait,
};
use folioadvisor_core::utils::time_utils::now_utc;
use folioadvisor_core::Result;

use crate::documents::{self, SharedKv};
use crate::keys;

pub struct KvRecommendationRepository {
    kv: SharedKv,
}

impl KvRecommendationRepository {
    pub fn new(kv: SharedKv) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl RecommendationRepositoryTrait for KvRecommendationRepository {
    async fn create_recommendation(
        &self,
        user_id: i64,
        plan: AllocationPlan,
    ) -> Result<Recommendation> {
        documents::require_user(&self.kv, user_id).await?;
        let id = self.kv.incr(keys::RECOMMENDATION_COUNTER).await?;
        let recommendation = Recommendation::from_plan(id, user_id, plan, now_utc());
        documents::write(&self.kv, &keys::recommendation(id), &recommendation).await?;

        let member = id.to_string();
        self.kv.sadd(keys::RECOMMENDATIONS_ALL, &member).await?;
        self.kv
            .sadd(&keys::recommendations_of_user(user_id), &member)
            .await?;
        Ok(recommendation)
    }

    async fn get_recommendation(&self, recommendation_id: i64) -> Result<Option<Recommendation>> {
        documents::read(&self.kv, &keys::recommendation(recommendation_id)).await
    }

    async fn list_recommendations_by_user_id(&self, user_id: i64) -> Result<Vec<Recommendation>> {
        let mut items = documents::read_all(
            &self.kv,
            &keys::recommendations_of_user(user_id),
            keys::recommendation,
        )
        .await?;
        sort_most_recent_first(&mut items);
        Ok(items)
    }

    async fn list_recommendations(&self) -> Result<Vec<Recommendation>> {
        documents::read_all(&self.kv, keys::RECOMMENDATIONS_ALL, keys::recommendation).await
    }
}
