use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use folioadvisor_core::recommendations::{
    AllocationPlan, Recommendation, RecommendationRepositoryTrait,
};
use folioadvisor_core::utils::time_utils::{format_timestamp, now_utc};
use folioadvisor_core::Result;

use super::model::{NewRecommendationDB, RecommendationDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::recommendations;

pub struct RecommendationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RecommendationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        RecommendationRepository { pool, writer }
    }
}

#[async_trait]
impl RecommendationRepositoryTrait for RecommendationRepository {
    async fn create_recommendation(
        &self,
        user_id: i64,
        plan: AllocationPlan,
    ) -> Result<Recommendation> {
        let row = NewRecommendationDB::new(user_id, plan, format_timestamp(&now_utc()))?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Recommendation> {
                diesel::insert_into(recommendations::table)
                    .values(&row)
                    .returning(RecommendationDB::as_returning())
                    .get_result(conn)
                    .into_core()?
                    .try_into()
            })
            .await
    }

    async fn get_recommendation(&self, recommendation_id: i64) -> Result<Option<Recommendation>> {
        let mut conn = get_connection(&self.pool)?;
        recommendations::table
            .find(recommendation_id)
            .select(RecommendationDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Recommendation::try_from)
            .transpose()
    }

    async fn list_recommendations_by_user_id(&self, user_id: i64) -> Result<Vec<Recommendation>> {
        let mut conn = get_connection(&self.pool)?;
        // Fixed-width timestamps sort lexically in time order.
        recommendations::table
            .filter(recommendations::user_id.eq(user_id))
            .order((recommendations::created_at.desc(), recommendations::id.desc()))
            .select(RecommendationDB::as_select())
            .load(&mut conn)
            .into_core()?
            .into_iter()
            .map(Recommendation::try_from)
            .collect()
    }

    async fn list_recommendations(&self) -> Result<Vec<Recommendation>> {
        let mut conn = get_connection(&self.pool)?;
        recommendations::table
            .order(recommendations::id.asc())
            .select(RecommendationDB::as_select())
            .load(&mut conn)
            .into_core()?
            .into_iter()
            .map(Recommendation::try_from)
            .collect()
    }
}
