//! Database models for recommendations.
//!
//! Allocation lines are embedded in their recommendation as a JSON array.

use diesel::prelude::*;
use folioadvisor_core::recommendations::{AllocationPlan, ProjectAllocation, Recommendation};
use folioadvisor_core::utils::time_utils::parse_timestamp;
use folioadvisor_core::{Error, Result};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::recommendations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecommendationDB {
    pub id: i64,
    pub user_id: i64,
    pub overall_expected_return: f64,
    pub overall_risk_level: i32,
    pub match_score: f64,
    pub project_allocations: String,
    pub reasoning: String,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::recommendations)]
pub struct NewRecommendationDB {
    pub user_id: i64,
    pub overall_expected_return: f64,
    pub overall_risk_level: i32,
    pub match_score: f64,
    pub project_allocations: String,
    pub reasoning: String,
    pub created_at: String,
}

impl NewRecommendationDB {
    pub fn new(user_id: i64, plan: AllocationPlan, created_at: String) -> Result<Self> {
        Ok(Self {
            user_id,
            overall_expected_return: plan.overall_expected_return,
            overall_risk_level: plan.overall_risk_level,
            match_score: plan.match_score,
            project_allocations: serde_json::to_string(&plan.project_allocations)?,
            reasoning: plan.reasoning,
            created_at,
        })
    }
}

impl TryFrom<RecommendationDB> for Recommendation {
    type Error = Error;

    fn try_from(db: RecommendationDB) -> Result<Self> {
        let allocations: Vec<ProjectAllocation> = serde_json::from_str(&db.project_allocations)?;
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            overall_expected_return: db.overall_expected_return,
            overall_risk_level: db.overall_risk_level,
            match_score: db.match_score,
            project_allocations: allocations,
            reasoning: db.reasoning,
            created_at: parse_timestamp(&db.created_at)?,
        })
    }
}
