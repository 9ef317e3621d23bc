//! Recommendation domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of an allocation plan. Embedded in its recommendation, never
/// stored on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAllocation {
    pub project_id: i64,
    /// Denormalized so history survives catalog edits and deletions.
    pub project_name: String,
    pub allocation_type: String,
    /// Percent of the invested amount.
    pub allocation_ratio: f64,
    /// Percentage points contributed to the overall expected return.
    pub expected_return_contribution: f64,
    pub risk_warning: String,
}

/// A generated distribution of capital across catalog projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPlan {
    pub overall_expected_return: f64,
    /// 1 (lowest) to 5 (highest)
    pub overall_risk_level: i32,
    /// 0 to 100
    pub match_score: f64,
    pub project_allocations: Vec<ProjectAllocation>,
    pub reasoning: String,
}

impl AllocationPlan {
    /// Sum of allocation ratios, in percent.
    pub fn total_ratio(&self) -> f64 {
        self.project_allocations
            .iter()
            .map(|a| a.allocation_ratio)
            .sum()
    }
}

/// A persisted allocation plan. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i64,
    pub user_id: i64,
    pub overall_expected_return: f64,
    pub overall_risk_level: i32,
    pub match_score: f64,
    pub project_allocations: Vec<ProjectAllocation>,
    pub reasoning: String,
    pub created_at: DateTime<Utc>,
}

impl Recommendation {
    pub fn from_plan(id: i64, user_id: i64, plan: AllocationPlan, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            overall_expected_return: plan.overall_expected_return,
            overall_risk_level: plan.overall_risk_level,
            match_score: plan.match_score,
            project_allocations: plan.project_allocations,
            reasoning: plan.reasoning,
            created_at,
        }
    }

    pub fn plan(&self) -> AllocationPlan {
        AllocationPlan {
            overall_expected_return: self.overall_expected_return,
            overall_risk_level: self.overall_risk_level,
            match_score: self.match_score,
            project_allocations: self.project_allocations.clone(),
            reasoning: self.reasoning.clone(),
        }
    }
}

/// Most recent first; identifier breaks timestamp ties.
pub fn sort_most_recent_first(items: &mut [Recommendation]) {
    items.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
