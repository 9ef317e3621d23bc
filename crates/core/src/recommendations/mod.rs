//! Recommendations module - persisted allocation plans.

mod recommendations_model;
mod recommendations_service;
mod recommendations_traits;

pub use recommendations_model::{
    sort_most_recent_first, AllocationPlan, ProjectAllocation, Recommendation,
};
pub use recommendations_service::RecommendationService;
pub use recommendations_traits::{RecommendationRepositoryTrait, RecommendationServiceTrait};
