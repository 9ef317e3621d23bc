//! The record store: one handle over the four entity repositories.
//!
//! Each storage backend builds a `RecordStore` from its own repository
//! implementations. Callers never learn which backend they are talking to.

use std::sync::Arc;

use crate::profiles::ProfileRepositoryTrait;
use crate::projects::ProjectRepositoryTrait;
use crate::recommendations::RecommendationRepositoryTrait;
use crate::users::UserRepositoryTrait;

#[derive(Clone)]
pub struct RecordStore {
    pub users: Arc<dyn UserRepositoryTrait>,
    pub profiles: Arc<dyn ProfileRepositoryTrait>,
    pub projects: Arc<dyn ProjectRepositoryTrait>,
    pub recommendations: Arc<dyn RecommendationRepositoryTrait>,
}

impl RecordStore {
    pub fn new(
        users: Arc<dyn UserRepositoryTrait>,
        profiles: Arc<dyn ProfileRepositoryTrait>,
        projects: Arc<dyn ProjectRepositoryTrait>,
        recommendations: Arc<dyn RecommendationRepositoryTrait>,
    ) -> Self {
        Self {
            users,
            profiles,
            projects,
            recommendations,
        }
    }
}
