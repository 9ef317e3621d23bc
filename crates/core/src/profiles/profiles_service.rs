use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::profiles_model::{Profile, ProfileData};
use super::profiles_traits::{ProfileRepositoryTrait, ProfileServiceTrait};
use crate::errors::Result;

pub struct ProfileService {
    repository: Arc<dyn ProfileRepositoryTrait>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn ProfileRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProfileServiceTrait for ProfileService {
    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>> {
        self.repository.get_profile_by_user_id(user_id).await
    }

    async fn save_profile(&self, user_id: i64, data: ProfileData) -> Result<Profile> {
        let profile = self.repository.upsert_profile(user_id, data).await?;
        debug!("Saved profile {} for user {}", profile.id, user_id);
        Ok(profile)
    }
}
