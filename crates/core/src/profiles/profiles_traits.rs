use async_trait::async_trait;

use crate::errors::Result;
use crate::profiles::profiles_model::{Profile, ProfileData};

/// Trait for profile repository operations.
#[async_trait]
pub trait ProfileRepositoryTrait: Send + Sync {
    /// Creates the user's profile or overwrites it in place.
    ///
    /// The identifier assigned on first save is kept by every later save, and
    /// concurrent first saves for one user never produce two rows.
    async fn upsert_profile(&self, user_id: i64, data: ProfileData) -> Result<Profile>;
    async fn get_profile(&self, profile_id: i64) -> Result<Option<Profile>>;
    async fn get_profile_by_user_id(&self, user_id: i64) -> Result<Option<Profile>>;
    async fn list_profiles(&self) -> Result<Vec<Profile>>;
}

/// Trait for profile service operations.
#[async_trait]
pub trait ProfileServiceTrait: Send + Sync {
    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>>;
    async fn save_profile(&self, user_id: i64, data: ProfileData) -> Result<Profile>;
}
