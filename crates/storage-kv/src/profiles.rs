use async_trait::async_trait;
use folioadvisor_core::profiles::{Profile, ProfileData, ProfileRepositoryTrait};
use folioadvisor_core::utils::time_utils::now_utc;
use folioadvisor_core::Result;
use log::{debug, warn};

use crate::documents::{self, SharedKv};
use crate::keys;

pub struct KvProfileRepository {
    kv: SharedKv,
}

impl KvProfileRepository {
    pub fn new(kv: SharedKv) -> Self {
        Self { kv }
    }

    /// Returns the id of the user's profile, allocating one on first save.
    /// Concurrent first saves race on SETNX; losers adopt the winner's id.
    async fn profile_id_for(&self, user_id: i64) -> Result<i64> {
        let index = keys::profile_of_user(user_id);
        if let Some(id) = documents::read_id(&self.kv, &index).await? {
            return Ok(id);
        }

        let candidate = self.kv.incr(keys::PROFILE_COUNTER).await?;
        if self.kv.set_nx(&index, &candidate.to_string()).await? {
            if let Err(err) = self
                .kv
                .sadd(keys::PROFILES_ALL, &candidate.to_string())
                .await
            {
                // Unclaim so the next save allocates again and lists it.
                if let Err(cleanup) = self.kv.del(&index).await {
                    warn!(
                        "Failed to release profile index for user {}: {}",
                        user_id, cleanup
                    );
                }
                return Err(err);
            }
            return Ok(candidate);
        }

        debug!("Lost first-save race for user {}", user_id);
        documents::read_id(&self.kv, &index).await?.ok_or_else(|| {
            folioadvisor_core::Error::Unexpected(format!(
                "profile index for user {user_id} vanished"
            ))
        })
    }
}

#[async_trait]
impl ProfileRepositoryTrait for KvProfileRepository {
    async fn upsert_profile(&self, user_id: i64, data: ProfileData) -> Result<Profile> {
        documents::require_user(&self.kv, user_id).await?;
        let id = self.profile_id_for(user_id).await?;
        let profile = Profile {
            id,
            user_id,
            risk_preference: data.risk_preference,
            investment_amount: data.investment_amount,
            investment_period: data.investment_period,
            investment_goal: data.investment_goal,
            updated_at: now_utc(),
        };
        documents::write(&self.kv, &keys::profile(id), &profile).await?;
        Ok(profile)
    }

    async fn get_profile(&self, profile_id: i64) -> Result<Option<Profile>> {
        documents::read(&self.kv, &keys::profile(profile_id)).await
    }

    async fn get_profile_by_user_id(&self, user_id: i64) -> Result<Option<Profile>> {
        match documents::read_id(&self.kv, &keys::profile_of_user(user_id)).await? {
            Some(id) => self.get_profile(id).await,
            None => Ok(None),
        }
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        documents::read_all(&self.kv, keys::PROFILES_ALL, keys::profile).await
    }
}
