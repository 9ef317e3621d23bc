use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use folioadvisor_core::profiles::{Profile, ProfileInput};
use serde::Serialize;

use super::ApiJson;
use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
struct ProfileResponse {
    profile: Option<Profile>,
}

#[derive(Serialize)]
struct SaveProfileResponse {
    success: bool,
    profile: Profile,
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state.profile_service.get_profile(user.user_id).await?;
    Ok(Json(ProfileResponse { profile }))
}

async fn save_profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ApiJson(input): ApiJson<ProfileInput>,
) -> ApiResult<Json<SaveProfileResponse>> {
    let data = input.validate()?;
    let profile = state.profile_service.save_profile(user.user_id, data).await?;
    Ok(Json(SaveProfileResponse {
        success: true,
        profile,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/profile", get(get_profile).post(save_profile))
}
