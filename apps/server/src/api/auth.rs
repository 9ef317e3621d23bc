use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use folioadvisor_core::{
    profiles::Profile,
    users::{LoginInput, RegisterInput, UserSummary},
};
use serde::Serialize;

use super::ApiJson;
use crate::{
    auth::{hash_password, verify_against_dummy, verify_password},
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub const BAD_CREDENTIALS: &str = "用户名或密码错误";

#[derive(Serialize)]
struct RegisterResponse {
    success: bool,
    token: String,
    user: UserSummary,
}

#[derive(Serialize)]
struct SessionUser {
    id: i64,
    username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<Profile>,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
    token: String,
    user: SessionUser,
}

async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<RegisterInput>,
) -> ApiResult<Json<RegisterResponse>> {
    input.validate()?;
    let password_hash = hash_password(input.password).await?;
    let user = state
        .user_service
        .register_user(&input.username, password_hash)
        .await?;
    let token = state.credentials.issue_token(user.id, &user.username)?;
    tracing::info!(user_id = user.id, "User registered");

    Ok(Json(RegisterResponse {
        success: true,
        token,
        user: UserSummary::from(&user),
    }))
}

async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<LoginInput>,
) -> ApiResult<Json<LoginResponse>> {
    input.validate()?;
    let Some(user) = state.user_service.find_by_username(&input.username).await? else {
        verify_against_dummy(input.password).await;
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS.to_string()));
    };
    if !verify_password(input.password, user.password_hash.clone()).await {
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    let token = state.credentials.issue_token(user.id, &user.username)?;
    let profile = state.profile_service.get_profile(user.id).await?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        user: SessionUser {
            id: user.id,
            username: user.username,
            profile,
        },
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}
