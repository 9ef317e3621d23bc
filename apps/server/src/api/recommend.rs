use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use folioadvisor_ai::{AiError, ProviderCredentials};
use folioadvisor_core::recommendations::{AllocationPlan, Recommendation};
use serde::{Deserialize, Serialize};

use super::ApiJson;
use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub const PROFILE_REQUIRED: &str = "请先完善投资画像";
pub const CATALOG_EMPTY: &str = "项目库为空，无法生成推荐";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendRequest {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    save_to_history: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendResponse {
    success: bool,
    recommendation: AllocationPlan,
    saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_id: Option<i64>,
}

#[derive(Serialize)]
struct HistoryResponse {
    success: bool,
    recommendations: Vec<Recommendation>,
}

async fn recommend(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ApiJson(req): ApiJson<RecommendRequest>,
) -> ApiResult<Json<RecommendResponse>> {
    let api_key = req
        .api_key
        .filter(|k| !k.trim().is_empty())
        .ok_or(ApiError::Ai(AiError::MissingApiKey))?;

    let profile = state
        .profile_service
        .get_profile(user.user_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest(PROFILE_REQUIRED.to_string()))?;

    let catalog = state.project_service.get_projects().await?;
    if catalog.is_empty() {
        return Err(ApiError::BadRequest(CATALOG_EMPTY.to_string()));
    }

    let credentials = ProviderCredentials {
        api_key,
        api_url: req.api_url.filter(|u| !u.trim().is_empty()),
    };
    let plan = state
        .generator
        .generate(&profile, &catalog, &credentials)
        .await?;

    let saved_id = if req.save_to_history {
        let saved = state
            .recommendation_service
            .save_to_history(user.user_id, plan.clone())
            .await?;
        Some(saved.id)
    } else {
        None
    };

    Ok(Json(RecommendResponse {
        success: true,
        recommendation: plan,
        saved: saved_id.is_some(),
        saved_id,
    }))
}

async fn history(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<Json<HistoryResponse>> {
    let recommendations = state.recommendation_service.get_history(user.user_id).await?;
    Ok(Json(HistoryResponse {
        success: true,
        recommendations,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommend", post(recommend))
        .route("/history", get(history))
}
