use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use folioadvisor_core::projects::{Project, ProjectInput, ProjectUpdate};
use serde::Serialize;

use super::ApiJson;
use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub const PROJECT_NOT_FOUND: &str = "项目不存在";

#[derive(Serialize)]
struct ProjectListResponse {
    success: bool,
    projects: Vec<Project>,
}

#[derive(Serialize)]
struct ProjectResponse {
    success: bool,
    project: Project,
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
    message: &'static str,
}

fn not_found() -> ApiError {
    ApiError::NotFound(PROJECT_NOT_FOUND.to_string())
}

/// Ids that are not integers cannot name a project.
fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| not_found())
}

async fn list_projects(State(state): State<Arc<AppState>>) -> ApiResult<Json<ProjectListResponse>> {
    let projects = state.project_service.get_projects().await?;
    Ok(Json(ProjectListResponse {
        success: true,
        projects,
    }))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ApiJson(input): ApiJson<ProjectInput>,
) -> ApiResult<Json<ProjectResponse>> {
    let new_project = input.validate()?;
    let project = state.project_service.create_project(new_project).await?;
    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

async fn update_project(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<ProjectInput>,
) -> ApiResult<Json<ProjectResponse>> {
    let id = parse_id(&id)?;
    // The body carries every field; absent descriptions keep the stored one.
    let update = ProjectUpdate::from(input.validate()?);
    let project = state
        .project_service
        .update_project(id, update)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

async fn delete_project(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_id(&id)?;
    if !state.project_service.delete_project(id).await? {
        return Err(not_found());
    }
    Ok(Json(DeleteResponse {
        success: true,
        message: "项目已删除",
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", put(update_project).delete(delete_project))
}
