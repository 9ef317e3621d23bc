use async_trait::async_trait;

use crate::errors::Result;
use crate::projects::projects_model::{NewProject, Project, ProjectUpdate};

/// Trait for project repository operations.
///
/// Missing identifiers are reported through `None` / `false`, never as errors.
#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    async fn create_project(&self, new_project: NewProject) -> Result<Project>;
    async fn get_project(&self, project_id: i64) -> Result<Option<Project>>;
    async fn list_projects(&self) -> Result<Vec<Project>>;
    async fn update_project(&self, project_id: i64, update: ProjectUpdate)
        -> Result<Option<Project>>;
    async fn delete_project(&self, project_id: i64) -> Result<bool>;
}

/// Trait for project service operations.
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    async fn get_projects(&self) -> Result<Vec<Project>>;
    async fn create_project(&self, new_project: NewProject) -> Result<Project>;
    async fn update_project(&self, project_id: i64, update: ProjectUpdate)
        -> Result<Option<Project>>;
    async fn delete_project(&self, project_id: i64) -> Result<bool>;
}
