use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::projects_model::{NewProject, Project, ProjectUpdate};
use super::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
use crate::errors::Result;

pub struct ProjectService {
    repository: Arc<dyn ProjectRepositoryTrait>,
}

impl ProjectService {
    pub fn new(repository: Arc<dyn ProjectRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProjectServiceTrait for ProjectService {
    async fn get_projects(&self) -> Result<Vec<Project>> {
        self.repository.list_projects().await
    }

    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        let project = self.repository.create_project(new_project).await?;
        info!("Created project {} ({})", project.id, project.name);
        Ok(project)
    }

    async fn update_project(
        &self,
        project_id: i64,
        update: ProjectUpdate,
    ) -> Result<Option<Project>> {
        let updated = self.repository.update_project(project_id, update).await?;
        if updated.is_none() {
            debug!("Update skipped, project {} does not exist", project_id);
        }
        Ok(updated)
    }

    async fn delete_project(&self, project_id: i64) -> Result<bool> {
        let deleted = self.repository.delete_project(project_id).await?;
        if deleted {
            info!("Deleted project {}", project_id);
        }
        Ok(deleted)
    }
}
