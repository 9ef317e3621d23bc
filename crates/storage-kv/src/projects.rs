use async_trait::async_trait;
use folioadvisor_core::projects::{NewProject, Project, ProjectRepositoryTrait, ProjectUpdate};
use folioadvisor_core::utils::time_utils::now_utc;
use folioadvisor_core::Result;

use crate::documents::{self, SharedKv};
use crate::keys;

pub struct KvProjectRepository {
    kv: SharedKv,
}

impl KvProjectRepository {
    pub fn new(kv: SharedKv) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl ProjectRepositoryTrait for KvProjectRepository {
    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        let id = self.kv.incr(keys::PROJECT_COUNTER).await?;
        let now = now_utc();
        let project = Project {
            id,
            name: new_project.name,
            project_type: new_project.project_type,
            risk_level: new_project.risk_level,
            expected_return: new_project.expected_return,
            investment_threshold: new_project.investment_threshold,
            description: new_project.description,
            created_at: now,
            updated_at: now,
        };
        documents::write(&self.kv, &keys::project(id), &project).await?;
        self.kv.sadd(keys::PROJECTS_ALL, &id.to_string()).await?;
        Ok(project)
    }

    async fn get_project(&self, project_id: i64) -> Result<Option<Project>> {
        documents::read(&self.kv, &keys::project(project_id)).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        documents::read_all(&self.kv, keys::PROJECTS_ALL, keys::project).await
    }

    async fn update_project(
        &self,
        project_id: i64,
        update: ProjectUpdate,
    ) -> Result<Option<Project>> {
        let Some(mut project) = self.get_project(project_id).await? else {
            return Ok(None);
        };
        update.apply_to(&mut project);
        project.updated_at = now_utc();

        // SET XX: a project deleted since the read stays deleted.
        let raw = serde_json::to_string(&project)?;
        if self
            .kv
            .set_existing(&keys::project(project_id), &raw)
            .await?
        {
            Ok(Some(project))
        } else {
            Ok(None)
        }
    }

    async fn delete_project(&self, project_id: i64) -> Result<bool> {
        let existed = self.kv.del(&keys::project(project_id)).await?;
        self.kv
            .srem(keys::PROJECTS_ALL, &project_id.to_string())
            .await?;
        Ok(existed)
    }
}
