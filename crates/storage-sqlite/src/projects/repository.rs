use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use folioadvisor_core::projects::{NewProject, Project, ProjectRepositoryTrait, ProjectUpdate};
use folioadvisor_core::utils::time_utils::{format_timestamp, now_utc};
use folioadvisor_core::Result;

use super::model::{NewProjectDB, ProjectChangesDB, ProjectDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::projects;

pub struct ProjectRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProjectRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProjectRepository { pool, writer }
    }
}

#[async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let row = NewProjectDB::new(new_project, format_timestamp(&now_utc()));
                diesel::insert_into(projects::table)
                    .values(&row)
                    .returning(ProjectDB::as_returning())
                    .get_result(conn)
                    .into_core()?
                    .try_into()
            })
            .await
    }

    async fn get_project(&self, project_id: i64) -> Result<Option<Project>> {
        let mut conn = get_connection(&self.pool)?;
        projects::table
            .find(project_id)
            .select(ProjectDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Project::try_from)
            .transpose()
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let mut conn = get_connection(&self.pool)?;
        projects::table
            .order(projects::id.asc())
            .select(ProjectDB::as_select())
            .load(&mut conn)
            .into_core()?
            .into_iter()
            .map(Project::try_from)
            .collect()
    }

    async fn update_project(
        &self,
        project_id: i64,
        update: ProjectUpdate,
    ) -> Result<Option<Project>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Project>> {
                let existing = projects::table
                    .find(project_id)
                    .select(ProjectDB::as_select())
                    .first(conn)
                    .optional()
                    .into_core()?;
                let Some(existing) = existing else {
                    return Ok(None);
                };

                let mut project = Project::try_from(existing)?;
                update.apply_to(&mut project);
                project.updated_at = now_utc();

                diesel::update(projects::table.find(project_id))
                    .set(&ProjectChangesDB::from(&project))
                    .execute(conn)
                    .into_core()?;
                Ok(Some(project))
            })
            .await
    }

    async fn delete_project(&self, project_id: i64) -> Result<bool> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let affected = diesel::delete(projects::table.find(project_id))
                    .execute(conn)
                    .into_core()?;
                Ok(affected > 0)
            })
            .await
    }
}
