//! Database models for projects.

use diesel::prelude::*;
use folioadvisor_core::projects::{NewProject, Project};
use folioadvisor_core::utils::time_utils::{format_timestamp, parse_timestamp};
use folioadvisor_core::{Error, Result};

use crate::profiles::parse_label;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProjectDB {
    pub id: i64,
    pub name: String,
    pub project_type: String,
    pub risk_level: i32,
    pub expected_return: f64,
    pub investment_threshold: f64,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::projects)]
pub struct NewProjectDB {
    pub name: String,
    pub project_type: String,
    pub risk_level: i32,
    pub expected_return: f64,
    pub investment_threshold: f64,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Mutable columns of a project, written after merging a partial update.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::projects)]
pub struct ProjectChangesDB {
    pub name: String,
    pub project_type: String,
    pub risk_level: i32,
    pub expected_return: f64,
    pub investment_threshold: f64,
    pub description: Option<String>,
    pub updated_at: String,
}

impl NewProjectDB {
    pub fn new(domain: NewProject, now: String) -> Self {
        Self {
            name: domain.name,
            project_type: domain.project_type.as_str().to_string(),
            risk_level: domain.risk_level,
            expected_return: domain.expected_return,
            investment_threshold: domain.investment_threshold,
            description: domain.description,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl From<&Project> for ProjectChangesDB {
    fn from(p: &Project) -> Self {
        Self {
            name: p.name.clone(),
            project_type: p.project_type.as_str().to_string(),
            risk_level: p.risk_level,
            expected_return: p.expected_return,
            investment_threshold: p.investment_threshold,
            description: p.description.clone(),
            updated_at: format_timestamp(&p.updated_at),
        }
    }
}

impl TryFrom<ProjectDB> for Project {
    type Error = Error;

    fn try_from(db: ProjectDB) -> Result<Self> {
        Ok(Self {
            id: db.id,
            name: db.name,
            project_type: parse_label(&db.project_type)?,
            risk_level: db.risk_level,
            expected_return: db.expected_return,
            investment_threshold: db.investment_threshold,
            description: db.description,
            created_at: parse_timestamp(&db.created_at)?,
            updated_at: parse_timestamp(&db.updated_at)?,
        })
    }
}
