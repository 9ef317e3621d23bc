//! Projects module - the shared investment catalog.

mod projects_model;
mod projects_service;
mod projects_traits;

pub use projects_model::{
    NewProject, Project, ProjectInput, ProjectType, ProjectUpdate, MAX_EXPECTED_RETURN,
    MAX_INVESTMENT_THRESHOLD, PROJECT_NAME_MAX_CHARS,
};
pub use projects_service::ProjectService;
pub use projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
