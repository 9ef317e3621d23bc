//! Users module - domain models, services, and traits.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{
    LoginInput, NewUser, RegisterInput, User, UserSummary, PASSWORD_MAX_CHARS,
    PASSWORD_MIN_CHARS, USERNAME_MAX_CHARS, USERNAME_MIN_CHARS,
};
pub use users_service::{UserService, USERNAME_TAKEN};
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
