//! Key layout.
//!
//! Records are JSON documents under `<entity>:<id>`. Each entity keeps a set
//! of its ids under `<entity>s:all` and an INCR counter under
//! `counter:<entity>`.

pub const USERS_ALL: &str = "users:all";
pub const PROFILES_ALL: &str = "profiles:all";
pub const PROJECTS_ALL: &str = "projects:all";
pub const RECOMMENDATIONS_ALL: &str = "recommendations:all";

pub const USER_COUNTER: &str = "counter:user";
pub const PROFILE_COUNTER: &str = "counter:profile";
pub const PROJECT_COUNTER: &str = "counter:project";
pub const RECOMMENDATION_COUNTER: &str = "counter:recommendation";

pub fn user(id: i64) -> String {
    format!("user:{id}")
}

/// Username index; holds the owning user id.
pub fn username(name: &str) -> String {
    format!("user:username:{name}")
}

pub fn profile(id: i64) -> String {
    format!("profile:{id}")
}

/// Per-user profile index; holds the profile id.
pub fn profile_of_user(user_id: i64) -> String {
    format!("profile:user:{user_id}")
}

pub fn project(id: i64) -> String {
    format!("project:{id}")
}

pub fn recommendation(id: i64) -> String {
    format!("recommendation:{id}")
}

/// Set of recommendation ids owned by a user.
pub fn recommendations_of_user(user_id: i64) -> String {
    format!("recommendations:user:{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(user(7), "user:7");
        assert_eq!(username("alice"), "user:username:alice");
        assert_eq!(profile_of_user(7), "profile:user:7");
        assert_eq!(recommendations_of_user(7), "recommendations:user:7");
    }
}
