//! User and user-skill repository trait definitions.

use folksonomy_types::error::RepositoryError;
use folksonomy_types::id::{SkillId, UserId, UserSkillId};
use folksonomy_types::user::{User, UserSkill, UserSkillView};

pub trait UserRepository: Send + Sync {
    /// Insert a user. Fails with `Conflict` when the username is taken.
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    fn get_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// All users ordered by username, optionally narrowed by a search.
    fn list(
        &self,
        search: Option<String>,
    ) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;

    /// Delete a user together with its skill assignments.
    fn delete(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// Filter criteria for listing user skills.
#[derive(Debug, Clone, Default)]
pub struct UserSkillFilter {
    pub user_id: Option<UserId>,
    pub skill_id: Option<SkillId>,
    /// Case-insensitive substring match over username and skill name.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub trait UserSkillRepository: Send + Sync {
    fn create(
        &self,
        user_skill: &UserSkill,
    ) -> impl std::future::Future<Output = Result<UserSkill, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &UserSkillId,
    ) -> impl std::future::Future<Output = Result<Option<UserSkill>, RepositoryError>> + Send;

    /// Assignments joined with usernames and skill names, newest first.
    fn list(
        &self,
        filter: Option<UserSkillFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<UserSkillView>, RepositoryError>> + Send;

    fn update(
        &self,
        user_skill: &UserSkill,
    ) -> impl std::future::Future<Output = Result<UserSkill, RepositoryError>> + Send;

    fn delete(
        &self,
        id: &UserSkillId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
