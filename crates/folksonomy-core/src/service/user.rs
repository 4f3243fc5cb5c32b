//! User and user-skill management service.

use chrono::Utc;

use folksonomy_types::error::{RepositoryError, SkillError};
use folksonomy_types::id::{SkillId, UserId, UserSkillId};
use folksonomy_types::user::{
    validate_skill_level, AssignSkillRequest, CreateUserRequest, User, UserSkill,
    UserSkillView, DEFAULT_SKILL_LEVEL, MAX_USERNAME_LEN,
};
use folksonomy_types::tag::normalize_name;

use crate::repository::skill::SkillRepository;
use crate::repository::user::{UserRepository, UserSkillFilter, UserSkillRepository};

/// Users, and the skills assigned to them.
///
/// Holds its own skill repository to resolve skills by name when assigning.
pub struct UserService<U: UserRepository, US: UserSkillRepository, S: SkillRepository> {
    users: U,
    user_skills: US,
    skills: S,
}

fn storage(e: RepositoryError) -> SkillError {
    SkillError::StorageError(e.to_string())
}

impl<U: UserRepository, US: UserSkillRepository, S: SkillRepository> UserService<U, US, S> {
    pub fn new(users: U, user_skills: US, skills: S) -> Self {
        Self {
            users,
            user_skills,
            skills,
        }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, SkillError> {
        let username =
            normalize_name(&request.username, MAX_USERNAME_LEN).map_err(SkillError::InvalidName)?;
        let user = self
            .users
            .create(&User::new(username.clone()))
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => SkillError::NameConflict(username.clone()),
                other => storage(other),
            })?;
        tracing::debug!(id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    /// Look a user up by id, falling back to the username.
    pub async fn resolve_user(&self, reference: &str) -> Result<User, SkillError> {
        if let Ok(id) = reference.parse::<UserId>() {
            if let Some(user) = self.users.get_by_id(&id).await.map_err(storage)? {
                return Ok(user);
            }
        }
        self.users
            .get_by_username(reference.trim())
            .await
            .map_err(storage)?
            .ok_or(SkillError::UserNotFound)
    }

    async fn resolve_skill(&self, reference: &str) -> Result<SkillId, SkillError> {
        if let Ok(id) = reference.parse::<SkillId>() {
            if self.skills.get_by_id(&id).await.map_err(storage)?.is_some() {
                return Ok(id);
            }
        }
        self.skills
            .get_by_name(reference.trim())
            .await
            .map_err(storage)?
            .map(|s| s.id)
            .ok_or(SkillError::SkillNotFound)
    }

    pub async fn list_users(&self, search: Option<String>) -> Result<Vec<User>, SkillError> {
        self.users.list(search).await.map_err(storage)
    }

    /// Delete a user together with all of its skill assignments.
    pub async fn delete_user(&self, id: &UserId) -> Result<(), SkillError> {
        self.users.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => SkillError::UserNotFound,
            other => storage(other),
        })
    }

    /// Give a user a skill, at level 1 unless told otherwise.
    pub async fn assign_skill(&self, request: AssignSkillRequest) -> Result<UserSkill, SkillError> {
        let level = validate_skill_level(request.skill_level.unwrap_or(DEFAULT_SKILL_LEVEL))
            .map_err(SkillError::InvalidLevel)?;
        let user = self.resolve_user(&request.user).await?;
        let skill_id = self.resolve_skill(&request.skill).await?;

        let user_skill = self
            .user_skills
            .create(&UserSkill::new(user.id, skill_id, level))
            .await
            .map_err(storage)?;
        tracing::debug!(id = %user_skill.id, user = %user.username, level, "skill assigned");
        Ok(user_skill)
    }

    pub async fn get_user_skill(&self, id: &UserSkillId) -> Result<UserSkill, SkillError> {
        self.user_skills
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(SkillError::UserSkillNotFound)
    }

    /// Change the level of an assignment. Refreshes `updated_at`.
    pub async fn set_level(&self, id: &UserSkillId, level: u16) -> Result<UserSkill, SkillError> {
        let level = validate_skill_level(level).map_err(SkillError::InvalidLevel)?;
        let mut user_skill = self.get_user_skill(id).await?;
        user_skill.skill_level = level;
        user_skill.updated_at = Utc::now();
        self.user_skills.update(&user_skill).await.map_err(|e| match e {
            RepositoryError::NotFound => SkillError::UserSkillNotFound,
            other => storage(other),
        })
    }

    pub async fn unassign(&self, id: &UserSkillId) -> Result<(), SkillError> {
        self.user_skills.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => SkillError::UserSkillNotFound,
            other => storage(other),
        })
    }

    pub async fn list_user_skills(
        &self,
        filter: Option<UserSkillFilter>,
    ) -> Result<Vec<UserSkillView>, SkillError> {
        self.user_skills.list(filter).await.map_err(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::skill::SkillRepository as _;
    use crate::testing::{
        memory_repos, MemorySkillRepository, MemoryUserRepository, MemoryUserSkillRepository,
    };
    use folksonomy_types::skill::Skill;
    use folksonomy_types::tag::Taggable;

    type Service = UserService<MemoryUserRepository, MemoryUserSkillRepository, MemorySkillRepository>;

    async fn setup() -> (Service, MemorySkillRepository, MemoryUserSkillRepository) {
        let repos = memory_repos();
        for name in ["rust", "go"] {
            repos
                .skills
                .create(&Skill::new(Taggable::new(name, "", None, Utc::now())))
                .await
                .unwrap();
        }
        let skills = repos.skills.clone();
        let user_skills = repos.user_skills.clone();
        let svc = UserService::new(repos.users, repos.user_skills, repos.skills);
        for username in ["ada", "grace"] {
            svc.create_user(CreateUserRequest {
                username: username.to_string(),
            })
            .await
            .unwrap();
        }
        (svc, skills, user_skills)
    }

    fn assign(user: &str, skill: &str, level: Option<u16>) -> AssignSkillRequest {
        AssignSkillRequest {
            user: user.to_string(),
            skill: skill.to_string(),
            skill_level: level,
        }
    }

    #[tokio::test]
    async fn test_assign_defaults_to_level_one() {
        let (svc, _, _) = setup().await;
        let us = svc.assign_skill(assign("ada", "rust", None)).await.unwrap();
        assert_eq!(us.skill_level, 1);
    }

    #[tokio::test]
    async fn test_assign_level_zero_rejected() {
        let (svc, _, _) = setup().await;
        let err = svc.assign_skill(assign("ada", "rust", Some(0))).await.unwrap_err();
        assert!(matches!(err, SkillError::InvalidLevel(_)));
    }

    #[tokio::test]
    async fn test_assign_unknown_user_or_skill() {
        let (svc, _, _) = setup().await;
        assert!(matches!(
            svc.assign_skill(assign("linus", "rust", None)).await,
            Err(SkillError::UserNotFound)
        ));
        assert!(matches!(
            svc.assign_skill(assign("ada", "cobol", None)).await,
            Err(SkillError::SkillNotFound)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let (svc, _, _) = setup().await;
        let err = svc
            .create_user(CreateUserRequest {
                username: "ada".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SkillError::NameConflict(_)));
    }

    #[tokio::test]
    async fn test_set_level() {
        let (svc, _, _) = setup().await;
        let us = svc.assign_skill(assign("ada", "rust", None)).await.unwrap();
        let updated = svc.set_level(&us.id, 4).await.unwrap();
        assert_eq!(updated.skill_level, 4);
        assert!(updated.updated_at >= us.updated_at);
        assert_eq!(svc.get_user_skill(&us.id).await.unwrap().skill_level, 4);
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let (svc, _, user_skills) = setup().await;
        svc.assign_skill(assign("ada", "rust", None)).await.unwrap();
        svc.assign_skill(assign("ada", "go", Some(3))).await.unwrap();
        svc.assign_skill(assign("grace", "go", None)).await.unwrap();
        assert_eq!(user_skills.count(), 3);

        let ada = svc.resolve_user("ada").await.unwrap();
        svc.delete_user(&ada.id).await.unwrap();
        assert_eq!(user_skills.count(), 1);
    }

    #[tokio::test]
    async fn test_delete_skill_cascades() {
        let (svc, skills, user_skills) = setup().await;
        let us = svc.assign_skill(assign("ada", "rust", None)).await.unwrap();
        skills.delete(&us.skill_id).await.unwrap();
        assert_eq!(user_skills.count(), 0);
    }

    #[tokio::test]
    async fn test_list_search_by_username_or_skill() {
        let (svc, _, _) = setup().await;
        svc.assign_skill(assign("ada", "rust", None)).await.unwrap();
        svc.assign_skill(assign("grace", "go", None)).await.unwrap();

        let by_user = svc
            .list_user_skills(Some(UserSkillFilter {
                search: Some("GRA".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(by_user.len(), 1);
        assert_eq!(by_user[0].skill_name, "go");

        let by_skill = svc
            .list_user_skills(Some(UserSkillFilter {
                search: Some("rust".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(by_skill.len(), 1);
        assert_eq!(by_skill[0].username, "ada");
    }
}
