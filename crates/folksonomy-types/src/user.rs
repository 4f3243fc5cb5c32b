use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{SkillId, UserId, UserSkillId};

/// Maximum length (in characters) of a username.
pub const MAX_USERNAME_LEN: usize = 150;

/// Skill level given to a new assignment when none is specified.
pub const DEFAULT_SKILL_LEVEL: u16 = 1;

/// Largest storable skill level (a signed 16-bit column).
pub const MAX_SKILL_LEVEL: u16 = 32_767;

/// A user that skills can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }
}

/// The join record between a user and a skill, carrying a skill level.
///
/// Removed together with either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSkill {
    pub id: UserSkillId,
    pub user_id: UserId,
    pub skill_id: SkillId,
    /// The level of skill that the user has (1 and up).
    pub skill_level: u16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserSkill {
    pub fn new(user_id: UserId, skill_id: SkillId, skill_level: u16) -> Self {
        let now = Utc::now();
        Self {
            id: UserSkillId::new(),
            user_id,
            skill_id,
            skill_level,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A user skill joined with the names of both ends, for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSkillView {
    #[serde(flatten)]
    pub user_skill: UserSkill,
    pub username: String,
    pub skill_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

/// Assign a skill to a user. Both ends may be given by id or by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignSkillRequest {
    pub user: String,
    pub skill: String,
    pub skill_level: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserSkillRequest {
    pub skill_level: u16,
}

/// Validate a skill level: small positive integer.
pub fn validate_skill_level(level: u16) -> Result<u16, String> {
    if level == 0 {
        return Err("skill level must be at least 1".to_string());
    }
    if level > MAX_SKILL_LEVEL {
        return Err(format!("skill level must be at most {MAX_SKILL_LEVEL}"));
    }
    Ok(level)
}
