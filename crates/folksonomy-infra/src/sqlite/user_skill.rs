//! SQLite user-skill repository implementation.
//!
//! Listings join `users` and `skills` so callers get names with each row.

use sqlx::{QueryBuilder, Row, Sqlite};

use folksonomy_core::repository::user::{UserSkillFilter, UserSkillRepository};
use folksonomy_types::error::RepositoryError;
use folksonomy_types::id::UserSkillId;
use folksonomy_types::user::{UserSkill, UserSkillView};

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, push_page, push_search, query_error, write_error, Conditions};

/// SQLite-backed implementation of `UserSkillRepository`.
#[derive(Clone)]
pub struct SqliteUserSkillRepository {
    pool: DatabasePool,
}

impl SqliteUserSkillRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain UserSkill.
struct UserSkillRow {
    id: String,
    user_id: String,
    skill_id: String,
    skill_level: i64,
    created_at: String,
    updated_at: String,
}

impl UserSkillRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            skill_id: row.try_get("skill_id")?,
            skill_level: row.try_get("skill_level")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_user_skill(self) -> Result<UserSkill, RepositoryError> {
        let invalid = |what: &str, e: uuid::Error| RepositoryError::Query(format!("invalid {what}: {e}"));

        Ok(UserSkill {
            id: self.id.parse().map_err(|e| invalid("user skill id", e))?,
            user_id: self.user_id.parse().map_err(|e| invalid("user id", e))?,
            skill_id: self.skill_id.parse().map_err(|e| invalid("skill id", e))?,
            skill_level: u16::try_from(self.skill_level)
                .map_err(|e| RepositoryError::Query(format!("invalid skill level: {e}")))?,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn view_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<UserSkillView, RepositoryError> {
    let user_skill = UserSkillRow::from_row(row)
        .map_err(query_error)?
        .into_user_skill()?;
    Ok(UserSkillView {
        user_skill,
        username: row.try_get("username").map_err(query_error)?,
        skill_name: row.try_get("skill_name").map_err(query_error)?,
    })
}

impl UserSkillRepository for SqliteUserSkillRepository {
    async fn create(&self, user_skill: &UserSkill) -> Result<UserSkill, RepositoryError> {
        sqlx::query(
            "INSERT INTO user_skills (id, user_id, skill_id, skill_level, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_skill.id.to_string())
        .bind(user_skill.user_id.to_string())
        .bind(user_skill.skill_id.to_string())
        .bind(i64::from(user_skill.skill_level))
        .bind(format_datetime(&user_skill.created_at))
        .bind(format_datetime(&user_skill.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| write_error(e, "user skill"))?;
        Ok(user_skill.clone())
    }

    async fn get_by_id(&self, id: &UserSkillId) -> Result<Option<UserSkill>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM user_skills WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => Ok(Some(
                UserSkillRow::from_row(&row)
                    .map_err(query_error)?
                    .into_user_skill()?,
            )),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: Option<UserSkillFilter>) -> Result<Vec<UserSkillView>, RepositoryError> {
        let filter = filter.unwrap_or_default();

        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT us.*, u.username AS username, s.name AS skill_name
             FROM user_skills us
             JOIN users u ON u.id = us.user_id
             JOIN skills s ON s.id = us.skill_id",
        );
        let mut conditions = Conditions::default();
        if let Some(user_id) = filter.user_id {
            conditions.next(&mut qb);
            qb.push("us.user_id = ");
            qb.push_bind(user_id.to_string());
        }
        if let Some(skill_id) = filter.skill_id {
            conditions.next(&mut qb);
            qb.push("us.skill_id = ");
            qb.push_bind(skill_id.to_string());
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            push_search(&mut qb, &mut conditions, &["u.username", "s.name"], search);
        }
        qb.push(" ORDER BY us.created_at DESC, us.id DESC");
        push_page(&mut qb, filter.limit, filter.offset);

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;
        rows.iter().map(view_from_row).collect()
    }

    async fn update(&self, user_skill: &UserSkill) -> Result<UserSkill, RepositoryError> {
        let result = sqlx::query(
            "UPDATE user_skills SET user_id = ?, skill_id = ?, skill_level = ?, updated_at = ? WHERE id = ?",
        )
        .bind(user_skill.user_id.to_string())
        .bind(user_skill.skill_id.to_string())
        .bind(i64::from(user_skill.skill_level))
        .bind(format_datetime(&user_skill.updated_at))
        .bind(user_skill.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| write_error(e, "user skill"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(user_skill.clone())
    }

    async fn delete(&self, id: &UserSkillId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM user_skills WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::database_url;
    use crate::sqlite::skill::SqliteSkillRepository;
    use crate::sqlite::user::SqliteUserRepository;
    use chrono::Utc;
    use folksonomy_core::repository::skill::SkillRepository;
    use folksonomy_core::repository::user::UserRepository;
    use folksonomy_types::skill::Skill;
    use folksonomy_types::tag::Taggable;
    use folksonomy_types::user::User;

    struct Fixture {
        users: SqliteUserRepository,
        skills: SqliteSkillRepository,
        user_skills: SqliteUserSkillRepository,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url(dir.path(), "test.db");
        std::mem::forget(dir);
        let pool = DatabasePool::new(&url).await.unwrap();
        Fixture {
            users: SqliteUserRepository::new(pool.clone()),
            skills: SqliteSkillRepository::new(pool.clone()),
            user_skills: SqliteUserSkillRepository::new(pool),
        }
    }

    async fn seed(f: &Fixture, username: &str, skill: &str, level: u16) -> UserSkill {
        let user = match f.users.get_by_username(username).await.unwrap() {
            Some(user) => user,
            None => f.users.create(&User::new(username)).await.unwrap(),
        };
        let skill = match f.skills.get_by_name(skill).await.unwrap() {
            Some(skill) => skill,
            None => f
                .skills
                .create(&Skill::new(Taggable::new(skill, "", None, Utc::now())))
                .await
                .unwrap(),
        };
        f.user_skills
            .create(&UserSkill::new(user.id, skill.id, level))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_joins_names_newest_first() {
        let f = fixture().await;
        seed(&f, "ada", "rust", 2).await;
        let latest = seed(&f, "grace", "cobol", 5).await;

        let views = f.user_skills.list(None).await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].user_skill.id, latest.id);
        assert_eq!(views[0].username, "grace");
        assert_eq!(views[0].skill_name, "cobol");
        assert_eq!(views[0].user_skill.skill_level, 5);
    }

    #[tokio::test]
    async fn test_list_search_and_filters() {
        let f = fixture().await;
        let ada_rust = seed(&f, "ada", "rust", 1).await;
        seed(&f, "ada", "go", 1).await;
        seed(&f, "grace", "rust", 1).await;

        let by_user = f
            .user_skills
            .list(Some(UserSkillFilter {
                user_id: Some(ada_rust.user_id),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(by_user.len(), 2);

        let by_skill = f
            .user_skills
            .list(Some(UserSkillFilter {
                skill_id: Some(ada_rust.skill_id),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(by_skill.len(), 2);

        let searched = f
            .user_skills
            .list(Some(UserSkillFilter {
                search: Some("GRA".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].skill_name, "rust");
    }

    #[tokio::test]
    async fn test_update_level() {
        let f = fixture().await;
        let mut us = seed(&f, "ada", "rust", 1).await;
        us.skill_level = 7;
        us.updated_at = Utc::now();
        f.user_skills.update(&us).await.unwrap();

        let stored = f.user_skills.get_by_id(&us.id).await.unwrap().unwrap();
        assert_eq!(stored.skill_level, 7);
        assert_eq!(stored.updated_at, us.updated_at);
    }

    #[tokio::test]
    async fn test_level_zero_violates_check() {
        let f = fixture().await;
        let user = f.users.create(&User::new("ada")).await.unwrap();
        let skill = f
            .skills
            .create(&Skill::new(Taggable::new("rust", "", None, Utc::now())))
            .await
            .unwrap();
        let err = f
            .user_skills
            .create(&UserSkill::new(user.id, skill.id, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }

    #[tokio::test]
    async fn test_deleting_either_side_cascades() {
        let f = fixture().await;
        let ada_rust = seed(&f, "ada", "rust", 1).await;
        let grace_go = seed(&f, "grace", "go", 1).await;

        f.users.delete(&ada_rust.user_id).await.unwrap();
        assert!(f.user_skills.get_by_id(&ada_rust.id).await.unwrap().is_none());

        f.skills.delete(&grace_go.skill_id).await.unwrap();
        assert!(f.user_skills.get_by_id(&grace_go.id).await.unwrap().is_none());
        assert!(f.user_skills.list(None).await.unwrap().is_empty());
    }
}
