//! SQLite user repository implementation.

use sqlx::{QueryBuilder, Row, Sqlite};

use folksonomy_core::repository::user::UserRepository;
use folksonomy_types::error::RepositoryError;
use folksonomy_types::id::UserId;
use folksonomy_types::user::User;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, push_search, query_error, write_error, Conditions};

/// SQLite-backed implementation of `UserRepository`.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_error)?;
    let username: String = row.try_get("username").map_err(query_error)?;
    let created_at: String = row.try_get("created_at").map_err(query_error)?;

    Ok(User {
        id: id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
        username,
        created_at: parse_datetime(&created_at)?,
    })
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        sqlx::query("INSERT INTO users (id, username, created_at) VALUES (?, ?, ?)")
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(format_datetime(&user.created_at))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_error(e, &format!("user '{}'", user.username)))?;
        Ok(user.clone())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn list(&self, search: Option<String>) -> Result<Vec<User>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM users");
        let mut conditions = Conditions::default();
        if let Some(search) = search.as_deref().filter(|s| !s.is_empty()) {
            push_search(&mut qb, &mut conditions, &["username"], search);
        }
        qb.push(" ORDER BY username ASC");

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;
        rows.iter().map(user_from_row).collect()
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
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

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url(dir.path(), "test.db");
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let user = repo.create(&User::new("ada")).await.unwrap();

        assert_eq!(repo.get_by_id(&user.id).await.unwrap().unwrap(), user);
        assert_eq!(repo.get_by_username("ada").await.unwrap().unwrap().id, user.id);
        assert!(repo.get_by_username("grace").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let repo = SqliteUserRepository::new(test_pool().await);
        repo.create(&User::new("ada")).await.unwrap();
        let err = repo.create(&User::new("ada")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_sorted_and_searched() {
        let repo = SqliteUserRepository::new(test_pool().await);
        for name in ["grace", "ada", "linus"] {
            repo.create(&User::new(name)).await.unwrap();
        }
        let names: Vec<String> = repo.list(None).await.unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["ada", "grace", "linus"]);

        let found = repo.list(Some("RAC".to_string())).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "grace");
    }
}
