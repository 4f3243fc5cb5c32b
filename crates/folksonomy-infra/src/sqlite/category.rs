//! SQLite skill category repository implementation.

use sqlx::{QueryBuilder, Row, Sqlite};

use folksonomy_core::repository::category::CategoryRepository;
use folksonomy_types::error::RepositoryError;
use folksonomy_types::id::CategoryId;
use folksonomy_types::skill::SkillCategory;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, push_search, query_error, write_error, Conditions};

/// SQLite-backed implementation of `CategoryRepository`.
#[derive(Clone)]
pub struct SqliteCategoryRepository {
    pool: DatabasePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain SkillCategory.
pub(crate) struct CategoryRow {
    id: String,
    name: String,
    created_at: String,
}

impl CategoryRow {
    pub(crate) fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
        })
    }

    pub(crate) fn into_category(self) -> Result<SkillCategory, RepositoryError> {
        let id = self
            .id
            .parse::<CategoryId>()
            .map_err(|e| RepositoryError::Query(format!("invalid category id: {e}")))?;

        Ok(SkillCategory {
            id,
            name: self.name,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl SqliteCategoryRepository {
    async fn fetch_one(&self, sql: &str, value: String) -> Result<Option<SkillCategory>, RepositoryError> {
        let row = sqlx::query(sql)
            .bind(value)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => Ok(Some(CategoryRow::from_row(&row).map_err(query_error)?.into_category()?)),
            None => Ok(None),
        }
    }
}

impl CategoryRepository for SqliteCategoryRepository {
    async fn create(&self, category: &SkillCategory) -> Result<SkillCategory, RepositoryError> {
        sqlx::query("INSERT INTO skill_categories (id, name, created_at) VALUES (?, ?, ?)")
            .bind(category.id.to_string())
            .bind(&category.name)
            .bind(format_datetime(&category.created_at))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_error(e, &format!("category '{}'", category.name)))?;
        Ok(category.clone())
    }

    async fn get_by_id(&self, id: &CategoryId) -> Result<Option<SkillCategory>, RepositoryError> {
        self.fetch_one("SELECT * FROM skill_categories WHERE id = ?", id.to_string())
            .await
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<SkillCategory>, RepositoryError> {
        self.fetch_one("SELECT * FROM skill_categories WHERE name = ?", name.to_string())
            .await
    }

    async fn list(&self, search: Option<String>) -> Result<Vec<SkillCategory>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM skill_categories");
        let mut conditions = Conditions::default();
        if let Some(search) = search.as_deref().filter(|s| !s.is_empty()) {
            push_search(&mut qb, &mut conditions, &["name"], search);
        }
        qb.push(" ORDER BY name ASC");

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|row| CategoryRow::from_row(row).map_err(query_error)?.into_category())
            .collect()
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM skill_categories WHERE id = ?")
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
    async fn test_create_list_and_search() {
        let repo = SqliteCategoryRepository::new(test_pool().await);
        for name in ["web", "backend", "Data science"] {
            repo.create(&SkillCategory::new(name)).await.unwrap();
        }

        let names: Vec<String> = repo.list(None).await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Data science", "backend", "web"]);

        let found = repo.list(Some("SCIENCE".to_string())).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Data science");
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let repo = SqliteCategoryRepository::new(test_pool().await);
        repo.create(&SkillCategory::new("web")).await.unwrap();
        let err = repo.create(&SkillCategory::new("web")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let repo = SqliteCategoryRepository::new(test_pool().await);
        let category = repo.create(&SkillCategory::new("web")).await.unwrap();

        assert_eq!(repo.get_by_name("web").await.unwrap().unwrap().id, category.id);
        repo.delete(&category.id).await.unwrap();
        assert!(repo.get_by_id(&category.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&category.id).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
