//! SQLite skill repository implementation.
//!
//! Skills share their columns with tags; the category links live in
//! `skill_category_links` and go away with either side.

use sqlx::{QueryBuilder, Sqlite};

use folksonomy_core::repository::approval::ApprovalStore;
use folksonomy_core::repository::skill::{SkillFilter, SkillRepository};
use folksonomy_types::error::RepositoryError;
use folksonomy_types::id::{CategoryId, SkillId};
use folksonomy_types::skill::{Skill, SkillCategory};
use folksonomy_types::tag::Taggable;

use super::category::CategoryRow;
use super::pool::DatabasePool;
use super::{push_page, push_search, query_error, taggable, write_error, Conditions};

const TABLE: &str = "skills";

/// SQLite-backed implementation of `SkillRepository`.
#[derive(Clone)]
pub struct SqliteSkillRepository {
    pool: DatabasePool,
}

impl SqliteSkillRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn into_skill((id, tag): (SkillId, Taggable<SkillId>)) -> Skill {
    Skill { id, tag }
}

impl ApprovalStore for SqliteSkillRepository {
    type Id = SkillId;

    async fn find_taggable(
        &self,
        id: &SkillId,
    ) -> Result<Option<Taggable<SkillId>>, RepositoryError> {
        let found = taggable::fetch_one_by(&self.pool.reader, TABLE, "id", id.to_string()).await?;
        Ok(found.map(|(_, tag)| tag))
    }

    async fn save_approval(
        &self,
        id: &SkillId,
        tag: &Taggable<SkillId>,
    ) -> Result<(), RepositoryError> {
        taggable::save_approval(&self.pool.writer, TABLE, id, tag).await
    }
}

impl SkillRepository for SqliteSkillRepository {
    async fn create(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        taggable::insert(&self.pool.writer, TABLE, &skill.id, &skill.tag)
            .await
            .map_err(|e| write_error(e, &format!("skill '{}'", skill.tag.name)))?;
        Ok(skill.clone())
    }

    async fn get_by_id(&self, id: &SkillId) -> Result<Option<Skill>, RepositoryError> {
        let found = taggable::fetch_one_by(&self.pool.reader, TABLE, "id", id.to_string()).await?;
        Ok(found.map(into_skill))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Skill>, RepositoryError> {
        let found = taggable::fetch_one_by(&self.pool.reader, TABLE, "name", name.to_string()).await?;
        Ok(found.map(into_skill))
    }

    async fn list(&self, filter: Option<SkillFilter>) -> Result<Vec<Skill>, RepositoryError> {
        let filter = filter.unwrap_or_default();

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM skills");
        let mut conditions = Conditions::default();
        taggable::push_state_filters(&mut qb, &mut conditions, filter.state, filter.root_only);
        if let Some(category) = filter.category {
            conditions.next(&mut qb);
            qb.push("id IN (SELECT skill_id FROM skill_category_links WHERE category_id = ");
            qb.push_bind(category.to_string());
            qb.push(")");
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            push_search(&mut qb, &mut conditions, &["name"], search);
        }
        taggable::push_order(&mut qb, filter.sort_by.as_deref(), filter.sort_order);
        push_page(&mut qb, filter.limit, filter.offset);

        let rows = taggable::fetch_all(&self.pool.reader, qb).await?;
        Ok(rows.into_iter().map(into_skill).collect())
    }

    async fn update(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        let affected = taggable::update(&self.pool.writer, TABLE, &skill.id, &skill.tag)
            .await
            .map_err(|e| write_error(e, &format!("skill '{}'", skill.tag.name)))?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(skill.clone())
    }

    async fn delete(&self, id: &SkillId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_error(e, "skill"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn set_categories(
        &self,
        id: &SkillId,
        categories: &[CategoryId],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        sqlx::query("DELETE FROM skill_category_links WHERE skill_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        for category in categories {
            sqlx::query(
                "INSERT OR IGNORE INTO skill_category_links (skill_id, category_id) VALUES (?, ?)",
            )
            .bind(id.to_string())
            .bind(category.to_string())
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;
        }

        tx.commit().await.map_err(query_error)?;
        Ok(())
    }

    async fn add_category(&self, id: &SkillId, category: &CategoryId) -> Result<(), RepositoryError> {
        sqlx::query("INSERT OR IGNORE INTO skill_category_links (skill_id, category_id) VALUES (?, ?)")
            .bind(id.to_string())
            .bind(category.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        Ok(())
    }

    async fn remove_category(
        &self,
        id: &SkillId,
        category: &CategoryId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM skill_category_links WHERE skill_id = ? AND category_id = ?")
            .bind(id.to_string())
            .bind(category.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;
        Ok(())
    }

    async fn list_categories(&self, id: &SkillId) -> Result<Vec<SkillCategory>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT c.* FROM skill_categories c
             JOIN skill_category_links l ON l.category_id = c.id
             WHERE l.skill_id = ?
             ORDER BY c.name ASC",
        )
        .bind(id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| CategoryRow::from_row(row).map_err(query_error)?.into_category())
            .collect()
    }
}
