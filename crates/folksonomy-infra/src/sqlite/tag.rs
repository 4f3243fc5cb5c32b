//! SQLite tag repository implementation.
//!
//! Implements `TagRepository` from `folksonomy-core` using sqlx with split read/write pools.

use sqlx::{QueryBuilder, Sqlite};

use folksonomy_core::repository::approval::ApprovalStore;
use folksonomy_core::repository::tag::{TagFilter, TagRepository};
use folksonomy_types::error::RepositoryError;
use folksonomy_types::id::TagId;
use folksonomy_types::tag::{Tag, Taggable};

use super::pool::DatabasePool;
use super::{push_page, push_search, taggable, write_error, Conditions};

const TABLE: &str = "tags";

/// SQLite-backed implementation of `TagRepository`.
#[derive(Clone)]
pub struct SqliteTagRepository {
    pool: DatabasePool,
}

impl SqliteTagRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn into_tag((id, tag): (TagId, Taggable<TagId>)) -> Tag {
    Tag { id, tag }
}

impl ApprovalStore for SqliteTagRepository {
    type Id = TagId;

    async fn find_taggable(&self, id: &TagId) -> Result<Option<Taggable<TagId>>, RepositoryError> {
        let found = taggable::fetch_one_by(&self.pool.reader, TABLE, "id", id.to_string()).await?;
        Ok(found.map(|(_, tag)| tag))
    }

    async fn save_approval(&self, id: &TagId, tag: &Taggable<TagId>) -> Result<(), RepositoryError> {
        taggable::save_approval(&self.pool.writer, TABLE, id, tag).await
    }
}

impl TagRepository for SqliteTagRepository {
    async fn create(&self, tag: &Tag) -> Result<Tag, RepositoryError> {
        taggable::insert(&self.pool.writer, TABLE, &tag.id, &tag.tag)
            .await
            .map_err(|e| write_error(e, &format!("tag '{}'", tag.tag.name)))?;
        Ok(tag.clone())
    }

    async fn get_by_id(&self, id: &TagId) -> Result<Option<Tag>, RepositoryError> {
        let found = taggable::fetch_one_by(&self.pool.reader, TABLE, "id", id.to_string()).await?;
        Ok(found.map(into_tag))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>, RepositoryError> {
        let found = taggable::fetch_one_by(&self.pool.reader, TABLE, "name", name.to_string()).await?;
        Ok(found.map(into_tag))
    }

    async fn list(&self, filter: Option<TagFilter>) -> Result<Vec<Tag>, RepositoryError> {
        let filter = filter.unwrap_or_default();

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM tags");
        let mut conditions = Conditions::default();
        taggable::push_state_filters(&mut qb, &mut conditions, filter.state, filter.root_only);
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            push_search(&mut qb, &mut conditions, &["name", "excerpt"], search);
        }
        taggable::push_order(&mut qb, filter.sort_by.as_deref(), filter.sort_order);
        push_page(&mut qb, filter.limit, filter.offset);

        let rows = taggable::fetch_all(&self.pool.reader, qb).await?;
        Ok(rows.into_iter().map(into_tag).collect())
    }

    async fn update(&self, tag: &Tag) -> Result<Tag, RepositoryError> {
        let affected = taggable::update(&self.pool.writer, TABLE, &tag.id, &tag.tag)
            .await
            .map_err(|e| write_error(e, &format!("tag '{}'", tag.tag.name)))?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(tag.clone())
    }

    async fn delete(&self, id: &TagId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| write_error(e, "tag"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
