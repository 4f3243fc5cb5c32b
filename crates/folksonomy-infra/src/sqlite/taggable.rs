//! Row mapping and statements shared by the `tags` and `skills` tables.
//!
//! Both tables carry the same columns, so the tag and skill repositories
//! differ only in the table name and their extra links.

use std::fmt::Display;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use folksonomy_core::repository::SortOrder;
use folksonomy_types::error::RepositoryError;
use folksonomy_types::tag::{TagState, Taggable};

use super::{format_datetime, parse_datetime, query_error, Conditions};

/// Columns a listing may be sorted by.
const SORT_FIELDS: &[&str] = &["name", "state", "created_at", "updated_at", "accepted_at", "rejected_at"];

pub(crate) struct TaggableRow {
    id: String,
    name: String,
    excerpt: String,
    parent_id: Option<String>,
    state: String,
    created_at: String,
    updated_at: String,
    accepted_at: Option<String>,
    rejected_at: Option<String>,
}

impl TaggableRow {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            excerpt: row.try_get("excerpt")?,
            parent_id: row.try_get("parent_id")?,
            state: row.try_get("state")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            accepted_at: row.try_get("accepted_at")?,
            rejected_at: row.try_get("rejected_at")?,
        })
    }

    pub(crate) fn into_parts<I>(self) -> Result<(I, Taggable<I>), RepositoryError>
    where
        I: FromStr<Err = uuid::Error>,
    {
        let parse_id = |s: &str| {
            s.parse::<I>()
                .map_err(|e| RepositoryError::Query(format!("invalid id '{s}': {e}")))
        };

        let id = parse_id(&self.id)?;
        let parent = self.parent_id.as_deref().map(parse_id).transpose()?;
        let state: TagState = self.state.parse().map_err(RepositoryError::Query)?;

        Ok((
            id,
            Taggable {
                name: self.name,
                excerpt: self.excerpt,
                parent,
                state,
                created_at: parse_datetime(&self.created_at)?,
                updated_at: parse_datetime(&self.updated_at)?,
                accepted_at: self.accepted_at.as_deref().map(parse_datetime).transpose()?,
                rejected_at: self.rejected_at.as_deref().map(parse_datetime).transpose()?,
            },
        ))
    }
}

pub(crate) fn decode<I>(row: &SqliteRow) -> Result<(I, Taggable<I>), RepositoryError>
where
    I: FromStr<Err = uuid::Error>,
{
    TaggableRow::from_row(row).map_err(query_error)?.into_parts()
}

pub(crate) async fn insert<I: Display>(
    writer: &SqlitePool,
    table: &'static str,
    id: &I,
    tag: &Taggable<I>,
) -> Result<(), sqlx::Error> {
    let sql = format!(
        "INSERT INTO {table} (id, name, excerpt, parent_id, state, created_at, updated_at, accepted_at, rejected_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
    );
    sqlx::query(&sql)
        .bind(id.to_string())
        .bind(&tag.name)
        .bind(&tag.excerpt)
        .bind(tag.parent.as_ref().map(|p| p.to_string()))
        .bind(tag.state.to_string())
        .bind(format_datetime(&tag.created_at))
        .bind(format_datetime(&tag.updated_at))
        .bind(tag.accepted_at.as_ref().map(format_datetime))
        .bind(tag.rejected_at.as_ref().map(format_datetime))
        .execute(writer)
        .await?;
    Ok(())
}

/// Save every mutable column. Returns the number of rows touched.
pub(crate) async fn update<I: Display>(
    writer: &SqlitePool,
    table: &'static str,
    id: &I,
    tag: &Taggable<I>,
) -> Result<u64, sqlx::Error> {
    let sql = format!(
        "UPDATE {table} SET name = ?, excerpt = ?, parent_id = ?, state = ?, updated_at = ?, accepted_at = ?, rejected_at = ?
         WHERE id = ?"
    );
    let result = sqlx::query(&sql)
        .bind(&tag.name)
        .bind(&tag.excerpt)
        .bind(tag.parent.as_ref().map(|p| p.to_string()))
        .bind(tag.state.to_string())
        .bind(format_datetime(&tag.updated_at))
        .bind(tag.accepted_at.as_ref().map(format_datetime))
        .bind(tag.rejected_at.as_ref().map(format_datetime))
        .bind(id.to_string())
        .execute(writer)
        .await?;
    Ok(result.rows_affected())
}

/// Save the approval columns and `updated_at`, nothing else.
pub(crate) async fn save_approval<I: Display>(
    writer: &SqlitePool,
    table: &'static str,
    id: &I,
    tag: &Taggable<I>,
) -> Result<(), RepositoryError> {
    let sql = format!(
        "UPDATE {table} SET state = ?, accepted_at = ?, rejected_at = ?, updated_at = ? WHERE id = ?"
    );
    let result = sqlx::query(&sql)
        .bind(tag.state.to_string())
        .bind(tag.accepted_at.as_ref().map(format_datetime))
        .bind(tag.rejected_at.as_ref().map(format_datetime))
        .bind(format_datetime(&tag.updated_at))
        .bind(id.to_string())
        .execute(writer)
        .await
        .map_err(query_error)?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

pub(crate) async fn fetch_one_by<I>(
    reader: &SqlitePool,
    table: &'static str,
    column: &'static str,
    value: String,
) -> Result<Option<(I, Taggable<I>)>, RepositoryError>
where
    I: FromStr<Err = uuid::Error>,
{
    let sql = format!("SELECT * FROM {table} WHERE {column} = ?");
    let row = sqlx::query(&sql)
        .bind(value)
        .fetch_optional(reader)
        .await
        .map_err(query_error)?;

    row.as_ref().map(decode).transpose()
}

/// Push the state and alias/root conditions.
pub(crate) fn push_state_filters(
    qb: &mut QueryBuilder<'_, Sqlite>,
    conditions: &mut Conditions,
    state: Option<TagState>,
    root_only: Option<bool>,
) {
    if let Some(state) = state {
        conditions.next(qb);
        qb.push("state = ");
        qb.push_bind(state.to_string());
    }
    match root_only {
        Some(true) => {
            conditions.next(qb);
            qb.push("parent_id IS NULL");
        }
        Some(false) => {
            conditions.next(qb);
            qb.push("parent_id IS NOT NULL");
        }
        None => {}
    }
}

/// ORDER BY a whitelisted column, name ascending by default.
pub(crate) fn push_order(qb: &mut QueryBuilder<'_, Sqlite>, sort_by: Option<&str>, order: Option<SortOrder>) {
    let field = sort_by
        .filter(|f| SORT_FIELDS.contains(f))
        .unwrap_or("name");
    let order = order.unwrap_or_default();
    qb.push(format!(" ORDER BY {field} {}, id ASC", order.as_sql()));
}

pub(crate) async fn fetch_all<I>(
    reader: &SqlitePool,
    mut qb: QueryBuilder<'_, Sqlite>,
) -> Result<Vec<(I, Taggable<I>)>, RepositoryError>
where
    I: FromStr<Err = uuid::Error>,
{
    let rows = qb.build().fetch_all(reader).await.map_err(query_error)?;
    rows.iter().map(decode).collect()
}
