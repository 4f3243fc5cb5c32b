//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod category;
pub mod pool;
pub mod skill;
pub mod tag;
pub(crate) mod taggable;
pub mod user;
pub mod user_skill;

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};

use folksonomy_types::error::RepositoryError;

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub(crate) fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

/// Map a failed INSERT/UPDATE/DELETE. UNIQUE violations become `Conflict`,
/// foreign key violations (a RESTRICT parent) become `Protected`.
pub(crate) fn write_error(e: sqlx::Error, what: &str) -> RepositoryError {
    match e {
        sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE") => {
            RepositoryError::Conflict(format!("{what} already exists"))
        }
        sqlx::Error::Database(db_err) if db_err.message().contains("FOREIGN KEY") => {
            RepositoryError::Protected(format!("{what} is referenced by other records"))
        }
        e => RepositoryError::Query(e.to_string()),
    }
}

/// Tracks whether a WHERE clause has been opened on a query builder.
#[derive(Default)]
pub(crate) struct Conditions {
    started: bool,
}

impl Conditions {
    /// Push " WHERE " for the first condition and " AND " afterwards.
    pub(crate) fn next(&mut self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(if self.started { " AND " } else { " WHERE " });
        self.started = true;
    }
}

/// Case-insensitive substring match of `term` over any of `columns`.
pub(crate) fn push_search(
    qb: &mut QueryBuilder<'_, Sqlite>,
    conditions: &mut Conditions,
    columns: &[&str],
    term: &str,
) {
    conditions.next(qb);
    qb.push("(");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(format!("instr(lower({column}), lower("));
        qb.push_bind(term.to_string());
        qb.push(")) > 0");
    }
    qb.push(")");
}

/// LIMIT/OFFSET. SQLite needs a LIMIT before OFFSET, -1 means unbounded.
pub(crate) fn push_page(qb: &mut QueryBuilder<'_, Sqlite>, limit: Option<i64>, offset: Option<i64>) {
    if limit.is_none() && offset.is_none() {
        return;
    }
    qb.push(" LIMIT ");
    qb.push_bind(limit.unwrap_or(-1));
    if let Some(offset) = offset {
        qb.push(" OFFSET ");
        qb.push_bind(offset);
    }
}
