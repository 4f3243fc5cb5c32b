//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (folksonomy-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod approval;
pub mod category;
pub mod skill;
pub mod tag;
pub mod user;

/// Sort order for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    /// Listings follow the entities' default ordering: by name, ascending.
    fn default() -> Self {
        SortOrder::Asc
    }
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}
