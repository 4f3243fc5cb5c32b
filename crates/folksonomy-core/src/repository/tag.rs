//! Tag repository trait definition.

use folksonomy_types::error::RepositoryError;
use folksonomy_types::id::TagId;
use folksonomy_types::tag::{Tag, TagState};

use super::approval::ApprovalStore;
use super::SortOrder;

/// Filter criteria for listing tags.
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    /// Filter by approval state.
    pub state: Option<TagState>,
    /// `Some(true)`: root records only. `Some(false)`: aliases only.
    pub root_only: Option<bool>,
    /// Case-insensitive substring match over name and excerpt.
    pub search: Option<String>,
    /// Field to sort by ("name", "created_at", "updated_at", "state").
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Repository trait for tag persistence.
///
/// Implementations live in folksonomy-infra (e.g., SqliteTagRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait TagRepository: ApprovalStore<Id = TagId> {
    /// Insert a new tag. Fails with `Conflict` when the name is taken.
    fn create(
        &self,
        tag: &Tag,
    ) -> impl std::future::Future<Output = Result<Tag, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &TagId,
    ) -> impl std::future::Future<Output = Result<Option<Tag>, RepositoryError>> + Send;

    fn get_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Tag>, RepositoryError>> + Send;

    fn list(
        &self,
        filter: Option<TagFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Tag>, RepositoryError>> + Send;

    /// Save every column of an existing tag.
    fn update(
        &self,
        tag: &Tag,
    ) -> impl std::future::Future<Output = Result<Tag, RepositoryError>> + Send;

    /// Delete a tag. Fails with `Protected` while aliases point at it.
    fn delete(
        &self,
        id: &TagId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
