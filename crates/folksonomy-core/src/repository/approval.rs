//! Storage port shared by every tag-like entity.

use std::fmt;

use folksonomy_types::error::RepositoryError;
use folksonomy_types::tag::Taggable;

/// Load and persist the approval fields of a tag-like record.
///
/// Implemented by both the tag and the skill repositories so one approval
/// workflow serves both.
pub trait ApprovalStore: Send + Sync {
    /// Identifier of the records in this store (also the alias-parent type).
    type Id: Copy + Eq + fmt::Display + Send + Sync;

    /// Load the tag fields of a record.
    fn find_taggable(
        &self,
        id: &Self::Id,
    ) -> impl std::future::Future<Output = Result<Option<Taggable<Self::Id>>, RepositoryError>> + Send;

    /// Persist the approval columns (state, accepted_at, rejected_at) and
    /// `updated_at` only. Every other column is left untouched.
    fn save_approval(
        &self,
        id: &Self::Id,
        tag: &Taggable<Self::Id>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
