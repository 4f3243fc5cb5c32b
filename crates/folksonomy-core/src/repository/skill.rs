//! Skill repository trait definition.

use folksonomy_types::error::RepositoryError;
use folksonomy_types::id::{CategoryId, SkillId};
use folksonomy_types::skill::{Skill, SkillCategory};
use folksonomy_types::tag::TagState;

use super::approval::ApprovalStore;
use super::SortOrder;

/// Filter criteria for listing skills.
#[derive(Debug, Clone, Default)]
pub struct SkillFilter {
    pub state: Option<TagState>,
    /// Only skills linked to this category.
    pub category: Option<CategoryId>,
    /// `Some(true)`: root skills only. `Some(false)`: aliases only.
    pub root_only: Option<bool>,
    /// Case-insensitive substring match over the name.
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Repository trait for skills and their category links.
pub trait SkillRepository: ApprovalStore<Id = SkillId> {
    fn create(
        &self,
        skill: &Skill,
    ) -> impl std::future::Future<Output = Result<Skill, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &SkillId,
    ) -> impl std::future::Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    fn get_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    fn list(
        &self,
        filter: Option<SkillFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Skill>, RepositoryError>> + Send;

    fn update(
        &self,
        skill: &Skill,
    ) -> impl std::future::Future<Output = Result<Skill, RepositoryError>> + Send;

    /// Delete a skill, its category links and its user assignments.
    /// Fails with `Protected` while aliases point at it.
    fn delete(
        &self,
        id: &SkillId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Replace the full set of categories linked to a skill.
    fn set_categories(
        &self,
        id: &SkillId,
        categories: &[CategoryId],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Link one category. Linking an already linked category is a no-op.
    fn add_category(
        &self,
        id: &SkillId,
        category: &CategoryId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn remove_category(
        &self,
        id: &SkillId,
        category: &CategoryId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Categories of a skill in their default ordering (by name).
    fn list_categories(
        &self,
        id: &SkillId,
    ) -> impl std::future::Future<Output = Result<Vec<SkillCategory>, RepositoryError>> + Send;
}
