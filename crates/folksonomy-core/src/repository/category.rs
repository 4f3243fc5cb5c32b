//! Skill category repository trait definition.

use folksonomy_types::error::RepositoryError;
use folksonomy_types::id::CategoryId;
use folksonomy_types::skill::SkillCategory;

pub trait CategoryRepository: Send + Sync {
    /// Insert a category. Fails with `Conflict` when the name is taken.
    fn create(
        &self,
        category: &SkillCategory,
    ) -> impl std::future::Future<Output = Result<SkillCategory, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &CategoryId,
    ) -> impl std::future::Future<Output = Result<Option<SkillCategory>, RepositoryError>> + Send;

    fn get_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<SkillCategory>, RepositoryError>> + Send;

    /// All categories ordered by name, optionally narrowed by a name search.
    fn list(
        &self,
        search: Option<String>,
    ) -> impl std::future::Future<Output = Result<Vec<SkillCategory>, RepositoryError>> + Send;

    /// Delete a category. Its links to skills go with it.
    fn delete(
        &self,
        id: &CategoryId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
