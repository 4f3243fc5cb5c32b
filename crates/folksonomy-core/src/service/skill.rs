//! Skill and skill-category management service.
//!
//! Skills carry the same tag fields and approval workflow as tags, plus a
//! many-to-many link to categories.

use chrono::Utc;

use folksonomy_types::error::{RepositoryError, SkillError, TagError};
use folksonomy_types::id::{CategoryId, SkillId};
use folksonomy_types::skill::{
    category_display, CreateCategoryRequest, Skill, SkillCategory, SkillDetail,
    MAX_CATEGORY_NAME_LEN,
};
use folksonomy_types::tag::{
    normalize_name, CreateTagRequest, Taggable, UpdateTagRequest, MAX_TAG_NAME_LEN,
};

use crate::admin::SkillRow;
use crate::repository::category::CategoryRepository;
use crate::repository::skill::{SkillFilter, SkillRepository};
use crate::service::approval::{self, ApprovalAction, BulkActionReport};

pub struct SkillService<S: SkillRepository, C: CategoryRepository> {
    skills: S,
    categories: C,
}

fn map_write_error(e: RepositoryError, name: &str) -> TagError {
    match e {
        RepositoryError::Conflict(_) => TagError::NameConflict(name.to_string()),
        RepositoryError::Protected(_) => TagError::Protected(name.to_string()),
        RepositoryError::NotFound => TagError::NotFound,
        other => TagError::StorageError(other.to_string()),
    }
}

fn storage(e: RepositoryError) -> TagError {
    TagError::StorageError(e.to_string())
}

fn category_storage(e: RepositoryError) -> SkillError {
    SkillError::StorageError(e.to_string())
}

impl<S: SkillRepository, C: CategoryRepository> SkillService<S, C> {
    pub fn new(skills: S, categories: C) -> Self {
        Self { skills, categories }
    }

    // --- Skills ---

    pub async fn create_skill(&self, request: CreateTagRequest) -> Result<Skill, TagError> {
        let name = normalize_name(&request.name, MAX_TAG_NAME_LEN).map_err(TagError::InvalidName)?;

        let parent = match request.parent.as_deref() {
            Some(reference) => Some(self.resolve_parent(reference).await?),
            None => None,
        };

        let skill = Skill::new(Taggable::new(
            name.clone(),
            request.excerpt.unwrap_or_default(),
            parent,
            Utc::now(),
        ));

        let skill = self
            .skills
            .create(&skill)
            .await
            .map_err(|e| map_write_error(e, &name))?;
        tracing::debug!(id = %skill.id, name = %skill.tag.name, "skill created");
        Ok(skill)
    }

    async fn resolve_parent(&self, reference: &str) -> Result<SkillId, TagError> {
        match self.resolve_skill(reference).await {
            Ok(skill) => Ok(skill.id),
            Err(TagError::NotFound) => Err(TagError::InvalidParent(format!(
                "no skill matches '{reference}'"
            ))),
            Err(e) => Err(e),
        }
    }

    /// Look a skill up by id, falling back to its name.
    pub async fn resolve_skill(&self, reference: &str) -> Result<Skill, TagError> {
        if let Ok(id) = reference.parse::<SkillId>() {
            if let Some(skill) = self.skills.get_by_id(&id).await.map_err(storage)? {
                return Ok(skill);
            }
        }
        self.skills
            .get_by_name(reference.trim())
            .await
            .map_err(storage)?
            .ok_or(TagError::NotFound)
    }

    pub async fn get_skill(&self, id: &SkillId) -> Result<Skill, TagError> {
        self.skills
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(TagError::NotFound)
    }

    /// A skill with its categories.
    pub async fn get_skill_detail(&self, id: &SkillId) -> Result<SkillDetail, TagError> {
        let skill = self.get_skill(id).await?;
        let categories = self.skills.list_categories(id).await.map_err(storage)?;
        Ok(SkillDetail { skill, categories })
    }

    pub async fn list_skills(&self, filter: Option<SkillFilter>) -> Result<Vec<Skill>, TagError> {
        self.skills.list(filter).await.map_err(storage)
    }

    /// List skills with categories and parent names, for admin tables.
    pub async fn list_rows(&self, filter: Option<SkillFilter>) -> Result<Vec<SkillRow>, TagError> {
        let skills = self.list_skills(filter).await?;
        let mut rows = Vec::with_capacity(skills.len());
        for skill in skills {
            let categories = self.skills.list_categories(&skill.id).await.map_err(storage)?;
            let parent_name = match skill.tag.parent {
                Some(parent) => self
                    .skills
                    .get_by_id(&parent)
                    .await
                    .map_err(storage)?
                    .map(|p| p.tag.name),
                None => None,
            };
            rows.push(SkillRow {
                detail: SkillDetail { skill, categories },
                parent_name,
            });
        }
        Ok(rows)
    }

    pub async fn update_skill(
        &self,
        id: &SkillId,
        request: UpdateTagRequest,
    ) -> Result<Skill, TagError> {
        let mut skill = self.get_skill(id).await?;

        if let Some(name) = request.name {
            skill.tag.name = normalize_name(&name, MAX_TAG_NAME_LEN).map_err(TagError::InvalidName)?;
        }
        if let Some(excerpt) = request.excerpt {
            skill.tag.excerpt = excerpt;
        }
        if request.clear_parent {
            skill.tag.parent = None;
        } else if let Some(reference) = request.parent {
            let parent = self.resolve_parent(&reference).await?;
            if parent == skill.id {
                return Err(TagError::InvalidParent(
                    "a skill cannot alias itself".to_string(),
                ));
            }
            skill.tag.parent = Some(parent);
        }

        skill.tag.touch(Utc::now());

        let name = skill.tag.name.clone();
        self.skills
            .update(&skill)
            .await
            .map_err(|e| map_write_error(e, &name))
    }

    /// Delete a skill; its user assignments and category links go with it.
    pub async fn delete_skill(&self, id: &SkillId) -> Result<(), TagError> {
        let skill = self.get_skill(id).await?;
        self.skills
            .delete(id)
            .await
            .map_err(|e| map_write_error(e, &skill.tag.name))?;
        tracing::debug!(%id, name = %skill.tag.name, "skill deleted");
        Ok(())
    }

    pub async fn accept_skill(&self, id: &SkillId) -> Result<Skill, TagError> {
        let tag = approval::transition(&self.skills, id, ApprovalAction::Accept).await?;
        Ok(Skill { id: *id, tag })
    }

    pub async fn reject_skill(&self, id: &SkillId) -> Result<Skill, TagError> {
        let tag = approval::transition(&self.skills, id, ApprovalAction::Reject).await?;
        Ok(Skill { id: *id, tag })
    }

    pub async fn bulk(
        &self,
        ids: &[SkillId],
        action: ApprovalAction,
    ) -> Result<BulkActionReport, TagError> {
        approval::transition_many(&self.skills, ids, action).await
    }

    // --- Skill <-> category links ---

    /// Replace a skill's categories. Categories are given by id or name.
    pub async fn set_skill_categories(
        &self,
        id: &SkillId,
        references: &[String],
    ) -> Result<Vec<SkillCategory>, SkillError> {
        self.require_skill(id).await?;
        let mut ids: Vec<CategoryId> = Vec::with_capacity(references.len());
        for reference in references {
            ids.push(self.resolve_category(reference).await?.id);
        }
        self.skills
            .set_categories(id, &ids)
            .await
            .map_err(category_storage)?;
        self.skill_categories(id).await
    }

    pub async fn add_skill_category(
        &self,
        id: &SkillId,
        reference: &str,
    ) -> Result<Vec<SkillCategory>, SkillError> {
        self.require_skill(id).await?;
        let category = self.resolve_category(reference).await?;
        self.skills
            .add_category(id, &category.id)
            .await
            .map_err(category_storage)?;
        self.skill_categories(id).await
    }

    pub async fn remove_skill_category(
        &self,
        id: &SkillId,
        reference: &str,
    ) -> Result<Vec<SkillCategory>, SkillError> {
        self.require_skill(id).await?;
        let category = self.resolve_category(reference).await?;
        self.skills
            .remove_category(id, &category.id)
            .await
            .map_err(category_storage)?;
        self.skill_categories(id).await
    }

    pub async fn skill_categories(&self, id: &SkillId) -> Result<Vec<SkillCategory>, SkillError> {
        self.skills.list_categories(id).await.map_err(category_storage)
    }

    /// Comma-separated category names of a skill, recomputed on every call.
    pub async fn category_display(&self, id: &SkillId) -> Result<String, SkillError> {
        let categories = self.skill_categories(id).await?;
        Ok(category_display(&categories))
    }

    async fn require_skill(&self, id: &SkillId) -> Result<(), SkillError> {
        match self.skills.get_by_id(id).await.map_err(category_storage)? {
            Some(_) => Ok(()),
            None => Err(SkillError::SkillNotFound),
        }
    }

    // --- Categories ---

    pub async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<SkillCategory, SkillError> {
        let name = normalize_name(&request.name, MAX_CATEGORY_NAME_LEN)
            .map_err(SkillError::InvalidName)?;
        self.categories
            .create(&SkillCategory::new(name.clone()))
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => SkillError::NameConflict(name.clone()),
                other => category_storage(other),
            })
    }

    /// Look a category up by id, falling back to its name.
    pub async fn resolve_category(&self, reference: &str) -> Result<SkillCategory, SkillError> {
        if let Ok(id) = reference.parse::<CategoryId>() {
            if let Some(category) = self
                .categories
                .get_by_id(&id)
                .await
                .map_err(category_storage)?
            {
                return Ok(category);
            }
        }
        self.categories
            .get_by_name(reference.trim())
            .await
            .map_err(category_storage)?
            .ok_or(SkillError::CategoryNotFound)
    }

    pub async fn list_categories(
        &self,
        search: Option<String>,
    ) -> Result<Vec<SkillCategory>, SkillError> {
        self.categories.list(search).await.map_err(category_storage)
    }

    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), SkillError> {
        self.categories.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => SkillError::CategoryNotFound,
            other => category_storage(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{memory_repos, MemoryCategoryRepository, MemorySkillRepository};

    fn service() -> SkillService<MemorySkillRepository, MemoryCategoryRepository> {
        let repos = memory_repos();
        SkillService::new(repos.skills, repos.categories)
    }

    async fn skill(svc: &SkillService<MemorySkillRepository, MemoryCategoryRepository>, name: &str) -> Skill {
        svc.create_skill(CreateTagRequest {
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
    }

    async fn category(
        svc: &SkillService<MemorySkillRepository, MemoryCategoryRepository>,
        name: &str,
    ) -> SkillCategory {
        svc.create_category(CreateCategoryRequest {
            name: name.to_string(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_category_display_empty() {
        let svc = service();
        let s = skill(&svc, "rust").await;
        assert_eq!(svc.category_display(&s.id).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_category_display_joined_by_name() {
        let svc = service();
        let s = skill(&svc, "rust").await;
        category(&svc, "systems").await;
        category(&svc, "backend").await;

        svc.set_skill_categories(&s.id, &["systems".to_string(), "backend".to_string()])
            .await
            .unwrap();
        assert_eq!(svc.category_display(&s.id).await.unwrap(), "backend, systems");

        svc.remove_skill_category(&s.id, "systems").await.unwrap();
        assert_eq!(svc.category_display(&s.id).await.unwrap(), "backend");
    }

    #[tokio::test]
    async fn test_set_categories_unknown_category() {
        let svc = service();
        let s = skill(&svc, "rust").await;
        let err = svc
            .set_skill_categories(&s.id, &["nope".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, SkillError::CategoryNotFound));
    }

    #[tokio::test]
    async fn test_add_category_to_missing_skill() {
        let svc = service();
        category(&svc, "backend").await;
        let err = svc
            .add_skill_category(&SkillId::new(), "backend")
            .await
            .unwrap_err();
        assert!(matches!(err, SkillError::SkillNotFound));
    }

    #[tokio::test]
    async fn test_duplicate_category_name() {
        let svc = service();
        category(&svc, "backend").await;
        let err = svc
            .create_category(CreateCategoryRequest {
                name: "backend".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SkillError::NameConflict(_)));
    }

    #[tokio::test]
    async fn test_skill_filter_by_category() {
        let svc = service();
        let rust = skill(&svc, "rust").await;
        skill(&svc, "painting").await;
        let cat = category(&svc, "engineering").await;
        svc.add_skill_category(&rust.id, "engineering").await.unwrap();

        let rows = svc
            .list_rows(Some(SkillFilter {
                category: Some(cat.id),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].detail.category_display(), "engineering");
    }

    #[tokio::test]
    async fn test_skill_approval() {
        let svc = service();
        let s = skill(&svc, "rust").await;
        assert!(svc.accept_skill(&s.id).await.unwrap().tag.is_accepted());
        assert!(svc.reject_skill(&s.id).await.unwrap().tag.is_rejected());

        let other = skill(&svc, "go").await;
        let report = svc
            .bulk(&[s.id, other.id], ApprovalAction::Accept)
            .await
            .unwrap();
        assert_eq!(report.message("skills"), "Accepted 2 skills.");
    }

    #[tokio::test]
    async fn test_skill_alias_protects_parent() {
        let svc = service();
        let parent = skill(&svc, "javascript").await;
        svc.create_skill(CreateTagRequest {
            name: "js".to_string(),
            excerpt: None,
            parent: Some("javascript".to_string()),
        })
        .await
        .unwrap();
        let err = svc.delete_skill(&parent.id).await.unwrap_err();
        assert!(matches!(err, TagError::Protected(_)));
    }
}
