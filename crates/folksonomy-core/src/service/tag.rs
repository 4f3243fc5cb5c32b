//! Tag management service.
//!
//! CRUD for generic tags plus the accept/reject workflow. Names are unique;
//! an alias must point at an existing tag other than itself, and a tag
//! cannot be deleted while aliases point at it.

use chrono::Utc;

use folksonomy_types::error::{RepositoryError, TagError};
use folksonomy_types::id::TagId;
use folksonomy_types::tag::{
    normalize_name, CreateTagRequest, Tag, Taggable, UpdateTagRequest, MAX_TAG_NAME_LEN,
};

use crate::admin::TagRow;
use crate::repository::tag::{TagFilter, TagRepository};
use crate::service::approval::{self, ApprovalAction, BulkActionReport};

/// Service over a [`TagRepository`].
pub struct TagService<R: TagRepository> {
    repo: R,
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

impl<R: TagRepository> TagService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new, proposed tag.
    pub async fn create_tag(&self, request: CreateTagRequest) -> Result<Tag, TagError> {
        let name = normalize_name(&request.name, MAX_TAG_NAME_LEN).map_err(TagError::InvalidName)?;

        let parent = match request.parent.as_deref() {
            Some(reference) => Some(self.resolve_parent(reference).await?),
            None => None,
        };

        let tag = Tag::new(Taggable::new(
            name.clone(),
            request.excerpt.unwrap_or_default(),
            parent,
            Utc::now(),
        ));

        let tag = self
            .repo
            .create(&tag)
            .await
            .map_err(|e| map_write_error(e, &name))?;
        tracing::debug!(id = %tag.id, name = %tag.tag.name, "tag created");
        Ok(tag)
    }

    async fn resolve_parent(&self, reference: &str) -> Result<TagId, TagError> {
        match self.resolve(reference).await {
            Ok(tag) => Ok(tag.id),
            Err(TagError::NotFound) => Err(TagError::InvalidParent(format!(
                "no tag matches '{reference}'"
            ))),
            Err(e) => Err(e),
        }
    }

    /// Look a tag up by id, falling back to its name.
    pub async fn resolve(&self, reference: &str) -> Result<Tag, TagError> {
        if let Ok(id) = reference.parse::<TagId>() {
            if let Some(tag) = self.repo.get_by_id(&id).await.map_err(storage)? {
                return Ok(tag);
            }
        }
        self.get_tag_by_name(reference.trim()).await
    }

    pub async fn get_tag(&self, id: &TagId) -> Result<Tag, TagError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(TagError::NotFound)
    }

    pub async fn get_tag_by_name(&self, name: &str) -> Result<Tag, TagError> {
        self.repo
            .get_by_name(name)
            .await
            .map_err(storage)?
            .ok_or(TagError::NotFound)
    }

    pub async fn list_tags(&self, filter: Option<TagFilter>) -> Result<Vec<Tag>, TagError> {
        self.repo.list(filter).await.map_err(storage)
    }

    /// List tags with their parent names resolved, for admin tables.
    pub async fn list_rows(&self, filter: Option<TagFilter>) -> Result<Vec<TagRow>, TagError> {
        let tags = self.list_tags(filter).await?;
        let mut rows = Vec::with_capacity(tags.len());
        for tag in tags {
            let parent_name = match tag.tag.parent {
                Some(parent) => self.repo.get_by_id(&parent).await.map_err(storage)?.map(|p| p.tag.name),
                None => None,
            };
            rows.push(TagRow { tag, parent_name });
        }
        Ok(rows)
    }

    /// Update name, excerpt or parent. Every save refreshes `updated_at`.
    pub async fn update_tag(&self, id: &TagId, request: UpdateTagRequest) -> Result<Tag, TagError> {
        let mut tag = self.get_tag(id).await?;

        if let Some(name) = request.name {
            tag.tag.name = normalize_name(&name, MAX_TAG_NAME_LEN).map_err(TagError::InvalidName)?;
        }
        if let Some(excerpt) = request.excerpt {
            tag.tag.excerpt = excerpt;
        }
        if request.clear_parent {
            tag.tag.parent = None;
        } else if let Some(reference) = request.parent {
            let parent = self.resolve_parent(&reference).await?;
            if parent == tag.id {
                return Err(TagError::InvalidParent("a tag cannot alias itself".to_string()));
            }
            tag.tag.parent = Some(parent);
        }

        tag.tag.touch(Utc::now());

        let name = tag.tag.name.clone();
        self.repo
            .update(&tag)
            .await
            .map_err(|e| map_write_error(e, &name))
    }

    /// Permanently delete a tag. Refused while aliases point at it.
    pub async fn delete_tag(&self, id: &TagId) -> Result<(), TagError> {
        let tag = self.get_tag(id).await?;
        self.repo
            .delete(id)
            .await
            .map_err(|e| map_write_error(e, &tag.tag.name))?;
        tracing::debug!(%id, name = %tag.tag.name, "tag deleted");
        Ok(())
    }

    pub async fn accept_tag(&self, id: &TagId) -> Result<Tag, TagError> {
        self.apply(id, ApprovalAction::Accept).await
    }

    pub async fn reject_tag(&self, id: &TagId) -> Result<Tag, TagError> {
        self.apply(id, ApprovalAction::Reject).await
    }

    async fn apply(&self, id: &TagId, action: ApprovalAction) -> Result<Tag, TagError> {
        let tag = approval::transition(&self.repo, id, action).await?;
        Ok(Tag { id: *id, tag })
    }

    /// Run an admin bulk action over the selected tags.
    pub async fn bulk(
        &self,
        ids: &[TagId],
        action: ApprovalAction,
    ) -> Result<BulkActionReport, TagError> {
        approval::transition_many(&self.repo, ids, action).await
    }
}
