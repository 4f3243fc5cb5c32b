//! In-memory repositories for service tests.
//!
//! All repositories built by [`memory_repos`] share one set of tables so
//! cascades and cross-entity lookups behave like the SQLite store.

use std::sync::{Arc, Mutex};

use folksonomy_types::error::RepositoryError;
use folksonomy_types::id::{CategoryId, SkillId, TagId, UserId, UserSkillId};
use folksonomy_types::skill::{Skill, SkillCategory};
use folksonomy_types::tag::{Tag, Taggable};
use folksonomy_types::user::{User, UserSkill, UserSkillView};

use crate::repository::approval::ApprovalStore;
use crate::repository::category::CategoryRepository;
use crate::repository::skill::{SkillFilter, SkillRepository};
use crate::repository::tag::{TagFilter, TagRepository};
use crate::repository::user::{UserRepository, UserSkillFilter, UserSkillRepository};

#[derive(Default)]
pub(crate) struct Tables {
    tags: Vec<Tag>,
    skills: Vec<Skill>,
    categories: Vec<SkillCategory>,
    links: Vec<(SkillId, CategoryId)>,
    users: Vec<User>,
    user_skills: Vec<UserSkill>,
    approval_saves: usize,
}

type Shared = Arc<Mutex<Tables>>;

#[derive(Default, Clone)]
pub(crate) struct MemoryTagRepository(Shared);
#[derive(Default, Clone)]
pub(crate) struct MemorySkillRepository(Shared);
#[derive(Default, Clone)]
pub(crate) struct MemoryCategoryRepository(Shared);
#[derive(Default, Clone)]
pub(crate) struct MemoryUserRepository(Shared);
#[derive(Default, Clone)]
pub(crate) struct MemoryUserSkillRepository(Shared);

pub(crate) struct MemoryRepos {
    pub tags: MemoryTagRepository,
    pub skills: MemorySkillRepository,
    pub categories: MemoryCategoryRepository,
    pub users: MemoryUserRepository,
    pub user_skills: MemoryUserSkillRepository,
}

pub(crate) fn memory_repos() -> MemoryRepos {
    let shared = Shared::default();
    MemoryRepos {
        tags: MemoryTagRepository(shared.clone()),
        skills: MemorySkillRepository(shared.clone()),
        categories: MemoryCategoryRepository(shared.clone()),
        users: MemoryUserRepository(shared.clone()),
        user_skills: MemoryUserSkillRepository(shared),
    }
}

fn matches_search(haystacks: &[&str], search: &Option<String>) -> bool {
    match search {
        Some(q) => {
            let q = q.to_lowercase();
            haystacks.iter().any(|h| h.to_lowercase().contains(&q))
        }
        None => true,
    }
}

fn page<T>(items: Vec<T>, limit: Option<i64>, offset: Option<i64>) -> Vec<T> {
    let offset = offset.unwrap_or(0).max(0) as usize;
    let limit = limit.map(|l| l.max(0) as usize).unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(limit).collect()
}

impl MemoryTagRepository {
    pub fn insert(&self, tag: Tag) -> TagId {
        let id = tag.id;
        self.0.lock().unwrap().tags.push(tag);
        id
    }

    pub fn snapshot(&self, id: &TagId) -> Option<Tag> {
        self.0.lock().unwrap().tags.iter().find(|t| t.id == *id).cloned()
    }

    pub fn save_count(&self) -> usize {
        self.0.lock().unwrap().approval_saves
    }
}

impl ApprovalStore for MemoryTagRepository {
    type Id = TagId;

    async fn find_taggable(&self, id: &TagId) -> Result<Option<Taggable<TagId>>, RepositoryError> {
        Ok(self.snapshot(id).map(|t| t.tag))
    }

    async fn save_approval(&self, id: &TagId, tag: &Taggable<TagId>) -> Result<(), RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        let stored = tables
            .tags
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        stored.tag.state = tag.state;
        stored.tag.accepted_at = tag.accepted_at;
        stored.tag.rejected_at = tag.rejected_at;
        stored.tag.updated_at = tag.updated_at;
        tables.approval_saves += 1;
        Ok(())
    }
}

impl TagRepository for MemoryTagRepository {
    async fn create(&self, tag: &Tag) -> Result<Tag, RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        if tables.tags.iter().any(|t| t.tag.name == tag.tag.name) {
            return Err(RepositoryError::Conflict(format!(
                "name '{}' already exists",
                tag.tag.name
            )));
        }
        tables.tags.push(tag.clone());
        Ok(tag.clone())
    }

    async fn get_by_id(&self, id: &TagId) -> Result<Option<Tag>, RepositoryError> {
        Ok(self.snapshot(id))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>, RepositoryError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.tags.iter().find(|t| t.tag.name == name).cloned())
    }

    async fn list(&self, filter: Option<TagFilter>) -> Result<Vec<Tag>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let tables = self.0.lock().unwrap();
        let mut tags: Vec<Tag> = tables
            .tags
            .iter()
            .filter(|t| filter.state.is_none_or(|s| t.tag.state == s))
            .filter(|t| filter.root_only.is_none_or(|root| t.tag.parent.is_none() == root))
            .filter(|t| matches_search(&[&t.tag.name, &t.tag.excerpt], &filter.search))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.tag.name.cmp(&b.tag.name));
        Ok(page(tags, filter.limit, filter.offset))
    }

    async fn update(&self, tag: &Tag) -> Result<Tag, RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        if tables
            .tags
            .iter()
            .any(|t| t.id != tag.id && t.tag.name == tag.tag.name)
        {
            return Err(RepositoryError::Conflict(tag.tag.name.clone()));
        }
        let stored = tables
            .tags
            .iter_mut()
            .find(|t| t.id == tag.id)
            .ok_or(RepositoryError::NotFound)?;
        *stored = tag.clone();
        Ok(tag.clone())
    }

    async fn delete(&self, id: &TagId) -> Result<(), RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        if tables.tags.iter().any(|t| t.tag.parent == Some(*id)) {
            return Err(RepositoryError::Protected("referenced by aliases".to_string()));
        }
        let before = tables.tags.len();
        tables.tags.retain(|t| t.id != *id);
        if tables.tags.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl MemorySkillRepository {
    pub fn snapshot(&self, id: &SkillId) -> Option<Skill> {
        self.0.lock().unwrap().skills.iter().find(|s| s.id == *id).cloned()
    }
}

impl ApprovalStore for MemorySkillRepository {
    type Id = SkillId;

    async fn find_taggable(
        &self,
        id: &SkillId,
    ) -> Result<Option<Taggable<SkillId>>, RepositoryError> {
        Ok(self.snapshot(id).map(|s| s.tag))
    }

    async fn save_approval(
        &self,
        id: &SkillId,
        tag: &Taggable<SkillId>,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        let stored = tables
            .skills
            .iter_mut()
            .find(|s| s.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        stored.tag.state = tag.state;
        stored.tag.accepted_at = tag.accepted_at;
        stored.tag.rejected_at = tag.rejected_at;
        stored.tag.updated_at = tag.updated_at;
        tables.approval_saves += 1;
        Ok(())
    }
}

impl SkillRepository for MemorySkillRepository {
    async fn create(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        if tables.skills.iter().any(|s| s.tag.name == skill.tag.name) {
            return Err(RepositoryError::Conflict(skill.tag.name.clone()));
        }
        tables.skills.push(skill.clone());
        Ok(skill.clone())
    }

    async fn get_by_id(&self, id: &SkillId) -> Result<Option<Skill>, RepositoryError> {
        Ok(self.snapshot(id))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Skill>, RepositoryError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.skills.iter().find(|s| s.tag.name == name).cloned())
    }

    async fn list(&self, filter: Option<SkillFilter>) -> Result<Vec<Skill>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let tables = self.0.lock().unwrap();
        let mut skills: Vec<Skill> = tables
            .skills
            .iter()
            .filter(|s| filter.state.is_none_or(|st| s.tag.state == st))
            .filter(|s| filter.root_only.is_none_or(|root| s.tag.parent.is_none() == root))
            .filter(|s| {
                filter
                    .category
                    .is_none_or(|c| tables.links.contains(&(s.id, c)))
            })
            .filter(|s| matches_search(&[&s.tag.name], &filter.search))
            .cloned()
            .collect();
        skills.sort_by(|a, b| a.tag.name.cmp(&b.tag.name));
        Ok(page(skills, filter.limit, filter.offset))
    }

    async fn update(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        if tables
            .skills
            .iter()
            .any(|s| s.id != skill.id && s.tag.name == skill.tag.name)
        {
            return Err(RepositoryError::Conflict(skill.tag.name.clone()));
        }
        let stored = tables
            .skills
            .iter_mut()
            .find(|s| s.id == skill.id)
            .ok_or(RepositoryError::NotFound)?;
        *stored = skill.clone();
        Ok(skill.clone())
    }

    async fn delete(&self, id: &SkillId) -> Result<(), RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        if tables.skills.iter().any(|s| s.tag.parent == Some(*id)) {
            return Err(RepositoryError::Protected("referenced by aliases".to_string()));
        }
        let before = tables.skills.len();
        tables.skills.retain(|s| s.id != *id);
        if tables.skills.len() == before {
            return Err(RepositoryError::NotFound);
        }
        tables.links.retain(|(s, _)| s != id);
        tables.user_skills.retain(|us| us.skill_id != *id);
        Ok(())
    }

    async fn set_categories(
        &self,
        id: &SkillId,
        categories: &[CategoryId],
    ) -> Result<(), RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        tables.links.retain(|(s, _)| s != id);
        for c in categories {
            if !tables.links.contains(&(*id, *c)) {
                tables.links.push((*id, *c));
            }
        }
        Ok(())
    }

    async fn add_category(&self, id: &SkillId, category: &CategoryId) -> Result<(), RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        if !tables.links.contains(&(*id, *category)) {
            tables.links.push((*id, *category));
        }
        Ok(())
    }

    async fn remove_category(
        &self,
        id: &SkillId,
        category: &CategoryId,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        tables.links.retain(|link| *link != (*id, *category));
        Ok(())
    }

    async fn list_categories(&self, id: &SkillId) -> Result<Vec<SkillCategory>, RepositoryError> {
        let tables = self.0.lock().unwrap();
        let mut categories: Vec<SkillCategory> = tables
            .categories
            .iter()
            .filter(|c| tables.links.contains(&(*id, c.id)))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

impl CategoryRepository for MemoryCategoryRepository {
    async fn create(&self, category: &SkillCategory) -> Result<SkillCategory, RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        if tables.categories.iter().any(|c| c.name == category.name) {
            return Err(RepositoryError::Conflict(category.name.clone()));
        }
        tables.categories.push(category.clone());
        Ok(category.clone())
    }

    async fn get_by_id(&self, id: &CategoryId) -> Result<Option<SkillCategory>, RepositoryError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.id == *id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<SkillCategory>, RepositoryError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn list(&self, search: Option<String>) -> Result<Vec<SkillCategory>, RepositoryError> {
        let tables = self.0.lock().unwrap();
        let mut categories: Vec<SkillCategory> = tables
            .categories
            .iter()
            .filter(|c| matches_search(&[&c.name], &search))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != *id);
        if tables.categories.len() == before {
            return Err(RepositoryError::NotFound);
        }
        tables.links.retain(|(_, c)| c != id);
        Ok(())
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict(user.username.clone()));
        }
        tables.users.push(user.clone());
        Ok(user.clone())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list(&self, search: Option<String>) -> Result<Vec<User>, RepositoryError> {
        let tables = self.0.lock().unwrap();
        let mut users: Vec<User> = tables
            .users
            .iter()
            .filter(|u| matches_search(&[&u.username], &search))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != *id);
        if tables.users.len() == before {
            return Err(RepositoryError::NotFound);
        }
        tables.user_skills.retain(|us| us.user_id != *id);
        Ok(())
    }
}

impl MemoryUserSkillRepository {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().user_skills.len()
    }
}

impl UserSkillRepository for MemoryUserSkillRepository {
    async fn create(&self, user_skill: &UserSkill) -> Result<UserSkill, RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        let user_exists = tables.users.iter().any(|u| u.id == user_skill.user_id);
        let skill_exists = tables.skills.iter().any(|s| s.id == user_skill.skill_id);
        if !user_exists || !skill_exists {
            return Err(RepositoryError::Query("FOREIGN KEY constraint failed".to_string()));
        }
        tables.user_skills.push(user_skill.clone());
        Ok(user_skill.clone())
    }

    async fn get_by_id(&self, id: &UserSkillId) -> Result<Option<UserSkill>, RepositoryError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.user_skills.iter().find(|us| us.id == *id).cloned())
    }

    async fn list(
        &self,
        filter: Option<UserSkillFilter>,
    ) -> Result<Vec<UserSkillView>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let tables = self.0.lock().unwrap();
        let mut views = Vec::new();
        for us in tables.user_skills.iter().rev() {
            let Some(user) = tables.users.iter().find(|u| u.id == us.user_id) else {
                continue;
            };
            let Some(skill) = tables.skills.iter().find(|s| s.id == us.skill_id) else {
                continue;
            };
            if filter.user_id.is_some_and(|id| id != us.user_id)
                || filter.skill_id.is_some_and(|id| id != us.skill_id)
                || !matches_search(&[&user.username, &skill.tag.name], &filter.search)
            {
                continue;
            }
            views.push(UserSkillView {
                user_skill: us.clone(),
                username: user.username.clone(),
                skill_name: skill.tag.name.clone(),
            });
        }
        Ok(page(views, filter.limit, filter.offset))
    }

    async fn update(&self, user_skill: &UserSkill) -> Result<UserSkill, RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        let stored = tables
            .user_skills
            .iter_mut()
            .find(|us| us.id == user_skill.id)
            .ok_or(RepositoryError::NotFound)?;
        *stored = user_skill.clone();
        Ok(user_skill.clone())
    }

    async fn delete(&self, id: &UserSkillId) -> Result<(), RepositoryError> {
        let mut tables = self.0.lock().unwrap();
        let before = tables.user_skills.len();
        tables.user_skills.retain(|us| us.id != *id);
        if tables.user_skills.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
