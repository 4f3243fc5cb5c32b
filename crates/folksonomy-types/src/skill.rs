use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::id::{CategoryId, SkillId};
use crate::tag::Taggable;

/// Maximum length (in characters) of a category name.
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

/// A skill that users can have. Carries the full set of tag fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    #[serde(flatten)]
    pub tag: Taggable<SkillId>,
}

impl Skill {
    pub fn new(tag: Taggable<SkillId>) -> Self {
        Self {
            id: SkillId::new(),
            tag,
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag.name)
    }
}

/// Used to label skills for filtering and management purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl SkillCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A skill together with its categories, as shown in admin listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDetail {
    #[serde(flatten)]
    pub skill: Skill,
    pub categories: Vec<SkillCategory>,
}

impl SkillDetail {
    pub fn category_display(&self) -> String {
        category_display(&self.categories)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// Return all of the category names as a comma-separated string.
///
/// Recomputed on every call; the order is the order of `categories`.
///
/// ```
/// use folksonomy_types::skill::{category_display, SkillCategory};
///
/// let cats = vec![SkillCategory::new("backend"), SkillCategory::new("ops")];
/// assert_eq!(category_display(&cats), "backend, ops");
/// assert_eq!(category_display(&[]), "");
/// ```
pub fn category_display(categories: &[SkillCategory]) -> String {
    categories
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
