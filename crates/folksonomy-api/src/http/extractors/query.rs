//! Query and body extractors for list and bulk endpoints.

use serde::Deserialize;

use folksonomy_core::repository::SortOrder;
use folksonomy_core::repository::skill::SkillFilter;
use folksonomy_core::repository::tag::TagFilter;
use folksonomy_types::id::CategoryId;
use folksonomy_types::tag::TagState;

use crate::http::error::AppError;

/// Query parameters for the tag and skill list endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct TaggableListQuery {
    /// Filter by state (proposed, accepted, rejected).
    pub state: Option<String>,
    /// `true` for root records only, `false` for aliases only.
    pub root_only: Option<bool>,
    /// Category name or id (skills only).
    pub category: Option<String>,
    pub search: Option<String>,
    #[serde(default = "default_sort")]
    pub sort: String,
    /// Sort order (asc, desc).
    #[serde(default = "default_order")]
    pub order: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn default_sort() -> String {
    "name".to_string()
}

fn default_order() -> String {
    "asc".to_string()
}

impl TaggableListQuery {
    fn parsed_state(&self) -> Result<Option<TagState>, AppError> {
        self.state
            .as_deref()
            .map(|s| s.parse::<TagState>().map_err(AppError::Validation))
            .transpose()
    }

    fn sort_order(&self) -> SortOrder {
        match self.order.to_lowercase().as_str() {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn tag_filter(&self, limit: i64) -> Result<TagFilter, AppError> {
        Ok(TagFilter {
            state: self.parsed_state()?,
            root_only: self.root_only,
            search: self.search.clone(),
            sort_by: Some(self.sort.clone()),
            sort_order: Some(self.sort_order()),
            limit: Some(limit),
            offset: self.offset,
        })
    }

    /// The category must already be resolved by the caller.
    pub fn skill_filter(
        &self,
        category: Option<CategoryId>,
        limit: i64,
    ) -> Result<SkillFilter, AppError> {
        Ok(SkillFilter {
            state: self.parsed_state()?,
            category,
            root_only: self.root_only,
            search: self.search.clone(),
            sort_by: Some(self.sort.clone()),
            sort_order: Some(self.sort_order()),
            limit: Some(limit),
            offset: self.offset,
        })
    }
}

/// `?search=` for categories and users.
#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Query parameters for the user-skill list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct UserSkillListQuery {
    /// Username or id.
    pub user: Option<String>,
    /// Skill name or id.
    pub skill: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Body of the bulk action endpoints.
#[derive(Debug, Deserialize)]
pub struct BulkActionBody {
    pub ids: Vec<String>,
}

impl BulkActionBody {
    /// Parse every id, failing on the first malformed one.
    pub fn parse_ids<I: std::str::FromStr>(&self) -> Result<Vec<I>, AppError> {
        self.ids
            .iter()
            .map(|raw| {
                raw.parse::<I>()
                    .map_err(|_| AppError::Validation(format!("invalid id '{raw}'")))
            })
            .collect()
    }
}

/// Body of `PUT /skills/{id}/categories`.
#[derive(Debug, Deserialize)]
pub struct SkillCategoriesBody {
    /// Category names or ids; replaces the current set.
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use folksonomy_types::id::TagId;

    #[test]
    fn test_defaults_sort_by_name_ascending() {
        let query: TaggableListQuery = serde_json::from_str("{}").unwrap();
        let filter = query.tag_filter(100).unwrap();
        assert_eq!(filter.sort_by.as_deref(), Some("name"));
        assert_eq!(filter.sort_order, Some(SortOrder::Asc));
        assert_eq!(filter.limit, Some(100));
    }

    #[test]
    fn test_invalid_state_is_validation_error() {
        let query = TaggableListQuery {
            state: Some("pending".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.tag_filter(10), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_bulk_body_parses_ids() {
        let id = TagId::new();
        let body = BulkActionBody {
            ids: vec![id.to_string()],
        };
        assert_eq!(body.parse_ids::<TagId>().unwrap(), vec![id]);

        let body = BulkActionBody {
            ids: vec![id.to_string(), "nope".to_string()],
        };
        assert!(body.parse_ids::<TagId>().is_err());
    }
}
