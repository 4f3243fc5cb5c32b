//! Admin console configuration.
//!
//! Each registered entity has a [`ModelAdmin`] describing its list columns,
//! filters, search fields and bulk actions. The whole set is an
//! [`AdminSite`] value handed to the CLI and the HTTP layer; nothing is
//! registered globally.

use serde::Serialize;

use folksonomy_types::skill::{SkillCategory, SkillDetail};
use folksonomy_types::tag::Tag;
use folksonomy_types::user::{User, UserSkillView};

use crate::service::approval::{ApprovalAction, BulkActionReport};

/// Filters an admin list can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListFilter {
    /// By approval state.
    State,
    /// By linked category.
    Category,
    /// Aliases versus root records.
    AliasOrRoot,
}

/// A bulk action offered on a model's list page.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAction {
    pub action: ApprovalAction,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelAdmin {
    /// Registry key, e.g. "tag" or "user_skill".
    pub model: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: Vec<&'static str>,
    pub list_filter: Vec<ListFilter>,
    pub search_fields: Vec<&'static str>,
    /// Foreign keys edited by id rather than with a picker.
    pub raw_id_fields: Vec<&'static str>,
    pub readonly_fields: Vec<&'static str>,
    pub actions: Vec<AdminAction>,
}

impl ModelAdmin {
    fn new(model: &'static str, verbose_name: &'static str, verbose_name_plural: &'static str) -> Self {
        Self {
            model,
            verbose_name,
            verbose_name_plural,
            list_display: Vec::new(),
            list_filter: Vec::new(),
            search_fields: Vec::new(),
            raw_id_fields: Vec::new(),
            readonly_fields: Vec::new(),
            actions: Vec::new(),
        }
    }

    fn with_approval_actions(mut self) -> Self {
        self.actions = [ApprovalAction::Accept, ApprovalAction::Reject]
            .into_iter()
            .map(|action| AdminAction {
                action,
                description: format!("{} selected {}", action.verb(), self.verbose_name_plural),
            })
            .collect();
        self
    }

    pub fn has_filter(&self, filter: ListFilter) -> bool {
        self.list_filter.contains(&filter)
    }

    pub fn has_action(&self, action: ApprovalAction) -> bool {
        self.actions.iter().any(|a| a.action == action)
    }

    /// Column headers for `list_display` ("created_at" -> "Created at").
    pub fn column_labels(&self) -> Vec<String> {
        self.list_display.iter().map(|c| column_label(c)).collect()
    }

    /// Render rows into display cells following `list_display`.
    pub fn render<R: AdminRow>(&self, rows: &[R]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| {
                self.list_display
                    .iter()
                    .map(|column| row.column(column).unwrap_or_else(|| "-".to_string()))
                    .collect()
            })
            .collect()
    }

    /// Result message of a bulk action, e.g. "Accepted 3 tags.".
    pub fn action_message(&self, report: &BulkActionReport) -> String {
        report.message(self.verbose_name_plural)
    }
}

fn column_label(column: &str) -> String {
    let spaced = column.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The set of registered admin models.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSite {
    pub models: Vec<ModelAdmin>,
}

impl AdminSite {
    /// The standard registrations for tags, skills, categories, users and
    /// user skills.
    pub fn standard() -> Self {
        let mut tag = ModelAdmin::new("tag", "tag", "tags").with_approval_actions();
        tag.list_display = vec!["name", "parent", "created_at", "state"];
        tag.list_filter = vec![ListFilter::State, ListFilter::AliasOrRoot];
        tag.search_fields = vec!["name", "excerpt"];

        let mut skill = ModelAdmin::new("skill", "skill", "skills").with_approval_actions();
        skill.list_display = vec!["name", "parent", "categories", "created_at", "state"];
        skill.list_filter = vec![ListFilter::State, ListFilter::Category, ListFilter::AliasOrRoot];
        skill.search_fields = vec!["name"];
        skill.raw_id_fields = vec!["users", "categories"];

        let mut category = ModelAdmin::new("skill_category", "skill category", "tag categories");
        category.list_display = vec!["name", "created_at"];
        category.search_fields = vec!["name"];

        let mut user = ModelAdmin::new("user", "user", "users");
        user.list_display = vec!["username", "created_at"];
        user.search_fields = vec!["username"];

        let mut user_skill = ModelAdmin::new("user_skill", "user skill", "user skills");
        user_skill.list_display = vec!["user", "skill", "skill_level", "created_at"];
        user_skill.readonly_fields = vec!["created_at"];
        user_skill.raw_id_fields = vec!["user", "skill"];
        user_skill.search_fields = vec!["user__username", "skill__name"];

        Self {
            models: vec![tag, skill, category, user, user_skill],
        }
    }

    pub fn get(&self, model: &str) -> Option<&ModelAdmin> {
        self.models.iter().find(|m| m.model == model)
    }
}

/// Something that can be shown as a row of an admin list.
pub trait AdminRow {
    /// Display text of a `list_display` column, `None` for unknown columns.
    fn column(&self, name: &str) -> Option<String>;
}

fn format_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// A tag with its parent's name resolved.
#[derive(Debug, Clone, Serialize)]
pub struct TagRow {
    #[serde(flatten)]
    pub tag: Tag,
    pub parent_name: Option<String>,
}

impl AdminRow for TagRow {
    fn column(&self, name: &str) -> Option<String> {
        let t = &self.tag.tag;
        match name {
            "id" => Some(self.tag.id.to_string()),
            "name" => Some(t.name.clone()),
            "excerpt" => Some(t.excerpt.clone()),
            "parent" => Some(self.parent_name.clone().unwrap_or_else(|| "-".to_string())),
            "state" => Some(t.state.label().to_string()),
            "created_at" => Some(format_time(&t.created_at)),
            "updated_at" => Some(format_time(&t.updated_at)),
            _ => None,
        }
    }
}

/// A skill with categories and its parent's name resolved.
#[derive(Debug, Clone, Serialize)]
pub struct SkillRow {
    #[serde(flatten)]
    pub detail: SkillDetail,
    pub parent_name: Option<String>,
}

impl AdminRow for SkillRow {
    fn column(&self, name: &str) -> Option<String> {
        let t = &self.detail.skill.tag;
        match name {
            "id" => Some(self.detail.skill.id.to_string()),
            "name" => Some(t.name.clone()),
            "excerpt" => Some(t.excerpt.clone()),
            "parent" => Some(self.parent_name.clone().unwrap_or_else(|| "-".to_string())),
            "categories" => Some(self.detail.category_display()),
            "state" => Some(t.state.label().to_string()),
            "created_at" => Some(format_time(&t.created_at)),
            "updated_at" => Some(format_time(&t.updated_at)),
            _ => None,
        }
    }
}

impl AdminRow for SkillCategory {
    fn column(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "created_at" => Some(format_time(&self.created_at)),
            _ => None,
        }
    }
}

impl AdminRow for User {
    fn column(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "username" => Some(self.username.clone()),
            "created_at" => Some(format_time(&self.created_at)),
            _ => None,
        }
    }
}

impl AdminRow for UserSkillView {
    fn column(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.user_skill.id.to_string()),
            "user" => Some(self.username.clone()),
            "skill" => Some(self.skill_name.clone()),
            "skill_level" => Some(self.user_skill.skill_level.to_string()),
            "created_at" => Some(format_time(&self.user_skill.created_at)),
            "updated_at" => Some(format_time(&self.user_skill.updated_at)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use folksonomy_types::skill::Skill;
    use folksonomy_types::tag::Taggable;

    #[test]
    fn test_standard_site_registrations() {
        let site = AdminSite::standard();
        let names: Vec<&str> = site.models.iter().map(|m| m.model).collect();
        assert_eq!(names, vec!["tag", "skill", "skill_category", "user", "user_skill"]);

        let tag = site.get("tag").unwrap();
        assert_eq!(tag.search_fields, vec!["name", "excerpt"]);
        assert!(tag.has_action(ApprovalAction::Accept));
        assert!(tag.has_action(ApprovalAction::Reject));
        assert!(!tag.has_filter(ListFilter::Category));

        let user_skill = site.get("user_skill").unwrap();
        assert!(user_skill.actions.is_empty());
        assert_eq!(user_skill.readonly_fields, vec!["created_at"]);
    }

    #[test]
    fn test_action_descriptions() {
        let site = AdminSite::standard();
        let skill = site.get("skill").unwrap();
        assert_eq!(skill.actions[0].description, "Accept selected skills");
        assert_eq!(skill.actions[1].description, "Reject selected skills");
    }

    #[test]
    fn test_action_message() {
        let site = AdminSite::standard();
        let report = BulkActionReport {
            action: ApprovalAction::Reject,
            processed: 2,
        };
        assert_eq!(site.get("tag").unwrap().action_message(&report), "Rejected 2 tags.");
    }

    #[test]
    fn test_column_labels() {
        let site = AdminSite::standard();
        assert_eq!(
            site.get("user_skill").unwrap().column_labels(),
            vec!["User", "Skill", "Skill level", "Created at"]
        );
    }

    #[test]
    fn test_render_skill_rows() {
        let site = AdminSite::standard();
        let row = SkillRow {
            detail: SkillDetail {
                skill: Skill::new(Taggable::new("js", "", None, Utc::now())),
                categories: vec![SkillCategory::new("frontend"), SkillCategory::new("web")],
            },
            parent_name: Some("javascript".to_string()),
        };
        let cells = site.get("skill").unwrap().render(&[row]);
        assert_eq!(cells[0][0], "js");
        assert_eq!(cells[0][1], "javascript");
        assert_eq!(cells[0][2], "frontend, web");
        assert_eq!(cells[0][4], "Proposed");
    }

    #[test]
    fn test_unknown_column_renders_dash() {
        let mut model = AdminSite::standard().get("user").unwrap().clone();
        model.list_display.push("email");
        let cells = model.render(&[User::new("ada")]);
        assert_eq!(cells[0][2], "-");
    }
}
