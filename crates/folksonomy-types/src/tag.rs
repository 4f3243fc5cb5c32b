use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::id::TagId;

/// Maximum length (in characters) of a tag or skill name.
pub const MAX_TAG_NAME_LEN: usize = 150;

/// Approval state of a tag-like record.
///
/// Stored and serialized in upper case (`PROPOSED`, `ACCEPTED`, `REJECTED`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TagState {
    Proposed,
    Accepted,
    Rejected,
}

impl TagState {
    /// Human-readable label for admin listings.
    pub fn label(&self) -> &'static str {
        match self {
            TagState::Proposed => "Proposed",
            TagState::Accepted => "Accepted",
            TagState::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for TagState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagState::Proposed => write!(f, "PROPOSED"),
            TagState::Accepted => write!(f, "ACCEPTED"),
            TagState::Rejected => write!(f, "REJECTED"),
        }
    }
}

impl FromStr for TagState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PROPOSED" => Ok(TagState::Proposed),
            "ACCEPTED" => Ok(TagState::Accepted),
            "REJECTED" => Ok(TagState::Rejected),
            other => Err(format!("invalid tag state: '{other}'")),
        }
    }
}

impl Default for TagState {
    fn default() -> Self {
        TagState::Proposed
    }
}

/// The fields shared by every tag-like entity.
///
/// `P` is the identifier type of the alias parent, so a tag can only alias
/// another tag and a skill can only alias another skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taggable<P> {
    /// The tag value itself.
    pub name: String,
    /// A short description of the tag.
    pub excerpt: String,
    /// Canonical parent this record is a synonym of.
    pub parent: Option<P>,
    pub state: TagState,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every save.
    pub updated_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
}

impl<P> Taggable<P> {
    /// A freshly proposed record with no approval stamps.
    pub fn new(
        name: impl Into<String>,
        excerpt: impl Into<String>,
        parent: Option<P>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            excerpt: excerpt.into(),
            parent,
            state: TagState::Proposed,
            created_at: now,
            updated_at: now,
            accepted_at: None,
            rejected_at: None,
        }
    }

    pub fn is_proposed(&self) -> bool {
        self.state == TagState::Proposed
    }

    pub fn is_accepted(&self) -> bool {
        self.state == TagState::Accepted
    }

    pub fn is_rejected(&self) -> bool {
        self.state == TagState::Rejected
    }

    /// True when this record is a synonym of another one.
    pub fn is_alias(&self) -> bool {
        self.parent.is_some()
    }

    /// Mark as accepted. Unconditional: any state may be accepted again.
    pub fn accept(&mut self, now: DateTime<Utc>) {
        self.state = TagState::Accepted;
        self.accepted_at = Some(now);
        self.rejected_at = None;
        self.updated_at = now;
    }

    /// Mark as rejected. Unconditional: any state may be rejected again.
    pub fn reject(&mut self, now: DateTime<Utc>) {
        self.state = TagState::Rejected;
        self.rejected_at = Some(now);
        self.accepted_at = None;
        self.updated_at = now;
    }

    /// Refresh `updated_at` before a save.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// A generic folksonomy tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    #[serde(flatten)]
    pub tag: Taggable<TagId>,
}

impl Tag {
    pub fn new(tag: Taggable<TagId>) -> Self {
        Self {
            id: TagId::new(),
            tag,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag.name)
    }
}

/// Request to create a tag-like record. Only `name` is required.
///
/// `parent` may be the parent's id or its name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub excerpt: Option<String>,
    pub parent: Option<String>,
}

/// Partial update of a tag-like record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub excerpt: Option<String>,
    /// New parent, by id or name.
    pub parent: Option<String>,
    /// Turn an alias back into a root record.
    #[serde(default)]
    pub clear_parent: bool,
}

/// Trim a name and check it against a maximum length.
///
/// # Examples
///
/// ```
/// use folksonomy_types::tag::normalize_name;
///
/// assert_eq!(normalize_name("  rust ", 150).unwrap(), "rust");
/// assert!(normalize_name("   ", 150).is_err());
/// ```
pub fn normalize_name(raw: &str, max_len: usize) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    let len = name.chars().count();
    if len > max_len {
        return Err(format!("name is {len} characters long, the maximum is {max_len}"));
    }
    Ok(name.to_string())
}
