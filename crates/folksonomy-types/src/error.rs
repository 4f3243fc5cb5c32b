use thiserror::Error;

/// Errors related to tag and skill operations (both are tag-like records).
#[derive(Debug, Error)]
pub enum TagError {
    #[error("tag not found")]
    NotFound,

    #[error("name '{0}' already exists")]
    NameConflict(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid parent: {0}")]
    InvalidParent(String),

    #[error("cannot delete '{0}': it is the parent of one or more aliases")]
    Protected(String),

    #[error("bulk action stopped after {completed} record(s): {reason}")]
    BulkActionAborted { completed: usize, reason: String },

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to categories, users and user-skill assignments.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("category not found")]
    CategoryNotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("skill not found")]
    SkillNotFound,

    #[error("user skill not found")]
    UserSkillNotFound,

    #[error("name '{0}' already exists")]
    NameConflict(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid skill level: {0}")]
    InvalidLevel(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in folksonomy-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("protected: {0}")]
    Protected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_error_display() {
        let err = TagError::NameConflict("rust".to_string());
        assert_eq!(err.to_string(), "name 'rust' already exists");
    }

    #[test]
    fn test_bulk_error_reports_progress() {
        let err = TagError::BulkActionAborted {
            completed: 2,
            reason: "tag not found".to_string(),
        };
        assert!(err.to_string().contains("after 2 record(s)"));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
