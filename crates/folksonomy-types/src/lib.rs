//! Shared domain types for Folksonomy.
//!
//! Tags, skills, categories, users and user-skill assignments, plus the
//! error enums and global configuration used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod id;
pub mod skill;
pub mod tag;
pub mod user;
