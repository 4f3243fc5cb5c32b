//! Infrastructure layer for Folksonomy.
//!
//! Contains implementations of the repository traits defined in `folksonomy-core`
//! (SQLite storage), plus config loading and data directory resolution.

pub mod config;
pub mod filesystem;
pub mod sqlite;
