//! Global configuration types for Folksonomy.
//!
//! `GlobalConfig` represents the top-level `config.toml` in the data
//! directory: database file name, admin server address and list defaults.

use serde::{Deserialize, Serialize};

/// Top-level configuration. Every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// SQLite file name, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Page size used by list commands when no limit is given.
    #[serde(default = "default_list_limit")]
    pub default_list_limit: i64,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_database_file() -> String {
    "folksonomy.db".to_string()
}

fn default_list_limit() -> i64 {
    100
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            default_list_limit: default_list_limit(),
            server: ServerConfig::default(),
        }
    }
}

/// Bind address of the admin HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.database_file, "folksonomy.db");
        assert_eq!(config.default_list_limit, 100);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.database_file, "folksonomy.db");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
database_file = "tags.db"
default_list_limit = 25

[server]
port = 8080
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database_file, "tags.db");
        assert_eq!(config.default_list_limit, 25);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
