//! Global configuration loader for Folksonomy.
//!
//! Reads `config.toml` from the data directory (`~/.folksonomy/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use folksonomy_types::config::GlobalConfig;

/// Smallest page size a listing may use.
const MIN_LIST_LIMIT: i64 = 1;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Page size for a listing: the explicit limit if given, else the configured
/// default. Never below one.
pub fn resolve_list_limit(config: &GlobalConfig, requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(config.default_list_limit)
        .max(MIN_LIST_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.database_file, "folksonomy.db");
        assert_eq!(config.server.port, 3000);
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
database_file = "tags.db"
default_list_limit = 25

[server]
port = 8080
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.database_file, "tags.db");
        assert_eq!(config.default_list_limit, 25);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.database_file, "folksonomy.db");
    }

    #[test]
    fn resolve_list_limit_prefers_request() {
        let config = GlobalConfig::default();
        assert_eq!(resolve_list_limit(&config, Some(10)), 10);
        assert_eq!(resolve_list_limit(&config, None), 100);
        assert_eq!(resolve_list_limit(&config, Some(0)), MIN_LIST_LIMIT);
    }
}
