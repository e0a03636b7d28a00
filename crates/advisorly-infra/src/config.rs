//! Configuration loading for the Advisorly client.
//!
//! Reads `config.toml` from the data directory (`~/.advisorly/` in
//! production) and deserializes it into [`ClientConfig`]. Falls back to
//! defaults when the file is missing or malformed, then applies environment
//! overrides.

use std::path::{Path, PathBuf};

use advisorly_types::config::ClientConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "ADVISORLY_DATA_DIR";

/// Environment variable overriding the backend base URL.
pub const SERVER_URL_ENV: &str = "ADVISORLY_SERVER_URL";

/// Environment variable overriding the advisor identity.
pub const ADVISOR_ID_ENV: &str = "ADVISORLY_ADVISOR_ID";

/// Resolve the data directory: env override, then `~/.advisorly`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".advisorly");
    }

    // Last resort: current directory
    PathBuf::from(".advisorly")
}

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the
///   default.
/// - Environment overrides (`ADVISORLY_SERVER_URL`, `ADVISORLY_ADVISOR_ID`)
///   are applied on top in all cases.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config_path = data_dir.join("config.toml");

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<ClientConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                ClientConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    };

    if let Ok(url) = std::env::var(SERVER_URL_ENV) {
        config.server_url = url;
    }
    if let Ok(advisor_id) = std::env::var(ADVISOR_ID_ENV) {
        config.advisor_id = advisor_id;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_client_config(tmp.path()).await;
        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.advisor_id, "advisor-1");
    }

    #[tokio::test]
    async fn test_valid_toml_is_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
server_url = "http://10.0.0.5:8000"
advisor_id = "advisor-7"
"#,
        )
        .await
        .unwrap();

        let config = load_client_config(tmp.path()).await;
        assert_eq!(config.server_url, "http://10.0.0.5:8000");
        assert_eq!(config.advisor_id, "advisor-7");
    }

    #[tokio::test]
    async fn test_malformed_toml_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "server_url = [not toml")
            .await
            .unwrap();

        let config = load_client_config(tmp.path()).await;
        assert_eq!(config.server_url, "http://localhost:8000");
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/test-advisorly");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-advisorly"));
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
    }
}
