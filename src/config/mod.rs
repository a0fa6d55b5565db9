// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&contents).context("Failed to parse YAML config")?
        }
        _ => serde_json::from_str(&contents).context("Failed to parse JSON config")?,
    };

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_json_config() {
        let path = std::env::temp_dir().join(format!("status-probe-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(
            &path,
            r#"{"probe": {"endpoint": "http://127.0.0.1:9/status.json", "timeout_ms": 250}}"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(config.probe.timeout_ms, 250);
        assert_eq!(config.probe.endpoint.path(), "/status.json");
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_config() {
        let path = std::env::temp_dir().join(format!("status-probe-{}.yaml", uuid::Uuid::new_v4()));
        tokio::fs::write(
            &path,
            "probe:\n  endpoint: http://127.0.0.1:9/status.json\n  timeout_ms: 0\n",
        )
        .await
        .unwrap();

        let result = load_config(&path).await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        assert!(load_config("/nonexistent/status-probe.yaml").await.is_err());
    }
}
