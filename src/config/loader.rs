//! Load server config from the environment and runtime settings from a JSON file.

use crate::config::{validate, ServerConfig, Settings};
use crate::error::ConfigError;
use std::path::Path;

impl ServerConfig {
    /// Read `DATABASE_URL`, `BIND_ADDR`, `DB_SCHEMA`, `DB_MAX_CONNECTIONS`, `SETTINGS_PATH`,
    /// `SEED_DATA` and `MAX_BODY_BYTES`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        Ok(ServerConfig {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            db_schema: lookup("DB_SCHEMA").unwrap_or(defaults.db_schema),
            db_max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            settings_path: lookup("SETTINGS_PATH").unwrap_or(defaults.settings_path),
            seed_data: lookup("SEED_DATA")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.seed_data),
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES", defaults.max_body_bytes)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Load(format!("{} must be a number, got '{}'", key, raw))),
    }
}

/// Read and validate settings from a JSON file.
pub async fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    let settings: Settings =
        serde_json::from_str(&raw).map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    validate(&settings)?;
    tracing::debug!(path = %path.display(), title = %settings.title, "settings loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn unset_variables_use_defaults() {
        let cfg = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000");
        assert_eq!(cfg.db_max_connections, 5);
        assert!(!cfg.seed_data);
    }

    #[test]
    fn variables_override_defaults() {
        let vars: HashMap<&str, &str> = [
            ("DATABASE_URL", "postgres://db/camps"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("SEED_DATA", "true"),
        ]
        .into_iter()
        .collect();
        let cfg = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.database_url, "postgres://db/camps");
        assert_eq!(cfg.db_max_connections, 12);
        assert!(cfg.seed_data);
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = ServerConfig::from_lookup(|k| (k == "MAX_BODY_BYTES").then(|| "lots".to_string())).unwrap_err();
        assert!(err.to_string().contains("MAX_BODY_BYTES"));
    }

    #[tokio::test]
    async fn settings_file_is_parsed_and_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appsettings.json");
        std::fs::write(&path, r#"{"title": "Camps", "contactEmail": "team@example.com"}"#).unwrap();
        let settings = load_settings(&path).await.unwrap();
        assert_eq!(settings.title, "Camps");

        std::fs::write(&path, r#"{"title": ""}"#).unwrap();
        assert!(matches!(load_settings(&path).await, Err(ConfigError::Validation(_))));
    }
}
