//! Config types: process settings from the environment and reloadable runtime settings from JSON.

use serde::{Deserialize, Serialize};

/// Startup-only settings read from the environment. Changing these requires a restart.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Postgres schema holding the camps / talks / speakers tables.
    pub db_schema: String,
    pub db_max_connections: u32,
    pub settings_path: String,
    pub seed_data: bool,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_url: "postgres://localhost/camps".into(),
            bind_addr: "0.0.0.0:3000".into(),
            db_schema: "public".into(),
            db_max_connections: 5,
            settings_path: "config/appsettings.json".into(),
            seed_data: false,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Runtime settings, re-read on `OPTIONS /api/operations/reloadconfig`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            title: "CodeCampFinder".into(),
            description: None,
            contact_email: None,
        }
    }
}
