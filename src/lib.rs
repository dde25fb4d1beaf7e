//! Camps API: camps, their talks, and speakers over REST, backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod links;
pub mod mapping;
pub mod model;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, Settings, SettingsHandle};
pub use error::{AppError, ConfigError, RepositoryError};
pub use extractors::ApiVersion;
pub use repository::{CampRepository, MemoryCampRepository, PgCampRepository};
pub use routes::app_router;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, seed_if_empty};
