//! Live settings snapshot shared by all requests, swapped whole on reload.

use crate::config::{load_settings, Settings};
use crate::error::ConfigError;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub struct SettingsHandle {
    current: Arc<RwLock<Arc<Settings>>>,
    /// File re-read on reload; `None` for fixed in-memory settings.
    source: Option<PathBuf>,
}

impl SettingsHandle {
    /// Settings that are never re-read; reload keeps the current snapshot.
    pub fn fixed(settings: Settings) -> Self {
        SettingsHandle {
            current: Arc::new(RwLock::new(Arc::new(settings))),
            source: None,
        }
    }

    /// Load settings from `path`; later reloads read the same file.
    pub async fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let settings = load_settings(&path).await?;
        Ok(SettingsHandle {
            current: Arc::new(RwLock::new(Arc::new(settings))),
            source: Some(path),
        })
    }

    /// Current snapshot. Holders keep a consistent view even if a reload lands meanwhile.
    pub fn current(&self) -> Result<Arc<Settings>, ConfigError> {
        let guard = self
            .current
            .read()
            .map_err(|_| ConfigError::Load("settings lock poisoned".into()))?;
        Ok(Arc::clone(&guard))
    }

    /// Re-read the source and swap in the new snapshot. On error the old snapshot stays live.
    pub async fn reload(&self) -> Result<Arc<Settings>, ConfigError> {
        let Some(path) = &self.source else {
            return self.current();
        };
        let fresh = Arc::new(load_settings(path).await?);
        let mut guard = self
            .current
            .write()
            .map_err(|_| ConfigError::Load("settings lock poisoned".into()))?;
        *guard = Arc::clone(&fresh);
        tracing::info!(path = %path.display(), title = %fresh.title, "settings reloaded");
        Ok(fresh)
    }
}
