//! Shared application state for all routes. Settings are reloadable at runtime.

use crate::config::SettingsHandle;
use crate::repository::CampRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn CampRepository>,
    /// Swapped in place by the reload route; readers take a snapshot per request.
    pub settings: SettingsHandle,
}

impl AppState {
    pub fn new(repository: Arc<dyn CampRepository>, settings: SettingsHandle) -> Self {
        AppState { repository, settings }
    }
}
