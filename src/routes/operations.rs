use crate::handlers::operations::reload_config;
use crate::state::AppState;
use axum::{routing::options, Router};

pub fn operations_routes() -> Router<AppState> {
    Router::new().route("/operations/reloadconfig", options(reload_config))
}
