//! Camp and talk routes. `/camps/search` is a static segment and wins over `/camps/:moniker`.

use crate::handlers::{camps, talks};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn camp_routes() -> Router<AppState> {
    Router::new()
        .route("/camps", get(camps::list).post(camps::create))
        .route("/camps/search", get(camps::search_by_date))
        .route(
            "/camps/:moniker",
            get(camps::get_by_moniker).put(camps::update).delete(camps::delete),
        )
        .route("/camps/:moniker/talks", get(talks::list).post(talks::create))
        .route(
            "/camps/:moniker/talks/:talk_id",
            get(talks::get_one).put(talks::update).delete(talks::delete),
        )
}
