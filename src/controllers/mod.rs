use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::types::AppState;

mod root;
mod scrape;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/scrape", post(scrape::scrape))
        .route("/scrape-get", get(scrape::scrape_get))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
