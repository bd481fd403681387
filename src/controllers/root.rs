use axum::Json;

use crate::types::RootResponse;

pub(super) async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Google Maps Scraper API is running.",
    })
}
