use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;

use crate::errors::AppError;
use crate::scrapers::ScrapeRecord;
use crate::types::{AppState, ScrapeParams};

pub(super) async fn scrape(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<ScrapeParams>, QueryRejection>,
) -> Result<Json<Vec<ScrapeRecord>>, AppError> {
    state.services.auth.authorize(&headers)?;
    let Query(params) = params.map_err(bad_params)?;
    let records = state.services.scrape.scrape(params, "POST").await?;
    Ok(Json(records))
}

pub(super) async fn scrape_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<ScrapeParams>, QueryRejection>,
) -> Result<Json<Vec<ScrapeRecord>>, AppError> {
    state.services.auth.authorize(&headers)?;
    let Query(params) = params.map_err(bad_params)?;
    let records = state.services.scrape.scrape(params, "GET").await?;
    Ok(Json(records))
}

/// Parameter errors are only reported once the caller is authorized.
fn bad_params(rejection: QueryRejection) -> AppError {
    AppError::bad_request(rejection.body_text())
}
