use axum::Json;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    source: Option<anyhow::Error>,
    bearer_challenge: bool,
}

impl AppError {
    pub const SCRAPER_UNAVAILABLE: &'static str =
        "Server configuration error: Scraper not available.";

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            source: None,
            bearer_challenge: false,
        }
    }

    /// 401 that asks the caller to retry with a bearer credential.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
            source: None,
            bearer_challenge: true,
        }
    }

    pub fn scraper_unavailable() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Self::SCRAPER_UNAVAILABLE.to_string(),
            source: None,
            bearer_challenge: false,
        }
    }

    /// The message carries the error's text; the full chain only reaches the log.
    pub fn scrape_failed(source: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("An internal error occurred during scraping: {}", source),
            source: Some(source),
            bearer_challenge: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(source) = &self.source {
            error!("{:?}", source);
        }
        let mut response = (self.status, Json(json!({ "detail": self.message }))).into_response();
        if self.bearer_challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
