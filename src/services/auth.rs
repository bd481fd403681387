use std::sync::Arc;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use tracing::warn;

use crate::errors::AppError;
use crate::types::Dependencies;

#[derive(Clone)]
pub struct AuthService {
    deps: Arc<Dependencies>,
}

impl AuthService {
    const LOGGED_KEY_CHARS: usize = 10;

    pub fn new(deps: Arc<Dependencies>) -> Self {
        Self { deps }
    }

    /// Check the bearer credential against the configured keys.
    ///
    /// An empty key set lets everything through.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AppError> {
        if self.deps.api_keys.is_empty() {
            warn!("no api keys configured: allowing unrestricted access");
            return Ok(());
        }

        let Some(token) = Self::bearer_token(headers) else {
            warn!("request rejected: missing bearer credential");
            return Err(AppError::unauthorized("Not authenticated"));
        };

        if !self.deps.api_keys.contains(token) {
            warn!(
                "invalid api key attempted: {}...",
                token.chars().take(Self::LOGGED_KEY_CHARS).collect::<String>()
            );
            return Err(AppError::unauthorized("Invalid API key"));
        }

        Ok(())
    }

    fn bearer_token(headers: &HeaderMap) -> Option<&str> {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| raw.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
