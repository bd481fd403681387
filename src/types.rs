use std::sync::Arc;
use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::ApiKeys;
use crate::scrapers::{ScrapeRequest, Scraper};
use crate::services::Services;

#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<Dependencies>,
    pub services: Services,
}

impl AppState {
    pub fn new(deps: Dependencies) -> Self {
        let deps = Arc::new(deps);
        let services = Services::new(deps.clone());
        Self { deps, services }
    }
}

pub struct Dependencies {
    pub api_keys: ApiKeys,
    /// `None` when no scraping backend could be set up at start-up.
    pub scraper: Option<Arc<dyn Scraper>>,
    pub scrape_timeout: Option<Duration>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeParams {
    pub query: String,
    pub max_places: Option<i64>,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_headless", deserialize_with = "deserialize_flag")]
    pub headless: bool,
}

impl From<ScrapeParams> for ScrapeRequest {
    fn from(params: ScrapeParams) -> Self {
        Self {
            query: params.query,
            max_places: params.max_places,
            lang: params.lang,
            headless: params.headless,
        }
    }
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_headless() -> bool {
    true
}

/// Accept the usual spellings of a query-string boolean, case-insensitively.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Ok(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Ok(false),
        other => Err(D::Error::custom(format!("invalid boolean: {}", other))),
    }
}

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}
