mod remote;

pub use remote::RemoteScraper;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One scraped listing. Its shape belongs to the backend and passes through untouched.
pub type ScrapeRecord = serde_json::Map<String, serde_json::Value>;

/// Parameters handed to a scraping backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub query: String,
    /// `None` scrapes everything found. Not range-checked here.
    pub max_places: Option<i64>,
    pub lang: String,
    pub headless: bool,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The backend cannot serve requests at all.
    #[error("scraper not available: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Something that turns a search query into listings.
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<ScrapeRecord>, ScrapeError>;
}
