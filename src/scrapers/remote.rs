use std::time::Instant;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::info;
use url::Url;

use super::{ScrapeError, ScrapeRecord, ScrapeRequest, Scraper};

/// Scraper backed by a separate scraping service reached over HTTP.
///
/// The request is POSTed as JSON and the service answers with a JSON array
/// of objects.
#[derive(Clone)]
pub struct RemoteScraper {
    endpoint: Url,
    http_client: reqwest::Client,
}

impl RemoteScraper {
    const PREVIEW_CHARS: usize = 240;

    pub fn new(endpoint: Url) -> anyhow::Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(default_headers)
            .user_agent(concat!("gmaps-scraper-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build scraper http client")?;

        Ok(Self {
            endpoint,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Collapse whitespace runs and cap the length for error messages.
    fn body_preview(body: &[u8]) -> Option<String> {
        let text = String::from_utf8_lossy(body);
        let mut out = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if out.is_empty() {
            return None;
        }
        if out.chars().count() > Self::PREVIEW_CHARS {
            out = out.chars().take(Self::PREVIEW_CHARS).collect::<String>();
            out.push('…');
        }
        Some(out)
    }
}

#[async_trait]
impl Scraper for RemoteScraper {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<ScrapeRecord>, ScrapeError> {
        let start = Instant::now();

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .with_context(|| format!("POST {}", self.endpoint))
            .context("scraper backend request failed")?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .context("failed to read scraper backend response")?;

        if status == StatusCode::NOT_IMPLEMENTED || status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(ScrapeError::Unavailable(format!(
                "backend answered {}",
                status
            )));
        }

        if !status.is_success() {
            let mut message = format!("scraper backend returned {}", status);
            if let Some(preview) = Self::body_preview(&body) {
                message.push_str(&format!(": {}", preview));
            }
            return Err(anyhow!(message).into());
        }

        let records: Vec<ScrapeRecord> = serde_json::from_slice(&body)
            .context("scraper backend returned something other than a list of objects")?;

        info!(
            "scraper backend answered: query='{}' records={} elapsed_ms={}",
            request.query,
            records.len(),
            start.elapsed().as_millis()
        );
        Ok(records)
    }
}
