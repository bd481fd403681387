use std::sync::Arc;
use std::time::Instant;

use anyhow::anyhow;
use tracing::{error, info};

use crate::errors::AppError;
use crate::scrapers::{ScrapeError, ScrapeRecord, ScrapeRequest};
use crate::types::{Dependencies, ScrapeParams};

#[derive(Clone)]
pub struct ScrapeService {
    deps: Arc<Dependencies>,
}

impl ScrapeService {
    pub fn new(deps: Arc<Dependencies>) -> Self {
        Self { deps }
    }

    /// Run one scrape and map its outcome onto the HTTP error taxonomy.
    ///
    /// `via` names the entry point and only shows up in logs.
    pub async fn scrape(
        &self,
        params: ScrapeParams,
        via: &str,
    ) -> Result<Vec<ScrapeRecord>, AppError> {
        info!(
            "scrape request received: via={} query='{}' max_places={:?} lang={} headless={}",
            via, params.query, params.max_places, params.lang, params.headless
        );

        if params.query.trim().is_empty() {
            return Err(AppError::bad_request("query must not be empty"));
        }

        let request = ScrapeRequest::from(params);

        let Some(scraper) = self.deps.scraper.as_ref() else {
            error!(
                "scrape rejected: query='{}' reason=no scraper configured",
                request.query
            );
            return Err(AppError::scraper_unavailable());
        };

        let start = Instant::now();
        let outcome = match self.deps.scrape_timeout {
            Some(limit) => tokio::time::timeout(limit, scraper.scrape(&request))
                .await
                .unwrap_or_else(|_| {
                    Err(ScrapeError::Failed(anyhow!(
                        "scrape timed out after {}s",
                        limit.as_secs()
                    )))
                }),
            None => scraper.scrape(&request).await,
        };

        match outcome {
            Ok(records) => {
                info!(
                    "scrape finished: query='{}' results={} elapsed_ms={}",
                    request.query,
                    records.len(),
                    start.elapsed().as_millis()
                );
                Ok(records)
            }
            Err(ScrapeError::Unavailable(reason)) => {
                error!(
                    "scrape failed: query='{}' reason=scraper unavailable detail={}",
                    request.query, reason
                );
                Err(AppError::scraper_unavailable())
            }
            Err(ScrapeError::Failed(err)) => {
                error!(
                    "scrape failed: query='{}' error={} elapsed_ms={}",
                    request.query,
                    err,
                    start.elapsed().as_millis()
                );
                Err(AppError::scrape_failed(err))
            }
        }
    }
}
