#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use gmaps_scraper_api::config::ApiKeys;
use gmaps_scraper_api::scrapers::{ScrapeError, ScrapeRecord, ScrapeRequest, Scraper};
use gmaps_scraper_api::types::Dependencies;
use gmaps_scraper_api::{AppState, build_router};
use serde_json::{Value, json};

/// What a `MockScraper` does when called.
pub enum Behavior {
    Records(Vec<ScrapeRecord>),
    Fail(String),
    Unavailable(String),
    Hang,
}

/// Scripted scraper that remembers every request it saw.
pub struct MockScraper {
    behavior: Behavior,
    seen: Mutex<Vec<ScrapeRequest>>,
}

impl MockScraper {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<ScrapeRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<Vec<ScrapeRecord>, ScrapeError> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.behavior {
            Behavior::Records(records) => Ok(records.clone()),
            Behavior::Fail(message) => Err(anyhow::anyhow!(message.clone()).into()),
            Behavior::Unavailable(reason) => Err(ScrapeError::Unavailable(reason.clone())),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
        }
    }
}

/// `n` distinct place records.
pub fn places(n: usize) -> Vec<ScrapeRecord> {
    (0..n)
        .map(|i| {
            let value = json!({
                "name": format!("Place {}", i),
                "rating": 4.5,
                "reviews_count": i * 10,
                "address": null,
            });
            match value {
                Value::Object(map) => map,
                _ => unreachable!(),
            }
        })
        .collect()
}

pub fn app(keys: &[&str], scraper: Option<Arc<dyn Scraper>>) -> Router {
    app_with_timeout(keys, scraper, None)
}

pub fn app_with_timeout(
    keys: &[&str],
    scraper: Option<Arc<dyn Scraper>>,
    scrape_timeout: Option<Duration>,
) -> Router {
    build_router(AppState::new(Dependencies {
        api_keys: keys.iter().copied().collect::<ApiKeys>(),
        scraper,
        scrape_timeout,
    }))
}

pub fn request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("request build")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
