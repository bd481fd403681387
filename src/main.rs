use std::sync::Arc;

use anyhow::Context;
use gmaps_scraper_api::config::Config;
use gmaps_scraper_api::scrapers::{RemoteScraper, Scraper};
use gmaps_scraper_api::types::Dependencies;
use gmaps_scraper_api::{AppState, build_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("load configuration")?;

    if config.api_keys.is_empty() {
        warn!("API_KEYS is empty: scrape endpoints accept any caller");
    } else {
        info!("api key authentication enabled: {} keys", config.api_keys.len());
    }

    let scraper = build_scraper(&config);

    let deps = Dependencies {
        api_keys: config.api_keys,
        scraper,
        scrape_timeout: config.scraper_timeout,
    };
    let app = build_router(AppState::new(deps));

    info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Resolve the scraping backend once. A missing backend leaves the server up
/// and every scrape answers with a configuration error.
fn build_scraper(config: &Config) -> Option<Arc<dyn Scraper>> {
    let Some(endpoint) = config.scraper_url.clone() else {
        error!("SCRAPER_URL is not set: scraper not available");
        return None;
    };

    match RemoteScraper::new(endpoint) {
        Ok(scraper) => {
            info!("scraper backend: {}", scraper.endpoint());
            Some(Arc::new(scraper))
        }
        Err(err) => {
            error!("scraper backend could not be set up: {:?}", err);
            None
        }
    }
}
