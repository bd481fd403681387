use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "gmaps-cli", about = "CLI for the Google Maps scraper API")]
struct Cli {
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape listings for a search query.
    Scrape {
        query: String,
        #[arg(long)]
        max_places: Option<i64>,
        #[arg(long, default_value = "en")]
        lang: String,
        /// Show the browser window on the scraping host.
        #[arg(long)]
        headed: bool,
        /// Use `GET /scrape-get` instead of `POST /scrape`.
        #[arg(long)]
        get: bool,
    },
    /// Check that the server is up.
    Health,
}

#[derive(Deserialize)]
struct Config {
    base_url: String,
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let base_url = config.base_url.trim_end_matches('/');

    let client = reqwest::Client::new();
    match cli.command {
        Commands::Scrape {
            query,
            max_places,
            lang,
            headed,
            get,
        } => {
            if query.trim().is_empty() {
                anyhow::bail!("query must not be empty");
            }

            let mut headers = HeaderMap::new();
            if let Some(key) = config.api_key.as_deref() {
                headers.insert(AUTHORIZATION, auth_header(key)?);
            }

            let mut params = vec![
                ("query", query),
                ("lang", lang),
                ("headless", (!headed).to_string()),
            ];
            if let Some(max_places) = max_places {
                params.push(("max_places", max_places.to_string()));
            }

            let request = if get {
                client.get(format!("{}/scrape-get", base_url))
            } else {
                client.post(format!("{}/scrape", base_url))
            };
            let response = request
                .headers(headers)
                .query(&params)
                .send()
                .await
                .context("failed to send scrape request")?;
            handle_response(response).await?;
        }
        Commands::Health => {
            let response = client
                .get(format!("{}/", base_url))
                .send()
                .await
                .context("failed to send health request")?;
            handle_response(response).await?;
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

fn auth_header(key: &str) -> Result<HeaderValue> {
    let value = if key.starts_with("Bearer ") {
        key.to_string()
    } else {
        format!("Bearer {}", key)
    };
    HeaderValue::from_str(&value).context("invalid api key")
}

async fn handle_response(response: reqwest::Response) -> Result<()> {
    let status = response.status();
    let body = response.text().await.context("failed to read response")?;
    if !status.is_success() {
        anyhow::bail!("request failed with status {}: {}", status, body);
    }
    println!("{}", body);
    Ok(())
}
