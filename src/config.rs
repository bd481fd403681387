use std::collections::HashSet;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";

/// Process configuration, read once from the environment at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub api_keys: ApiKeys,
    pub scraper_url: Option<Url>,
    pub scraper_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(read_env)
    }

    /// Build the config from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> anyhow::Result<Option<String>>,
    {
        let read_var = |name: &str| -> anyhow::Result<Option<String>> {
            Ok(lookup(name)?
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()))
        };

        let bind_addr = read_var("BIND_ADDR")?
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a valid socket address")?;

        let api_keys = ApiKeys::parse(&read_var("API_KEYS")?.unwrap_or_default());

        let scraper_url = read_var("SCRAPER_URL")?
            .map(|raw| Url::parse(&raw))
            .transpose()
            .context("SCRAPER_URL is not a valid url")?;

        let scraper_timeout = read_var("SCRAPER_TIMEOUT_SECS")?
            .map(|raw| parse_timeout(&raw))
            .transpose()?;

        Ok(Self {
            bind_addr,
            api_keys,
            scraper_url,
            scraper_timeout,
        })
    }
}

/// Accepted bearer credentials. Empty means no restriction.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    keys: HashSet<String>,
}

impl ApiKeys {
    /// Parse a comma-separated key list, trimming entries and dropping blanks.
    pub fn parse(raw: &str) -> Self {
        let keys = raw
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect();
        Self { keys }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

impl<S: Into<String>> FromIterator<S> for ApiKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn read_env(name: &str) -> anyhow::Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            anyhow::bail!("{} is not valid unicode", name);
        }
    }
}

fn parse_timeout(raw: &str) -> anyhow::Result<Duration> {
    let secs: u64 = raw
        .parse()
        .with_context(|| format!("SCRAPER_TIMEOUT_SECS is not a number: {}", raw))?;
    if secs == 0 {
        anyhow::bail!("SCRAPER_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn parse_trims_and_drops_blank_entries() {
        let keys = ApiKeys::parse(" alpha, ,beta ,,gamma");
        assert_eq!(keys.len(), 3);
        assert!(keys.contains("alpha"));
        assert!(keys.contains("beta"));
        assert!(keys.contains("gamma"));
        assert!(!keys.contains(" alpha"));
    }

    #[test]
    fn parse_of_blank_input_is_empty() {
        assert!(ApiKeys::parse("").is_empty());
        assert!(ApiKeys::parse(" , ,").is_empty());
    }

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| Ok(vars.get(name).cloned()))
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert!(config.api_keys.is_empty());
        assert!(config.scraper_url.is_none());
        assert!(config.scraper_timeout.is_none());
    }

    #[test]
    fn all_variables_are_read() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("API_KEYS", "a,b"),
            ("SCRAPER_URL", " http://scraper.internal:7000/run "),
            ("SCRAPER_TIMEOUT_SECS", "120"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.api_keys.len(), 2);
        assert_eq!(
            config.scraper_url.as_ref().map(Url::as_str),
            Some("http://scraper.internal:7000/run")
        );
        assert_eq!(config.scraper_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn blank_scraper_url_means_no_scraper() {
        let config = config_from(&[("SCRAPER_URL", "   ")]).unwrap();
        assert!(config.scraper_url.is_none());
    }

    #[test]
    fn invalid_values_fail_start_up() {
        assert!(config_from(&[("BIND_ADDR", "not-an-addr")]).is_err());
        assert!(config_from(&[("SCRAPER_URL", "no scheme here")]).is_err());
        assert!(config_from(&[("SCRAPER_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn lookup_errors_propagate() {
        let err = Config::from_lookup(|name| Err(anyhow::anyhow!("{} is not valid unicode", name)));
        assert!(err.is_err());
    }

    #[test]
    fn timeout_rejects_zero_and_garbage() {
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
        assert_eq!(parse_timeout("45").unwrap(), Duration::from_secs(45));
    }
}
