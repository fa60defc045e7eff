use crate::scraper::{ListingFilter, ListingSelectors, ScrapeSettings, DEFAULT_USER_AGENT};
use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

const DEFAULT_MODELS: &str = "wagon-r,vitz,alto,premio,aqua";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub workers: usize,
    pub scrape: ScrapeSettings,
    pub cache_ttl: Duration,
    /// Choices offered in the dashboard dropdown.
    pub models: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("SCRAPE_BASE_URL").unwrap_or_else(|| "https://riyasewana.com".into());
        let parsed = Url::parse(&base_url).context("SCRAPE_BASE_URL must be a valid URL")?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("SCRAPE_BASE_URL must be http or https, got {}", parsed.scheme());
        }

        let first_page: u32 = parse_or(&lookup, "SCRAPE_FIRST_PAGE", 1)?;
        let last_page: u32 = parse_or(&lookup, "SCRAPE_LAST_PAGE", 3)?;
        if first_page == 0 || last_page < first_page {
            bail!("page range {first_page}..={last_page} is invalid; pages start at 1");
        }

        let timeout_secs: u64 = parse_or(&lookup, "SCRAPE_TIMEOUT_SECS", 10)?;
        let cache_ttl_secs: u64 = parse_or(&lookup, "CACHE_TTL_SECS", 3600)?;
        if timeout_secs == 0 || cache_ttl_secs == 0 {
            bail!("SCRAPE_TIMEOUT_SECS and CACHE_TTL_SECS must be positive");
        }

        let filter = ListingFilter {
            min_year: parse_or(&lookup, "MIN_YEAR", 2000)?,
            min_price: parse_or(&lookup, "MIN_PRICE", 100_000)?,
        };

        let models: Vec<String> = lookup("VEHICLE_MODELS")
            .unwrap_or_else(|| DEFAULT_MODELS.into())
            .split(',')
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        if models.is_empty() {
            bail!("VEHICLE_MODELS must list at least one model");
        }

        Ok(Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            workers: parse_or(&lookup, "SERVER_WORKERS", 8)?,
            scrape: ScrapeSettings {
                base_url,
                pages: first_page..=last_page,
                timeout: Duration::from_secs(timeout_secs),
                user_agent: lookup("SCRAPE_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.into()),
                encode_query: parse_or(&lookup, "SCRAPE_ENCODE_QUERY", true)?,
                filter,
                selectors: ListingSelectors::default(),
            },
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            models,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}
