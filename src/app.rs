// app.rs
use crate::config::Config;
use crate::domain::MarketService;
use crate::scraper::{ListingScraper, PageFetcher, ScrapeObserver, ScraperError};
use anyhow::Context;
use std::sync::Arc;

/// Shared state handed to every request.
pub struct App {
    pub config: Config,
    pub market: MarketService,
}

impl App {
    pub fn new(config: Config, observer: Arc<dyn ScrapeObserver>) -> anyhow::Result<Self> {
        let scraper = ListingScraper::new(config.scrape.clone(), observer)
            .context("Failed to build scraper")?;
        Ok(Self::with_scraper(config, scraper)?)
    }

    /// Same as [`App::new`] but with a caller-supplied page source.
    pub fn with_fetcher(
        config: Config,
        fetcher: Box<dyn PageFetcher>,
        observer: Arc<dyn ScrapeObserver>,
    ) -> Result<Self, ScraperError> {
        let scraper = ListingScraper::with_fetcher(config.scrape.clone(), fetcher, observer)?;
        Self::with_scraper(config, scraper)
    }

    fn with_scraper(config: Config, scraper: ListingScraper) -> Result<Self, ScraperError> {
        let ttl = chrono::Duration::from_std(config.cache_ttl)
            .map_err(|e| ScraperError::Config(format!("cache TTL out of range: {e}")))?;
        Ok(Self {
            market: MarketService::new(scraper, ttl),
            config,
        })
    }
}
