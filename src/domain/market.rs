// src/domain/market.rs

use crate::cache::TtlCache;
use crate::scraper::{ListingScraper, ScrapeReport};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Scrape results for one query, and whether they came from the cache.
pub struct Analysis {
    pub report: Arc<ScrapeReport>,
    pub cached: bool,
}

/// Runs queries through the scraper, remembering results for the cache TTL.
pub struct MarketService {
    scraper: ListingScraper,
    cache: TtlCache<Arc<ScrapeReport>>,
}

impl MarketService {
    pub fn new(scraper: ListingScraper, ttl: Duration) -> Self {
        Self {
            scraper,
            cache: TtlCache::new(ttl),
        }
    }

    pub fn analyze(&self, query: &str, refresh: bool) -> Analysis {
        self.analyze_at(query, refresh, Utc::now())
    }

    pub fn analyze_at(&self, query: &str, refresh: bool, now: DateTime<Utc>) -> Analysis {
        let key = cache_key(query);

        // A refresh leaves the old entry alone; only a successful scrape replaces it.
        if !refresh {
            if let Some(report) = self.cache.get(&key, now) {
                tracing::debug!(query = %key, "Serving cached scrape");
                return Analysis {
                    report,
                    cached: true,
                };
            }
        }

        let report = Arc::new(self.scraper.scrape(&key));

        // Nothing parsed means the site was unreachable; let the next request retry.
        if report.pages_parsed() > 0 {
            self.cache.insert(key, Arc::clone(&report), now);
        } else {
            tracing::warn!(query = %query, status = ?report.status(), "Not caching failed scrape");
        }

        self.cache.purge_expired(now);

        Analysis {
            report,
            cached: false,
        }
    }

    #[cfg(test)]
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }
}

fn cache_key(query: &str) -> String {
    query.trim().to_string()
}
