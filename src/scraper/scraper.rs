// scraper.rs
use crate::scraper::fetcher::{HttpFetcher, PageFetcher, DEFAULT_USER_AGENT};
use crate::scraper::observer::{ScrapeEvent, ScrapeObserver};
use crate::scraper::{
    ExtractionError, ItemOutcome, ListingExtractor, ListingFilter, ListingRecord,
    ListingSelectors, PageOutcome, PageReport, ScrapeReport, ScraperError,
};
use chrono::Utc;
use scraper::Html;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;
use url::form_urlencoded;

#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// Site root, e.g. "https://riyasewana.com".
    pub base_url: String,
    pub pages: RangeInclusive<u32>,
    pub timeout: Duration,
    pub user_agent: String,
    /// Form-encode the query before putting it in the path.
    pub encode_query: bool,
    pub filter: ListingFilter,
    pub selectors: ListingSelectors,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            base_url: "https://riyasewana.com".to_string(),
            pages: 1..=3,
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            encode_query: true,
            filter: ListingFilter::default(),
            selectors: ListingSelectors::default(),
        }
    }
}

/// `{base}/search/{query}?page={n}`
pub fn search_url(base_url: &str, query: &str, page: u32, encode_query: bool) -> String {
    let base = base_url.trim_end_matches('/');
    let query = if encode_query {
        form_urlencoded::byte_serialize(query.as_bytes()).collect::<String>()
    } else {
        query.to_string()
    };
    format!("{base}/search/{query}?page={page}")
}

pub struct ListingScraper {
    settings: ScrapeSettings,
    extractor: ListingExtractor,
    fetcher: Box<dyn PageFetcher>,
    observer: Arc<dyn ScrapeObserver>,
}

impl ListingScraper {
    /// Scraper backed by a real HTTP client.
    pub fn new(
        settings: ScrapeSettings,
        observer: Arc<dyn ScrapeObserver>,
    ) -> Result<Self, ScraperError> {
        let fetcher = HttpFetcher::new(&settings.user_agent, settings.timeout)?;
        Self::with_fetcher(settings, Box::new(fetcher), observer)
    }

    pub fn with_fetcher(
        settings: ScrapeSettings,
        fetcher: Box<dyn PageFetcher>,
        observer: Arc<dyn ScrapeObserver>,
    ) -> Result<Self, ScraperError> {
        let extractor = ListingExtractor::new(&settings.selectors)?;
        Ok(Self {
            settings,
            extractor,
            fetcher,
            observer,
        })
    }

    /// Walks every configured page. Failures only ever shrink the result.
    pub fn scrape(&self, query: &str) -> ScrapeReport {
        let mut records = Vec::new();
        let mut pages = Vec::new();

        for page in self.settings.pages.clone() {
            let url = search_url(
                &self.settings.base_url,
                query,
                page,
                self.settings.encode_query,
            );
            self.observer.on_event(&ScrapeEvent::PageRequested {
                query: query.to_string(),
                page,
                url: url.clone(),
            });

            let outcome = match self.fetcher.fetch(&url) {
                Ok(html) => {
                    let mut kept = Vec::new();
                    let outcome = self.scrape_page(page, &html, &mut kept);
                    if let PageOutcome::Parsed { listings, .. } = &outcome {
                        self.observer.on_event(&ScrapeEvent::PageParsed {
                            query: query.to_string(),
                            page,
                            listings: *listings,
                            kept: kept.len(),
                        });
                    }
                    records.extend(kept);
                    outcome
                }
                Err(reason) => {
                    self.observer.on_event(&ScrapeEvent::PageSkipped {
                        query: query.to_string(),
                        page,
                        reason: reason.clone(),
                    });
                    PageOutcome::Skipped(reason)
                }
            };

            pages.push(PageReport { page, url, outcome });
        }

        let report = ScrapeReport {
            query: query.to_string(),
            records,
            pages,
            fetched_at: Utc::now(),
        };

        self.observer.on_event(&ScrapeEvent::Finished {
            query: query.to_string(),
            records: report.records.len(),
            pages_parsed: report.pages_parsed(),
            pages_total: report.pages.len(),
        });

        report
    }

    fn scrape_page(&self, page: u32, html: &str, out: &mut Vec<ListingRecord>) -> PageOutcome {
        let document = Html::parse_document(html);
        let items = self.extractor.listings(&document);

        let (mut filtered, mut rejected) = (0, 0);
        for (index, item) in items.iter().enumerate() {
            match self.classify(self.extractor.extract(*item)) {
                ItemOutcome::Kept(record) => out.push(record),
                ItemOutcome::Filtered(record) => {
                    filtered += 1;
                    self.observer
                        .on_event(&ScrapeEvent::ItemFiltered { page, index, record });
                }
                ItemOutcome::Rejected(reason) => {
                    rejected += 1;
                    self.observer
                        .on_event(&ScrapeEvent::ItemRejected { page, index, reason });
                }
            }
        }

        PageOutcome::Parsed {
            listings: items.len(),
            kept: out.len(),
            filtered,
            rejected,
        }
    }

    fn classify(&self, extracted: Result<ListingRecord, ExtractionError>) -> ItemOutcome {
        match extracted {
            Ok(record) if self.settings.filter.accepts(&record) => ItemOutcome::Kept(record),
            Ok(record) => ItemOutcome::Filtered(record),
            Err(reason) => ItemOutcome::Rejected(reason),
        }
    }
}
