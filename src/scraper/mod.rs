mod extract;
mod fetcher;
mod models;
mod observer;
mod scraper;
mod scraper_error;

pub use extract::{ListingExtractor, ListingSelectors};
pub use fetcher::{PageFetcher, DEFAULT_USER_AGENT};
pub use models::{
    ItemOutcome, ListingFilter, ListingRecord, PageOutcome, PageReport, ScrapeReport, ScrapeStatus,
};
pub use observer::{ScrapeEvent, ScrapeObserver, TracingObserver};
pub use scraper::{search_url, ListingScraper, ScrapeSettings};
pub use scraper_error::{ExtractionError, ScraperError};
