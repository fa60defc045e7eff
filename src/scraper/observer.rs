use crate::scraper::{ExtractionError, ListingRecord, ScraperError};

/// Diagnostics emitted while a query runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEvent {
    PageRequested {
        query: String,
        page: u32,
        url: String,
    },
    PageSkipped {
        query: String,
        page: u32,
        reason: ScraperError,
    },
    PageParsed {
        query: String,
        page: u32,
        listings: usize,
        kept: usize,
    },
    ItemRejected {
        page: u32,
        index: usize,
        reason: ExtractionError,
    },
    ItemFiltered {
        page: u32,
        index: usize,
        record: ListingRecord,
    },
    Finished {
        query: String,
        records: usize,
        pages_parsed: usize,
        pages_total: usize,
    },
}

pub trait ScrapeObserver: Send + Sync {
    fn on_event(&self, event: &ScrapeEvent);
}

/// Forwards scrape events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScrapeObserver for TracingObserver {
    fn on_event(&self, event: &ScrapeEvent) {
        match event {
            ScrapeEvent::PageRequested { query, page, url } => {
                tracing::info!(query = %query, page, url = %url, "Requesting results page");
            }
            ScrapeEvent::PageSkipped {
                query,
                page,
                reason: reason @ ScraperError::Blocked { .. },
            } => {
                tracing::warn!(query = %query, page, "Access forbidden, skipping page: {reason}");
            }
            ScrapeEvent::PageSkipped { query, page, reason } => {
                tracing::warn!(query = %query, page, kind = reason.kind(), "Skipping page: {reason}");
            }
            ScrapeEvent::PageParsed {
                query,
                page,
                listings,
                kept,
            } => {
                tracing::info!(query = %query, page, listings, kept, "Parsed results page");
            }
            ScrapeEvent::ItemRejected { page, index, reason } => {
                tracing::debug!(page, index, "Skipping listing: {reason}");
            }
            ScrapeEvent::ItemFiltered { page, index, record } => {
                tracing::debug!(
                    page,
                    index,
                    year = record.year,
                    price = record.price,
                    "Listing below thresholds"
                );
            }
            ScrapeEvent::Finished {
                query,
                records,
                pages_parsed,
                pages_total,
            } => {
                tracing::info!(query = %query, records, pages_parsed, pages_total, "Scrape finished");
            }
        }
    }
}
