use crate::scraper::{ExtractionError, ScraperError};
use chrono::{DateTime, Utc};
use serde::Serialize;

// One advertisement on a results page:
//
// li.item
//  ├── h2                 -> title
//  ├── a[href]            -> detail link (year fallback)
//  └── div.boxintxt
//       └── b             -> price text ("Rs. 2,450,000" / "Negotiable")

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    pub title: String,
    /// `0` when neither the title nor the link carries a year.
    pub year: u32,
    /// Whole rupees.
    pub price: u64,
}

/// Lower bounds a record must strictly exceed to be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingFilter {
    pub min_year: u32,
    pub min_price: u64,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            min_year: 2000,
            min_price: 100_000,
        }
    }
}

impl ListingFilter {
    pub fn accepts(&self, record: &ListingRecord) -> bool {
        record.year > self.min_year && record.price > self.min_price
    }
}

/// What happened to one listing element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Kept(ListingRecord),
    /// Parsed fine but below the filter thresholds.
    Filtered(ListingRecord),
    Rejected(ExtractionError),
}

/// What happened to one results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Parsed {
        listings: usize,
        kept: usize,
        filtered: usize,
        rejected: usize,
    },
    Skipped(ScraperError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub page: u32,
    pub url: String,
    pub outcome: PageOutcome,
}

impl PageReport {
    pub fn is_parsed(&self) -> bool {
        matches!(self.outcome, PageOutcome::Parsed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeStatus {
    Complete,
    Partial,
    NoMatches,
    Blocked,
    Failed,
}

impl ScrapeStatus {
    pub fn label(self) -> &'static str {
        match self {
            ScrapeStatus::Complete => "Complete",
            ScrapeStatus::Partial => "Partial",
            ScrapeStatus::NoMatches => "No matches",
            ScrapeStatus::Blocked => "Blocked",
            ScrapeStatus::Failed => "Failed",
        }
    }
}

/// Everything one query produced: the kept records plus a per-page account.
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub query: String,
    pub records: Vec<ListingRecord>,
    pub pages: Vec<PageReport>,
    pub fetched_at: DateTime<Utc>,
}

impl ScrapeReport {
    pub fn status(&self) -> ScrapeStatus {
        let parsed = self.pages_parsed();

        if !self.records.is_empty() {
            return if parsed == self.pages.len() {
                ScrapeStatus::Complete
            } else {
                ScrapeStatus::Partial
            };
        }

        if parsed > 0 {
            return ScrapeStatus::NoMatches;
        }

        let all_blocked = !self.pages.is_empty()
            && self.pages.iter().all(|p| match &p.outcome {
                PageOutcome::Skipped(err) => err.is_blocked(),
                PageOutcome::Parsed { .. } => false,
            });

        if all_blocked {
            ScrapeStatus::Blocked
        } else {
            ScrapeStatus::Failed
        }
    }

    pub fn pages_parsed(&self) -> usize {
        self.pages.iter().filter(|p| p.is_parsed()).count()
    }
}
