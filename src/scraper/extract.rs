// extract.rs
use crate::scraper::{ExtractionError, ListingRecord, ScraperError};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

static TITLE_YEAR: OnceLock<Regex> = OnceLock::new();
static LINK_YEAR: OnceLock<Regex> = OnceLock::new();

/// CSS selectors describing the site's listing markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSelectors {
    pub listing: String,
    pub title: String,
    pub price_box: String,
    pub price_text: String,
    pub link: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            listing: "li.item".to_string(),
            title: "h2".to_string(),
            price_box: "div.boxintxt".to_string(),
            price_text: "b".to_string(),
            link: "a".to_string(),
        }
    }
}

/// Compiled form of [`ListingSelectors`].
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    listing: Selector,
    title: Selector,
    price_box: Selector,
    price_text: Selector,
    link: Selector,
}

impl ListingExtractor {
    pub fn new(selectors: &ListingSelectors) -> Result<Self, ScraperError> {
        Ok(Self {
            listing: compile(&selectors.listing)?,
            title: compile(&selectors.title)?,
            price_box: compile(&selectors.price_box)?,
            price_text: compile(&selectors.price_text)?,
            link: compile(&selectors.link)?,
        })
    }

    /// Every listing element on a results page.
    pub fn listings<'a>(&'a self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.listing).collect()
    }

    /// Turns one listing element into a record. Thresholds are not applied here.
    pub fn extract(&self, item: ElementRef<'_>) -> Result<ListingRecord, ExtractionError> {
        let title = item
            .select(&self.title)
            .next()
            .map(|h| clean_text(h.text()))
            .ok_or(ExtractionError::MissingTitle)?;

        let price_box = item
            .select(&self.price_box)
            .next()
            .ok_or(ExtractionError::MissingPriceBox)?;
        let price_text = price_box
            .select(&self.price_text)
            .next()
            .map(|b| clean_text(b.text()))
            .ok_or(ExtractionError::MissingPriceText)?;
        let price = parse_price(&price_text)?;

        let year = year_from_title(&title)
            .or_else(|| {
                item.select(&self.link)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .and_then(year_from_link)
            })
            .unwrap_or(0);

        Ok(ListingRecord { title, year, price })
    }
}

fn compile(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::HtmlParse(format!("bad selector {css:?}: {e}")))
}

/// Firm prices only: "Negotiable" and "Contact" listings carry no number worth keeping.
pub fn parse_price(text: &str) -> Result<u64, ExtractionError> {
    if text.contains("Negotiable") || text.contains("Contact") {
        return Err(ExtractionError::NoFirmPrice(text.to_string()));
    }

    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(ExtractionError::NoDigits(text.to_string()));
    }

    digits
        .parse::<u64>()
        .map_err(|_| ExtractionError::PriceOverflow(text.to_string()))
}

/// Leftmost standalone 19xx/20xx token.
pub fn year_from_title(title: &str) -> Option<u32> {
    let re = TITLE_YEAR.get_or_init(|| Regex::new(r"\b(19|20)[0-9]{2}\b").expect("title year pattern"));
    re.find(title).and_then(|m| m.as_str().parse().ok())
}

/// A 19xx/20xx path segment, e.g. `/ads/2008/123-abc`.
pub fn year_from_link(href: &str) -> Option<u32> {
    let re = LINK_YEAR.get_or_init(|| Regex::new(r"/((?:19|20)[0-9]{2})/").expect("link year pattern"));
    re.captures(href)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn clean_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut buffer = String::new();
    for word in parts.flat_map(str::split_whitespace) {
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(word);
    }
    buffer
}
