use thiserror::Error;

/// Why a whole results page was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScraperError {
    #[error("Blocked by site (HTTP 403): {url}")]
    Blocked { url: String },

    #[error("Unexpected status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ScraperError {
    pub fn is_blocked(&self) -> bool {
        matches!(self, ScraperError::Blocked { .. })
    }

    /// Short machine-readable tag, used in the JSON API.
    pub fn kind(&self) -> &'static str {
        match self {
            ScraperError::Blocked { .. } => "blocked",
            ScraperError::UnexpectedStatus { .. } => "unexpected_status",
            ScraperError::Transport(_) => "transport",
            ScraperError::HtmlParse(_) => "html_parse",
            ScraperError::Config(_) => "config",
        }
    }
}

/// Why a single listing element was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("listing has no title")]
    MissingTitle,

    #[error("listing has no price box")]
    MissingPriceBox,

    #[error("price box has no price text")]
    MissingPriceText,

    #[error("no firm price: {0:?}")]
    NoFirmPrice(String),

    #[error("price has no digits: {0:?}")]
    NoDigits(String),

    #[error("price out of range: {0:?}")]
    PriceOverflow(String),
}
