pub mod market;
pub mod stats;

pub use market::{Analysis, MarketService};
pub use stats::{format_lakhs, format_rupees, summarize, MarketSummary, YearAverage};
