pub mod bar_chart;
pub mod card;
pub mod error;
pub mod listing_table;

pub use bar_chart::price_by_year_chart;
pub use card::{card, metric};
pub use error::html_error_response;
pub use listing_table::listing_table;
