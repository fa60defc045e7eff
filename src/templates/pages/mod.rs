pub mod analysis;
pub mod home;

pub use analysis::{analysis_page, AnalysisVm};
pub use home::home_page;
