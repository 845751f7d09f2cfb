//! Service boundary: market-data seam and the assessment service.

pub mod assessment;
pub mod market_data;

pub use assessment::*;
pub use market_data::*;
