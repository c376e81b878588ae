//! Profitability ratios - margins and returns on capital

pub mod efficiency;
pub mod margins;

pub use efficiency::{ROA, ROE, efficiency_ratios};
pub use margins::{GROSS_MARGIN, NET_MARGIN, OPERATING_MARGIN, margins};
