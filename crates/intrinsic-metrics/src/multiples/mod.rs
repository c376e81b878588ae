//! Valuation multiples - price relative to trailing fundamentals
//!
//! Multiples sample the price series at month-ends and divide by the annual
//! figure of the preceding fiscal year.

pub mod price_to_book;
pub mod price_to_earnings;
pub mod trailing;

pub use price_to_book::{PB_NAME, PriceToBook, price_to_book};
pub use price_to_earnings::{PE_NAME, PriceToEarnings, price_to_earnings};
pub use trailing::{
    TrailingMultipleConfig, annual_period, position_multiple, sample_dates, trailing_multiple,
};
