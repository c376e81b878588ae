//! Growth metrics - period-over-period change of statement positions

pub mod yoy;

pub use yoy::{growth_entries, growth_label, growth_yoy};
