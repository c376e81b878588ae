//! Peer groups and cross-sectional comparison.
//!
//! A [`PeerSet`] maps a ticker to its ordered comparables; [`compare`] runs a
//! metric over the ticker and every peer and keeps the latest value of each.

pub mod compare;
pub mod set;

pub use compare::{compare, compare_companies};
pub use set::PeerSet;
