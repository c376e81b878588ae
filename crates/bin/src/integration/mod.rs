//! Glue between the command line and the library crates.
//!
//! Store location, configuration loading and CSV import.

pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod store;
