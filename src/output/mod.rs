//! Report rendering
//!
//! - [`terminal`] - ANSI styling helpers
//! - [`report`] - the ranked denial-rate table

pub mod report;
pub mod terminal;

pub use report::Reporter;
