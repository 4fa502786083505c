//! CLI argument handling
//!
//! - [`args`] - clap argument definitions

pub mod args;

pub use args::Args;
