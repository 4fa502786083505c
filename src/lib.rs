//! migstat library interface
//!
//! Fetches immigration-decision statistics from the public UDSC API,
//! aggregates them per institution and renders a ranked denial-rate table.
//!
//! # Module Organization
//!
//! - [`cli`] - clap argument definitions
//! - [`config`] - the immutable per-run [`config::FilterConfig`]
//! - [`client`] - the UDSC API client
//! - [`aggregate`] - per-institution grouping and denial percentages
//! - [`output`] - terminal styling and the report renderer
//! - [`errors`] - error types ([`errors::MigstatError`], [`errors::Result`])
//! - [`status`] - exit status codes
//! - [`core`] - main execution logic

pub mod aggregate;
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod output;
pub mod stats;
pub mod status;
