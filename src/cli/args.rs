//! CLI argument definitions using clap
//!
//! Values for `-t` and `-y` are taken as raw strings and validated while
//! building the [`FilterConfig`](crate::config::FilterConfig), so every
//! invalid value is reported in the same terse `Error: ...` form.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::client::API_BASE;

/// migstat - denial-rate statistics for Polish immigration decisions
#[derive(Parser, Debug, Clone)]
#[command(name = "migstat", version, about, long_about = None)]
pub struct Args {
    /// Case type: temp/kcp (temporary), perm/ksp (permanent), eult (EU long-term)
    #[arg(short = 't', long = "case-type", value_name = "TYPE")]
    pub case_type: Option<String>,

    /// Decision year, 2010 up to the current year
    #[arg(short = 'y', long = "year", value_name = "YEAR")]
    pub year: Option<String>,

    /// Path to a JSON object with additional filters (ageFrom, gender, country, ...)
    #[arg(short = 'f', long = "filters-file", value_name = "FILE")]
    pub filters_file: Option<PathBuf>,

    /// Inline JSON object with additional filters
    #[arg(short = 'F', long = "filters", value_name = "JSON")]
    pub filters: Option<String>,

    /// Disable ANSI colors in the report
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,

    /// Print full error details on failure
    #[arg(long = "traceback", action = ArgAction::SetTrue)]
    pub traceback: bool,

    /// Override the API base URL (used by the test suite)
    #[arg(
        long = "api-base",
        value_name = "URL",
        env = "MIGSTAT_API_BASE",
        default_value = API_BASE,
        hide = true
    )]
    pub api_base: String,
}
