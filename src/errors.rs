//! Error types for migstat

use thiserror::Error;

/// Main error type for migstat
#[derive(Error, Debug)]
pub enum MigstatError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Invalid filters: {0}")]
    Filter(String),

    #[error("Unknown institution id: {0}")]
    Lookup(i64),
}

impl MigstatError {
    /// Argument and filter errors are reported tersely on stdout;
    /// everything else surfaces the underlying error on stderr.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, MigstatError::Argument(_) | MigstatError::Filter(_))
    }
}

pub type Result<T> = std::result::Result<T, MigstatError>;
