//! Page-Sweep: a concurrent paged scraper
//!
//! This crate fetches a numbered run of pages built from a URL template,
//! extracts one labeled field from each page, and reports results as they
//! arrive. Work flows through a task source, a fixed-size worker pool and a
//! result sink connected by bounded handoff channels.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Page-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL template error: {0}")]
    Template(#[from] TemplateError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// URL template errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template '{0}' has no %d placeholder")]
    MissingPlaceholder(String),

    #[error("template '{template}' has {count} %d placeholders, expected exactly one")]
    MultiplePlaceholders { template: String, count: usize },

    #[error("template '{template}' uses unsupported verb '%{verb}'")]
    UnsupportedVerb { template: String, verb: char },

    #[error("template '{0}' ends with a dangling '%'")]
    DanglingPercent(String),
}

/// Per-page fetch failures
///
/// None of these are fatal: a worker reports the failure and moves on to
/// its next task.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not get {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("bad response from {url}: {status}")]
    BadStatus { url: String, status: String },

    #[error("too many requests for {url}")]
    RateLimited { url: String },

    #[error("could not parse page {url}: {message}")]
    Parse { url: String, message: String },
}

impl FetchError {
    /// The URL the failed fetch was aimed at
    pub fn url(&self) -> &str {
        match self {
            FetchError::Network { url, .. }
            | FetchError::BadStatus { url, .. }
            | FetchError::RateLimited { url }
            | FetchError::Parse { url, .. } => url,
        }
    }

    /// Short stable name for the failure class, used in statistics
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Network { .. } => FailureKind::Network,
            FetchError::BadStatus { .. } => FailureKind::BadStatus,
            FetchError::RateLimited { .. } => FailureKind::RateLimited,
            FetchError::Parse { .. } => FailureKind::Parse,
        }
    }
}

/// Classification of a [`FetchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Network,
    BadStatus,
    RateLimited,
    Parse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Network => "network",
            FailureKind::BadStatus => "bad_status",
            FailureKind::RateLimited => "rate_limited",
            FailureKind::Parse => "parse",
        }
    }
}

/// Result type alias for Page-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for a single page fetch
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{PageResult, Task};
pub use crate::url::UrlTemplate;
