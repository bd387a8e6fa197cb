use serde::Deserialize;

/// Default URL template when none is given
pub const DEFAULT_URL_TEMPLATE: &str = "http://example.com/%d";

/// Default number of pages to fetch
pub const DEFAULT_LENGTH: u64 = 10;

/// Default worker count
pub const DEFAULT_WORKERS: usize = 3;

/// Default CSS selector for the extracted field
pub const DEFAULT_SELECTOR: &str = ".name";

/// Main configuration structure for Page-Sweep
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Parameters of a single sweep over a numbered page range
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// URL with one `%d` placeholder for the page id
    #[serde(rename = "url-template", default = "default_url_template")]
    pub url_template: String,

    /// First page id
    #[serde(default)]
    pub start: u64,

    /// Number of pages to fetch
    #[serde(default = "default_length")]
    pub length: u64,

    /// Number of concurrent workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// CSS selector whose text is extracted from each page
    #[serde(default = "default_selector")]
    pub selector: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            start: 0,
            length: DEFAULT_LENGTH,
            workers: DEFAULT_WORKERS,
            selector: default_selector(),
        }
    }
}

fn default_url_template() -> String {
    DEFAULT_URL_TEMPLATE.to_string()
}

fn default_length() -> u64 {
    DEFAULT_LENGTH
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_selector() -> String {
    DEFAULT_SELECTOR.to_string()
}
