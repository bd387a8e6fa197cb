//! HTML field extraction
//!
//! Pages are parsed into a document tree and a single CSS selector is run
//! against it. The text of every matching element is concatenated and
//! trimmed, so a page with no match yields an empty string.

use crate::ConfigError;
use scraper::{Html, Selector};

/// A compiled selector plus the source it was compiled from
#[derive(Debug, Clone)]
pub struct Extractor {
    selector: Selector,
    source: String,
}

impl Extractor {
    /// Compiles `selector`
    ///
    /// # Example
    ///
    /// ```
    /// use page_sweep::crawler::Extractor;
    ///
    /// let extractor = Extractor::new(".name").unwrap();
    /// let html = r#"<html><body><div class="name"> Ada </div></body></html>"#;
    /// assert_eq!(extractor.extract(html), "Ada");
    /// ```
    pub fn new(selector: &str) -> Result<Self, ConfigError> {
        let compiled = Selector::parse(selector)
            .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))?;

        Ok(Self {
            selector: compiled,
            source: selector.to_string(),
        })
    }

    /// The selector as written
    pub fn selector(&self) -> &str {
        &self.source
    }

    /// Parses `html` and returns the trimmed text of all matching elements
    pub fn extract(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        let text: String = document
            .select(&self.selector)
            .flat_map(|element| element.text())
            .collect();

        text.trim().to_string()
    }
}
