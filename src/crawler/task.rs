//! Values handed between pipeline stages

use std::fmt;

/// A page to fetch: the rendered URL and the id it was rendered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub url: String,
    pub id: u64,
}

/// The outcome of a successful fetch-and-extract
///
/// Conceptually the ordered pair `[summary_line, field]`, where the summary
/// line records the URL, task id and worker index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    url: String,
    id: u64,
    worker: usize,
    field: String,
}

impl PageResult {
    pub fn new(url: impl Into<String>, id: u64, worker: usize, field: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            id,
            worker,
            field: field.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Index of the worker that produced this result
    pub fn worker(&self) -> usize {
        self.worker
    }

    /// Extracted text; empty when the selector matched nothing
    pub fn field(&self) -> &str {
        &self.field
    }

    /// `Url: <url>, Id: <id>, Worker: <worker>`
    pub fn summary_line(&self) -> String {
        format!("Url: {}, Id: {}, Worker: {}", self.url, self.id, self.worker)
    }

    /// The result as its two-element `[summary_line, field]` form
    pub fn fields(&self) -> [String; 2] {
        [self.summary_line(), self.field.clone()]
    }
}

impl fmt::Display for PageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [summary, field] = self.fields();
        write!(f, "[{} {}]", summary, field)
    }
}
