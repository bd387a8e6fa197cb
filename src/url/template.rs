//! Numbered URL templates
//!
//! A template is a URL with exactly one `%d` placeholder that is replaced by
//! a page id, e.g. `https://example.com/items/%d`. A literal percent sign is
//! written `%%`.

use crate::TemplateError;
use std::fmt;

/// A parsed URL template with a single id placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    /// The template as written by the user
    raw: String,

    /// Literal text before the placeholder (escapes resolved)
    prefix: String,

    /// Literal text after the placeholder (escapes resolved)
    suffix: String,
}

impl UrlTemplate {
    /// Parses a template string
    ///
    /// # Errors
    ///
    /// * `MissingPlaceholder` - no `%d` in the template
    /// * `MultiplePlaceholders` - more than one `%d`
    /// * `UnsupportedVerb` - a `%` followed by anything but `d` or `%`
    /// * `DanglingPercent` - the template ends with a lone `%`
    ///
    /// # Example
    ///
    /// ```
    /// use page_sweep::url::UrlTemplate;
    ///
    /// let template = UrlTemplate::parse("https://example.com/%d?q=100%%").unwrap();
    /// assert_eq!(template.render(7), "https://example.com/7?q=100%");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut placeholders = 0usize;

        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            let current = if placeholders == 0 {
                &mut prefix
            } else {
                &mut suffix
            };

            if c != '%' {
                current.push(c);
                continue;
            }

            match chars.next() {
                Some('%') => current.push('%'),
                Some('d') => placeholders += 1,
                Some(verb) => {
                    return Err(TemplateError::UnsupportedVerb {
                        template: raw.to_string(),
                        verb,
                    })
                }
                None => return Err(TemplateError::DanglingPercent(raw.to_string())),
            }
        }

        match placeholders {
            0 => Err(TemplateError::MissingPlaceholder(raw.to_string())),
            1 => Ok(Self {
                raw: raw.to_string(),
                prefix,
                suffix,
            }),
            count => Err(TemplateError::MultiplePlaceholders {
                template: raw.to_string(),
                count,
            }),
        }
    }

    /// Substitutes `id` into the placeholder
    pub fn render(&self, id: u64) -> String {
        format!("{}{}{}", self.prefix, id, self.suffix)
    }

    /// The template as originally written
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
