//! URL handling module for Page-Sweep
//!
//! This module provides URL template parsing and the absolute-URL checks
//! applied to rendered page addresses.

mod template;

pub use template::UrlTemplate;

use ::url::Url;

/// Parses `candidate` and checks that it is an absolute HTTP(S) URL with a host
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(String)` - A description of why the URL is unusable
pub fn parse_absolute(candidate: &str) -> Result<Url, String> {
    let url = Url::parse(candidate).map_err(|e| format!("'{}': {}", candidate, e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!(
            "'{}' must use the http or https scheme, got '{}'",
            candidate,
            url.scheme()
        ));
    }

    if url.host_str().is_none() {
        return Err(format!("'{}' has no host", candidate));
    }

    Ok(url)
}
