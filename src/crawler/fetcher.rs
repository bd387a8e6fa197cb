//! HTTP fetcher implementation
//!
//! Each call performs exactly one GET with default transport settings. There
//! is no retry, no timeout and no custom header. The status code decides
//! the outcome:
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 200 | Body parsed, field extracted → `PageResult` |
//! | 200, body unreadable | `FetchError::Parse` |
//! | 429 | `FetchError::RateLimited` |
//! | other | `FetchError::BadStatus` with the status text |
//! | no response | `FetchError::Network` |

use crate::crawler::parser::Extractor;
use crate::crawler::task::PageResult;
use crate::{FetchError, FetchResult};
use reqwest::{Client, StatusCode};

/// Builds the HTTP client shared by all workers
///
/// The client keeps reqwest's defaults; it exists once per sweep so that
/// workers share a connection pool.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().build()
}

/// Fetches one page and extracts its field
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `extractor` - The compiled field selector
/// * `url` - The absolute URL to fetch
/// * `id` - The task id, recorded in the result
/// * `worker` - Index of the calling worker, recorded in the result
///
/// # Returns
///
/// A `PageResult` on a 200 response, otherwise the classified failure.
pub async fn fetch_page(
    client: &Client,
    extractor: &Extractor,
    url: &str,
    id: u64,
    worker: usize,
) -> FetchResult<PageResult> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();

    // Non-200 responses are dropped unread, releasing the connection.
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::RateLimited {
            url: url.to_string(),
        });
    }

    if status != StatusCode::OK {
        return Err(FetchError::BadStatus {
            url: url.to_string(),
            status: status_text(status),
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let field = extractor.extract(&body);

    Ok(PageResult::new(url, id, worker, field))
}

/// Renders a status as `"<code> <reason>"`, e.g. `500 Internal Server Error`
fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
