//! HTTP fetch utilities for the Magpie toolkit.
//!
//! Provides simple blocking HTTP GET wrappers used by the document loader
//! and the lesson scraper.

use std::time::Duration;

use thiserror::Error;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Errors produced while fetching a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request failed before a response arrived (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),
    /// The response body could not be read or decoded.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Fetch a URL and return its body as text.
///
/// # Errors
///
/// Returns a [`FetchError`] if the HTTP client cannot be created, the
/// request fails, the response has a non-success status, or the body
/// cannot be decoded.
pub fn fetch_text(url: &str) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(FetchError::Request)?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    response.text().map_err(FetchError::Body)
}

/// Fetch a URL and return its body as raw bytes.
///
/// # Errors
///
/// Returns a [`FetchError`] if the HTTP client cannot be created, the
/// request fails, the response has a non-success status, or the body
/// cannot be read.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(FetchError::Request)?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(FetchError::Body)
}
