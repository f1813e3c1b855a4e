//! Lesson scraping on top of the Magpie HTML parser.
//!
//! This crate is the site-specific layer: it fetches a lesson index page,
//! parses it with the tolerant parser, walks the tree for the paragraphs
//! that hold numbered video lessons, and offers exact, substring, and
//! approximate search over the extracted records.
//!
//! Unlike the parser core, extraction is best-effort: a paragraph that
//! almost looks like a lesson but lacks a link or a label is skipped, not
//! fatal. Only fetching and parsing can fail.

/// Tree-walking record extraction.
pub mod extract;
/// The extracted lesson record.
pub mod record;
/// Exact, substring, and approximate search over records.
pub mod search;

use thiserror::Error;

use magpie_common::net::{self, FetchError};
use magpie_html::ParseError;

pub use extract::extract_lessons;
pub use record::Lesson;
pub use search::Searcher;

/// Errors produced while scraping a lesson page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page could not be fetched.
    #[error("failed to fetch lesson page: {0}")]
    Fetch(#[from] FetchError),
    /// The page could not be parsed.
    #[error("failed to parse lesson page: {0}")]
    Parse(#[from] ParseError),
}

/// Fetch a lesson index page over HTTP and extract its lesson records.
///
/// # Errors
///
/// Returns a [`ScrapeError`] if the fetch or the parse fails. An empty
/// result is not an error; pages without recognizable lessons yield an
/// empty list.
pub fn fetch_lessons(url: &str) -> Result<Vec<Lesson>, ScrapeError> {
    let html = net::fetch_text(url)?;
    let doc = magpie_html::parse_str(&html)?;
    Ok(extract_lessons(&doc))
}
