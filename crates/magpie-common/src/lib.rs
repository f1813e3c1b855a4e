//! Common utilities for the Magpie toolkit.
//!
//! This crate provides shared infrastructure used by the parser and
//! scraper components:
//! - **HTTP Fetch** - blocking GET wrappers with a browser user agent
//! - **Warning System** - deduplicated colored terminal output

pub mod net;
pub mod warning;
