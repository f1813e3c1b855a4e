//! The extracted lesson record.

use serde::Serialize;

/// One numbered video lesson scraped from an index page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    /// The lesson number as printed on the page (kept as text: numbers
    /// like "146a" exist).
    pub number: String,
    /// The lesson topic.
    pub topic: String,
    /// Link to the lesson video.
    pub video_url: String,
    /// Link to the practice questions, when the page has one.
    pub practice_url: Option<String>,
    /// Link to the textbook exercise, when the page has one.
    pub textbook_url: Option<String>,
    /// For approximate topic matches, the similarity as a rounded
    /// percentage. `None` for exact and substring matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_percent: Option<u32>,
}
