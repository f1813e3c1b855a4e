//! Exact, substring, and approximate search over lesson records.

use crate::record::Lesson;

/// Minimum Jaro-Winkler similarity for an approximate topic match.
pub const SIMILARITY_THRESHOLD: f64 = 0.6;

/// Search over a fixed set of lesson records.
pub struct Searcher {
    lessons: Vec<Lesson>,
}

impl Searcher {
    /// Create a searcher over the given records.
    #[must_use]
    pub fn new(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    /// The records this searcher was built over.
    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Lessons whose number matches `number` exactly.
    #[must_use]
    pub fn by_number(&self, number: &str) -> Vec<Lesson> {
        self.lessons
            .iter()
            .filter(|lesson| lesson.number == number)
            .cloned()
            .collect()
    }

    /// Lessons whose topic matches `query`.
    ///
    /// Case-insensitive substring matches come first, without a match
    /// percentage. Records not already matched are then scored with
    /// Jaro-Winkler similarity; those at or above
    /// [`SIMILARITY_THRESHOLD`] follow, each carrying its similarity as
    /// a rounded percentage.
    #[must_use]
    pub fn by_topic(&self, query: &str) -> Vec<Lesson> {
        let query_lower = query.to_lowercase();

        let mut matches: Vec<Lesson> = Vec::new();
        let mut matched: Vec<bool> = vec![false; self.lessons.len()];

        for (i, lesson) in self.lessons.iter().enumerate() {
            if lesson.topic.to_lowercase().contains(&query_lower) {
                matched[i] = true;
                matches.push(Lesson {
                    match_percent: None,
                    ..lesson.clone()
                });
            }
        }

        for (i, lesson) in self.lessons.iter().enumerate() {
            if matched[i] {
                continue;
            }
            let similarity = strsim::jaro_winkler(&lesson.topic.to_lowercase(), &query_lower);
            if similarity >= SIMILARITY_THRESHOLD {
                matches.push(Lesson {
                    match_percent: Some(to_percent(similarity)),
                    ..lesson.clone()
                });
            }
        }

        matches
    }
}

/// Round a 0..=1 similarity to a whole percentage.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percent(similarity: f64) -> u32 {
    (similarity * 100.0).round() as u32
}
