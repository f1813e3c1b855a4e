//! Integration tests for lesson search.

use magpie_scrape::{Lesson, Searcher};

fn lesson(number: &str, topic: &str) -> Lesson {
    Lesson {
        number: number.to_string(),
        topic: topic.to_string(),
        video_url: format!("https://example.com/{number}"),
        practice_url: None,
        textbook_url: None,
        match_percent: None,
    }
}

fn searcher() -> Searcher {
    Searcher::new(vec![
        lesson("1", "Adding fractions"),
        lesson("2", "Subtracting fractions"),
        lesson("3", "Pythagoras"),
        lesson("146a", "Circle theorems"),
    ])
}

#[test]
fn test_by_number_is_exact() {
    let s = searcher();

    let found = s.by_number("146a");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].topic, "Circle theorems");

    assert!(s.by_number("146").is_empty());
    assert!(s.by_number("").is_empty());
}

#[test]
fn test_by_topic_substring_is_case_insensitive() {
    let s = searcher();

    let found = s.by_topic("FRACTIONS");
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].number, "1");
    assert_eq!(found[1].number, "2");
    // Substring matches carry no match percentage.
    assert!(found.iter().all(|l| l.match_percent.is_none()));
}

#[test]
fn test_by_topic_falls_back_to_approximate_matching() {
    let s = searcher();

    // A typo: no substring match, but similar enough to score.
    let found = s.by_topic("Pythagoras theorem");
    let pythagoras = found
        .iter()
        .find(|l| l.number == "3")
        .expect("approximate match should surface");
    let percent = pythagoras
        .match_percent
        .expect("approximate matches carry a percentage");
    assert!(percent >= 60);
    assert!(percent < 100);
}

#[test]
fn test_substring_matches_come_before_approximate_ones() {
    let s = Searcher::new(vec![
        lesson("10", "Fraction of an amount"),
        lesson("11", "Adding fractions"),
    ]);

    let found = s.by_topic("fractions");
    assert_eq!(found[0].number, "11");
    assert!(found[0].match_percent.is_none());
    // "Fraction of an amount" only matches approximately.
    if let Some(approx) = found.iter().find(|l| l.number == "10") {
        assert!(approx.match_percent.is_some());
    }
}

#[test]
fn test_unrelated_topics_do_not_match() {
    let s = searcher();
    assert!(s.by_topic("zzzzzzzz").is_empty());
}
