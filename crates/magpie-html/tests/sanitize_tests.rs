//! Unit tests for tag and attribute name sanitization.

use magpie_dom::Attribute;
use magpie_html::RawAttribute;
use magpie_html::parser::sanitize::{
    clean_attribute_name, clean_tag_name, classify_unnamed, resolve_duplicates,
    sanitize_attributes,
};

fn attr(name: &str, value: &str) -> Attribute {
    Attribute {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn raw(name: &str, value: &str) -> RawAttribute {
    RawAttribute::new(name.to_string(), value.to_string())
}

#[test]
fn test_clean_tag_name_strips_pi_marker() {
    assert_eq!(clean_tag_name("?xml"), "xml");
    assert_eq!(clean_tag_name("div"), "div");
}

#[test]
fn test_clean_tag_name_drops_namespace_prefix() {
    assert_eq!(clean_tag_name("v:shape"), "shape");
    assert_eq!(clean_tag_name("a:b:c"), "c");
    assert_eq!(clean_tag_name("?ns:pi"), "pi");
}

#[test]
fn test_attribute_name_dropped_when_empty_or_numeric() {
    let mut counter = 0;
    assert_eq!(clean_attribute_name("", &mut counter), None);
    assert_eq!(clean_attribute_name("1abc", &mut counter), None);
    assert_eq!(counter, 0);
}

#[test]
fn test_xmlns_renamed_with_monotonic_counter() {
    let mut counter = 0;
    assert_eq!(
        clean_attribute_name("xmlns", &mut counter),
        Some("xmlns_0".to_string())
    );
    assert_eq!(
        clean_attribute_name("XMLNS", &mut counter),
        Some("xmlns_1".to_string())
    );
    assert_eq!(counter, 2);
}

#[test]
fn test_xmlns_prefix_rewritten_without_counter() {
    let mut counter = 0;
    assert_eq!(
        clean_attribute_name("xmlns:v", &mut counter),
        Some("xmlns_v".to_string())
    );
    // The rewritten suffix keeps its case; the counter is untouched.
    assert_eq!(
        clean_attribute_name("XMLNS:Foo", &mut counter),
        Some("xmlns_Foo".to_string())
    );
    assert_eq!(counter, 0);
}

#[test]
fn test_trailing_quote_trimmed_and_colons_replaced() {
    let mut counter = 0;
    assert_eq!(
        clean_attribute_name("style\"", &mut counter),
        Some("style".to_string())
    );
    assert_eq!(
        clean_attribute_name("o:style", &mut counter),
        Some("o_style".to_string())
    );
}

#[test]
fn test_identical_duplicates_collapse_to_the_end() {
    let attrs = vec![attr("id", "x"), attr("class", "a"), attr("id", "x")];
    let resolved = resolve_duplicates(attrs).unwrap();
    assert_eq!(resolved, vec![attr("class", "a"), attr("id", "x")]);
}

#[test]
fn test_conflicting_duplicates_fail_with_the_name() {
    let attrs = vec![attr("id", "x"), attr("id", "y")];
    assert_eq!(resolve_duplicates(attrs), Err("id".to_string()));
}

#[test]
fn test_unique_attributes_pass_through_in_order() {
    let attrs = vec![attr("a", "1"), attr("b", "2")];
    assert_eq!(resolve_duplicates(attrs.clone()), Ok(attrs));
}

#[test]
fn test_inline_comment_slots_are_skipped() {
    let mut counter = 0;
    let raws = vec![
        raw("id", "x"),
        raw("<!--", ""),
        raw("commented", "out"),
        raw("-->", ""),
        raw("class", "y"),
    ];
    let attrs = sanitize_attributes(&raws, &mut counter).unwrap();
    assert_eq!(attrs, vec![attr("id", "x"), attr("class", "y")]);
}

#[test]
fn test_unterminated_inline_comment_skips_to_the_end() {
    let mut counter = 0;
    let raws = vec![raw("id", "x"), raw("<!--", ""), raw("a", "1"), raw("b", "2")];
    let attrs = sanitize_attributes(&raws, &mut counter).unwrap();
    assert_eq!(attrs, vec![attr("id", "x")]);
}

#[test]
fn test_lone_question_mark_attribute_is_skipped() {
    let mut counter = 0;
    let raws = vec![raw("version", "1.0"), raw("?", "")];
    let attrs = sanitize_attributes(&raws, &mut counter).unwrap();
    assert_eq!(attrs, vec![attr("version", "1.0")]);
}

#[test]
fn test_classify_unnamed_forms() {
    assert_eq!(classify_unnamed("<!doctype html>"), Some("doctype"));
    assert_eq!(classify_unnamed("<!DOCTYPE HTML PUBLIC>"), Some("doctype"));
    assert_eq!(
        classify_unnamed("<![if !supportEmptyParas]>"),
        Some("removed_conditional_block")
    );
    assert_eq!(
        classify_unnamed("<%@ Page Language=\"C#\" %>"),
        Some("removed_server_directive")
    );
    assert_eq!(
        classify_unnamed("<!-Extra_Images->"),
        Some("removed_short_comment")
    );
    assert_eq!(classify_unnamed("<div foo"), None);
}
