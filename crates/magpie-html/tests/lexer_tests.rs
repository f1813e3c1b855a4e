//! Integration tests for the HTML lexer.

use magpie_html::{Lexer, LexerOptions, Token};

/// Helper to run the lexer to exhaustion.
fn lex(html: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(html);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token().expect("lexer never fails") {
        tokens.push(token);
    }
    tokens
}

/// Helper to run the lexer with explicit options.
fn lex_with(html: &str, options: LexerOptions) -> Vec<Token> {
    let mut lexer = Lexer::with_options(html, options);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token().expect("lexer never fails") {
        tokens.push(token);
    }
    tokens
}

fn open_tag(token: &Token) -> &magpie_html::TagToken {
    match token {
        Token::OpenTag(tag) => tag,
        other => panic!("expected open tag, got {other}"),
    }
}

fn close_tag(token: &Token) -> &magpie_html::TagToken {
    match token {
        Token::CloseTag(tag) => tag,
        other => panic!("expected close tag, got {other}"),
    }
}

fn text(token: &Token) -> &str {
    match token {
        Token::Text(t) => &t.text,
        other => panic!("expected text, got {other}"),
    }
}

#[test]
fn test_open_and_close_tags() {
    let tokens = lex("<div id=\"x\">a</div>");
    assert_eq!(tokens.len(), 3);

    let div = open_tag(&tokens[0]);
    assert_eq!(div.raw_name, "div");
    assert_eq!(div.attributes.len(), 1);
    assert_eq!(div.attributes[0].name, "id");
    assert_eq!(div.attributes[0].value, "x");
    assert!(!div.self_closing);

    assert_eq!(text(&tokens[1]), "a");

    let end = close_tag(&tokens[2]);
    assert_eq!(end.raw_name, "div");
    assert!(!end.self_closing);
}

#[test]
fn test_tag_and_attribute_names_are_lowercased() {
    let tokens = lex("<DIV CLASS='a'>");
    let div = open_tag(&tokens[0]);
    assert_eq!(div.raw_name, "div");
    assert_eq!(div.attributes[0].name, "class");
    assert_eq!(div.attributes[0].value, "a");
}

#[test]
fn test_self_closed_tag_is_a_close_token() {
    let tokens = lex("<br/>");
    let br = close_tag(&tokens[0]);
    assert_eq!(br.raw_name, "br");
    assert!(br.self_closing);
}

#[test]
fn test_self_closed_tag_with_unquoted_attribute() {
    let tokens = lex("<img src=x/>");
    let img = close_tag(&tokens[0]);
    assert_eq!(img.raw_name, "img");
    assert!(img.self_closing);
    assert_eq!(img.attributes[0].name, "src");
    assert_eq!(img.attributes[0].value, "x");
}

#[test]
fn test_slash_inside_unquoted_value_is_kept() {
    let tokens = lex("<a href=docs/index.html>");
    let a = open_tag(&tokens[0]);
    assert!(!a.self_closing);
    assert_eq!(a.attributes[0].value, "docs/index.html");
}

#[test]
fn test_compat_mode_reports_closed_tag_with_attributes_as_open() {
    let options = LexerOptions {
        closed_tags_with_attributes_are_open: true,
        ..LexerOptions::default()
    };
    let tokens = lex_with("<img src=x/><br/>", options);

    // With attributes: forced open. Without: still a self-closed close tag.
    let img = open_tag(&tokens[0]);
    assert_eq!(img.raw_name, "img");
    assert!(!img.self_closing);
    assert!(close_tag(&tokens[1]).self_closing);
}

#[test]
fn test_named_and_numeric_entities_decode_in_text() {
    let tokens = lex("a &amp; b &#65;&#x42;");
    assert_eq!(text(&tokens[0]), "a & b AB");
}

#[test]
fn test_unknown_entity_stays_literal() {
    let tokens = lex("a &bogus; b");
    assert_eq!(text(&tokens[0]), "a &bogus; b");
}

#[test]
fn test_entities_decode_in_attribute_values() {
    let tokens = lex("<a title=\"x &amp; y\">");
    assert_eq!(open_tag(&tokens[0]).attributes[0].value, "x & y");
}

#[test]
fn test_mini_entity_mode_decodes_only_the_mini_set() {
    let options = LexerOptions {
        decode_entities: false,
        ..LexerOptions::default()
    };
    let tokens = lex_with("&lt;&copy;&#65;", options);
    // The mini set decodes; everything else, numeric forms included, stays.
    assert_eq!(text(&tokens[0]), "<&copy;&#65;");
}

#[test]
fn test_comment_extraction() {
    let tokens = lex("<!-- hello -->");
    match &tokens[0] {
        Token::Comment(c) => {
            assert_eq!(c.marker, "!--");
            assert_eq!(c.text, " hello ");
        }
        other => panic!("expected comment, got {other}"),
    }
}

#[test]
fn test_cdata_reported_as_comment_with_cdata_marker() {
    let tokens = lex("<![CDATA[raw <stuff>]]>");
    match &tokens[0] {
        Token::Comment(c) => {
            assert_eq!(c.marker, "![CDATA[");
            assert_eq!(c.text, "raw <stuff>");
        }
        other => panic!("expected comment, got {other}"),
    }
}

#[test]
fn test_unterminated_comment_runs_to_end_of_input() {
    let tokens = lex("<!-- never closed");
    match &tokens[0] {
        Token::Comment(c) => assert_eq!(c.text, " never closed"),
        other => panic!("expected comment, got {other}"),
    }
}

#[test]
fn test_script_body_extracted_as_single_token() {
    let tokens = lex("<script type=\"text/javascript\">var a = \"<div>\";</script><p>");
    match &tokens[0] {
        Token::Script(s) => assert_eq!(s.text, "var a = \"<div>\";"),
        other => panic!("expected script, got {other}"),
    }
    assert_eq!(open_tag(&tokens[1]).raw_name, "p");
}

#[test]
fn test_script_close_match_is_case_insensitive() {
    let tokens = lex("<script>x</SCRIPT>");
    match &tokens[0] {
        Token::Script(s) => assert_eq!(s.text, "x"),
        other => panic!("expected script, got {other}"),
    }
}

#[test]
fn test_whitespace_before_tag_compresses_to_one_space() {
    let tokens = lex("a  \n\t<b>");
    assert_eq!(text(&tokens[0]), "a ");

    let tokens = lex("   <b>");
    assert_eq!(text(&tokens[0]), " ");
}

#[test]
fn test_trailing_whitespace_at_eof_is_verbatim() {
    let tokens = lex("a  ");
    assert_eq!(text(&tokens[0]), "a  ");
}

#[test]
fn test_processing_instruction_keeps_marker_and_trailing_question_mark() {
    let tokens = lex("<?xml version=\"1.0\"?>");
    let pi = open_tag(&tokens[0]);
    assert_eq!(pi.raw_name, "?xml");
    assert_eq!(pi.attributes[0].name, "version");
    assert_eq!(pi.attributes[0].value, "1.0");
    // The trailing `?` lexes as an empty-valued attribute; the builder
    // drops it.
    assert_eq!(pi.attributes[1].name, "?");
    assert_eq!(pi.attributes[1].value, "");
}

#[test]
fn test_doctype_is_an_empty_named_tag_spanning_the_raw_form() {
    let html = "<!DOCTYPE html><p>";
    let tokens = lex(html);
    let decl = open_tag(&tokens[0]);
    assert_eq!(decl.raw_name, "");
    assert_eq!(decl.span.snippet(html), "<!DOCTYPE html>");
    assert_eq!(open_tag(&tokens[1]).raw_name, "p");
}

#[test]
fn test_server_directive_is_an_empty_named_tag() {
    let html = "<%@ Page Language=\"C#\" %>";
    let tokens = lex(html);
    let decl = open_tag(&tokens[0]);
    assert_eq!(decl.raw_name, "");
    assert_eq!(decl.span.snippet(html), html);
}

#[test]
fn test_lt_inside_tag_aborts_and_relexes() {
    let html = "<br <br>";
    let tokens = lex(html);
    assert_eq!(tokens.len(), 2);

    let aborted = open_tag(&tokens[0]);
    assert_eq!(aborted.raw_name, "");
    assert_eq!(aborted.span.snippet(html), "<br ");

    assert_eq!(open_tag(&tokens[1]).raw_name, "br");
}

#[test]
fn test_stray_lt_is_literal_text() {
    let tokens = lex("a < b");
    assert_eq!(text(&tokens[0]), "a < b");
}

#[test]
fn test_spans_cover_the_lexed_range() {
    let html = "ab<div>cd";
    let tokens = lex(html);
    assert_eq!(tokens[0].span().snippet(html), "ab");
    assert_eq!(tokens[1].span().snippet(html), "<div>");
    assert_eq!(tokens[2].span().snippet(html), "cd");
}
