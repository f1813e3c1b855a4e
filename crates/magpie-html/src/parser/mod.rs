//! Tolerant tree construction from a token stream.
//!
//! The [`TreeBuilder`] is a single-pass, no-lookahead reducer: it pulls one
//! token at a time from a [`TokenSource`], sanitizes tag and attribute
//! names, resolves the implicit closure of unclosed table and form scopes,
//! and appends into an arena [`Document`]. Its only mutable state is the
//! current insertion point and a per-parse `xmlns` rename counter.
//!
//! Malformed markup is survivable: dangling end tags are ignored, unnamed
//! raw tags are classified into placeholder elements or discarded, and
//! unclosed scopes at end of input close implicitly. The unrecoverable
//! cases abort the whole parse with the offending token's raw text
//! attached; there is no partial output.

/// The token-driven tree builder.
pub mod builder;
/// Implicit closure of unclosed table and form scopes.
pub mod closure;
/// Fatal parse errors and their diagnostic wrapper.
pub mod error;
/// Tag and attribute name sanitization.
pub mod sanitize;

use magpie_dom::{Document, NodeType};

pub use self::builder::TreeBuilder;
pub use self::error::{BuildError, ParseError, ParseErrorKind};

use crate::lexer::Lexer;

/// Parse an HTML document from a string.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the failing token's raw source text
/// if the document is unrecoverably malformed (conflicting duplicate
/// attributes, an unrecognized comment form, or end-tag resolution closing
/// the synthetic root). There is no partial output on failure.
pub fn parse_str(input: &str) -> Result<Document, ParseError> {
    let mut lexer = Lexer::new(input);
    TreeBuilder::new(input)
        .run(&mut lexer)
        .map_err(|e| e.into_parse_error(input))
}

/// Parse an HTML document from raw bytes.
///
/// Bytes are decoded as UTF-8 first, with invalid sequences replaced, so
/// any byte input parses as some text.
///
/// # Errors
///
/// Same failure surface as [`parse_str`].
pub fn parse_document(input: &[u8]) -> Result<Document, ParseError> {
    let text = String::from_utf8_lossy(input);
    parse_str(&text)
}

/// Render a tree as an indented debug listing.
///
/// One node per line, two spaces per depth level; text is quoted with
/// spaces made visible so compressed whitespace shows up.
#[must_use]
pub fn tree_to_string(doc: &Document) -> String {
    let mut out = String::new();
    for &child in doc.children(doc.root()) {
        render_node(doc, child, 0, &mut out);
    }
    out
}

fn render_node(doc: &Document, id: magpie_dom::NodeId, indent: usize, out: &mut String) {
    use std::fmt::Write;

    let prefix = "  ".repeat(indent);
    let Some(node) = doc.get(id) else { return };
    match &node.node_type {
        NodeType::Element(data) => {
            if data.attrs.is_empty() {
                let _ = writeln!(out, "{prefix}<{}>", data.tag_name);
            } else {
                let attrs: Vec<String> = data
                    .attrs
                    .iter()
                    .map(|a| {
                        if a.value.is_empty() {
                            a.name.clone()
                        } else {
                            format!("{}=\"{}\"", a.name, a.value)
                        }
                    })
                    .collect();
                let _ = writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "));
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            let _ = writeln!(out, "{prefix}\"{display}\"");
        }
        NodeType::Comment(data) => {
            let _ = writeln!(out, "{prefix}<!-- {data} -->");
        }
        NodeType::CData(data) => {
            let _ = writeln!(out, "{prefix}<![CDATA[ {data} ]]>");
        }
    }
    for &child in doc.children(id) {
        render_node(doc, child, indent + 1, out);
    }
}
