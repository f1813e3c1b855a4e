//! Permissive HTML lexer and tolerant tree builder.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Lexer** - a streaming tokenizer for real-world markup
//!   - entity decoding (common named set, numeric forms, and a "mini"
//!     fallback set)
//!   - comment, CDATA, and script bodies extracted as standalone tokens
//!   - whitespace before tags compressed to a single space
//!   - self-closed tags kept distinct from open tags
//! - **Tree Builder** - a single-pass, no-lookahead reducer over the token
//!   stream
//!   - implicit closure of unclosed `td`/`tr`/`thead`/`tbody`/`tfoot`/`form`
//!     scopes
//!   - tag and attribute name sanitization (namespace markers, duplicate
//!     attributes, comments embedded inside tags)
//!   - dangling end tags ignored; malformed raw tags classified or dropped
//!
//! Most malformed input is survivable. The few unrecoverable cases
//! (conflicting duplicate attributes, unknown comment markers, end-tag
//! resolution closing the synthetic root) abort the whole parse with the
//! offending token's raw text attached; there is no partial output.

/// Streaming HTML lexer producing tokens on demand.
pub mod lexer;
/// Tree construction from a token stream.
pub mod parser;

pub use lexer::{
    CommentToken, LexError, Lexer, LexerOptions, RawAttribute, Span, TagToken, TextToken, Token,
    TokenSource,
};
pub use parser::{
    BuildError, ParseError, ParseErrorKind, TreeBuilder, parse_document, parse_str, tree_to_string,
};
