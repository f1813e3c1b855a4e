//! Tolerant HTML lexer.
//!
//! A single streaming pass that chops raw markup into [`Token`]s: open and
//! close tags with their attributes, text runs with character references
//! decoded, comments, CDATA sections, and extracted script bodies. The
//! machine never fails on malformed input; anything it cannot shape into a
//! tag degrades to literal text or to an empty-named tag for the tree
//! builder to classify.

/// The lexer state machine.
pub mod core;
/// Character reference lookup tables.
pub mod entities;
/// Helper methods for consuming input and switching states.
pub mod helpers;
/// Token types produced by the lexer.
pub mod token;

pub use self::core::{Lexer, LexerOptions};
pub use self::token::{
    CommentToken, LexError, RawAttribute, Span, TagToken, TextToken, Token, TokenSource,
};
