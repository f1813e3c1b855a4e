//! Fatal parse errors.
//!
//! Every failure aborts the whole parse; there is no per-token recovery.
//! Inside the builder a failure is a [`ParseErrorKind`] plus the failing
//! token's span ([`BuildError`]); the entry points re-slice that span out
//! of the input and hand the caller a [`ParseError`] with the raw source
//! text of the offending token attached.

use thiserror::Error;

use crate::lexer::{LexError, Span};

/// The ways a parse can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The same attribute appeared more than once with differing values.
    /// Identical duplicates collapse silently; differing ones mark the
    /// document as unrecoverably malformed.
    #[error("attribute `{name}` was given different values")]
    AttributeConflict {
        /// The sanitized name of the conflicting attribute.
        name: String,
    },
    /// A comment token carried a marker that is neither `!--` nor
    /// `![CDATA[`. Indicates a token source this builder does not
    /// understand.
    #[error("unrecognized comment marker `{marker}`")]
    UnrecognizedCommentForm {
        /// The marker the token carried.
        marker: String,
    },
    /// End-tag resolution matched the synthetic root: the stream asked to
    /// close a scope that was never opened by it. A builder/lexer
    /// mismatch, not a recoverable document error.
    #[error("end tag resolution closed the synthetic root")]
    InvariantViolation,
    /// The token source failed to produce a token.
    #[error("token source failed: {0}")]
    Lexer(#[from] LexError),
}

/// A parse failure as the builder sees it: what went wrong and where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct BuildError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// The span of the token being processed when it went wrong.
    pub span: Span,
}

impl BuildError {
    /// Attach the raw source text of the failing token, producing the
    /// error surface callers see.
    #[must_use]
    pub fn into_parse_error(self, input: &str) -> ParseError {
        ParseError {
            source_text: self.span.snippet(input),
            kind: self.kind,
        }
    }
}

/// A fatal parse error with the offending token's raw source attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to build document tree: {kind} (source: `{source_text}`)")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// The raw text of the token being processed when the parse failed.
    /// Empty when the failing token carried no span (hand-built streams).
    pub source_text: String,
}
