use core::fmt;

use thiserror::Error;

/// Byte range of a token within the original input.
///
/// Used only for diagnostics: error reports re-slice the input with the
/// failing token's span, and the builder's malformed-tag classification
/// inspects the raw form of empty-named tags. Never used to re-lex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first byte of the token.
    pub offset: usize,
    /// Length of the token in bytes.
    pub len: usize,
}

impl Span {
    /// An empty span at offset zero, for tokens built by hand rather than
    /// lexed from a document.
    pub const EMPTY: Span = Span { offset: 0, len: 0 };

    /// Re-decode this span out of `source`.
    ///
    /// Out-of-range offsets are clamped and a range that splits a UTF-8
    /// character falls back to a lossy byte decode, so this is total over
    /// any (span, source) pair.
    #[must_use]
    pub fn snippet(&self, source: &str) -> String {
        let end = self.offset.saturating_add(self.len).min(source.len());
        let start = self.offset.min(end);
        match source.get(start..end) {
            Some(text) => text.to_string(),
            None => String::from_utf8_lossy(&source.as_bytes()[start..end]).into_owned(),
        }
    }
}

/// An attribute as the lexer saw it, before any sanitization.
///
/// Duplicate names are preserved here; resolving them is the builder's
/// job, not the lexer's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    /// Attribute name, lowercased but otherwise untouched.
    pub name: String,
    /// Attribute value with entities decoded, quotes removed.
    pub value: String,
}

impl RawAttribute {
    /// Create a new raw attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// Payload of an open or close tag token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
    /// Raw tag name: lowercased, possibly namespace-prefixed (`v:shape`),
    /// possibly carrying a processing-instruction marker (`?xml`), and
    /// empty for malformed raw tags the lexer could not name.
    pub raw_name: String,
    /// Attributes in document order, duplicates included.
    pub attributes: Vec<RawAttribute>,
    /// On a close tag, `true` marks a self-closed open tag (`<br/>`) and
    /// `false` a true end tag. Always `false` on an open tag.
    pub self_closing: bool,
    /// Where this tag sits in the input.
    pub span: Span,
}

/// Payload of a text, CDATA, or script token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToken {
    /// Decoded character data.
    pub text: String,
    /// Where this chunk sits in the input.
    pub span: Span,
}

/// Payload of a comment token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentToken {
    /// The declaration form the lexer saw: `!--` for an HTML comment,
    /// `![CDATA[` for a CDATA section. Any other marker is fatal in the
    /// builder.
    pub marker: String,
    /// The body between the delimiters.
    pub text: String,
    /// Where this comment sits in the input.
    pub span: Span,
}

/// One lexical chunk of an HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A true open tag: `<div id="x">`.
    OpenTag(TagToken),
    /// A close tag: either a true end tag (`</div>`) or a self-closed
    /// open tag (`<br/>`), distinguished by [`TagToken::self_closing`].
    CloseTag(TagToken),
    /// A run of character data between tags.
    Text(TextToken),
    /// A comment or CDATA section, distinguished by [`CommentToken::marker`].
    Comment(CommentToken),
    /// A CDATA section from a source that pre-classifies them. The lexer
    /// in this crate reports CDATA through [`Token::Comment`] instead.
    CData(TextToken),
    /// The body of a `<script>` element, extracted whole.
    Script(TextToken),
}

impl Token {
    /// The byte range this token was lexed from.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Token::OpenTag(tag) | Token::CloseTag(tag) => tag.span,
            Token::Text(text) | Token::CData(text) | Token::Script(text) => text.span,
            Token::Comment(comment) => comment.span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenTag(tag) => {
                write!(f, "<{}", tag.raw_name)?;
                for attr in &tag.attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                write!(f, ">")
            }
            Self::CloseTag(tag) if tag.self_closing => {
                write!(f, "<{}", tag.raw_name)?;
                for attr in &tag.attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                write!(f, " />")
            }
            Self::CloseTag(tag) => write!(f, "</{}>", tag.raw_name),
            Self::Text(text) => {
                // Show whitespace explicitly so compressed runs are visible
                let display = text.text.replace('\n', "\\n").replace(' ', "\u{00B7}");
                write!(f, "Text({display})")
            }
            Self::Comment(comment) => write!(f, "Comment[{}]({})", comment.marker, comment.text),
            Self::CData(text) => write!(f, "CData({})", text.text),
            Self::Script(text) => write!(f, "Script({} bytes)", text.text.len()),
        }
    }
}

/// Error reported by a token source that failed to produce a token.
///
/// The lexer in this crate is total over its input and never returns one,
/// but the contract allows other sources (network-backed, hand-built) to
/// fail mid-stream; the builder turns that into a fatal parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LexError {
    /// Human-readable reason the source stopped.
    pub message: String,
    /// Where in the input the failure happened, when known.
    pub span: Span,
}

/// A pull-based source of tokens.
///
/// The tree builder drives this one call at a time: one token is fully
/// processed before the next is requested. `Ok(None)` is end of stream.
pub trait TokenSource {
    /// Produce the next token, or `None` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the source cannot produce a token; the
    /// builder treats that as fatal for the whole parse.
    fn next_token(&mut self) -> Result<Option<Token>, LexError>;
}

/// Hand-built token streams: any vector of tokens is a source.
impl TokenSource for std::vec::IntoIter<Token> {
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        Ok(self.next())
    }
}
