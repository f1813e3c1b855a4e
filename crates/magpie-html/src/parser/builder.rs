//! The token-driven tree builder.

use magpie_common::warning::warn_once;
use magpie_dom::{Document, ElementData, NodeId, NodeType};

use super::closure::implied_parent;
use super::error::{BuildError, ParseErrorKind};
use super::sanitize::{classify_unnamed, clean_tag_name, sanitize_attributes};
use crate::lexer::{CommentToken, TagToken, Token, TokenSource};

/// Placeholder body appended under `script` elements. Script contents are
/// never retained in the tree.
const SCRIPT_PLACEHOLDER: &str = "REMOVED";

/// Streaming tree builder: a reducer over a token stream.
///
/// One token is fully processed before the next is pulled; there is no
/// lookahead. State is the arena under construction, the current insertion
/// point, and the `xmlns` rename counter, all local to one parse call, so
/// independent parses are freely parallel.
pub struct TreeBuilder<'a> {
    /// The original input, used to classify unnamed raw tags by their
    /// source form. Empty for hand-built token streams.
    source: &'a str,
    doc: Document,
    /// The current insertion point: the element the next node attaches to.
    cursor: NodeId,
    xmlns_counter: usize,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder for tokens lexed from `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            doc: Document::new(),
            cursor: NodeId::ROOT,
            xmlns_counter: 0,
        }
    }

    /// Consume `tokens` to exhaustion and return the assembled tree.
    ///
    /// Scopes left open when the stream ends close implicitly: the arena
    /// root already holds everything in order, so exhaustion is success.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] naming the failure and the failing token's
    /// span on the first unrecoverable token; the tree built so far is
    /// discarded.
    pub fn run(mut self, tokens: &mut impl TokenSource) -> Result<Document, BuildError> {
        loop {
            let token = match tokens.next_token() {
                Ok(Some(token)) => token,
                Ok(None) => return Ok(self.doc),
                Err(e) => {
                    return Err(BuildError {
                        span: e.span,
                        kind: ParseErrorKind::Lexer(e),
                    });
                }
            };
            let span = token.span();
            if let Err(kind) = self.process_token(&token) {
                return Err(BuildError { kind, span });
            }
        }
    }

    /// Apply one token to the tree.
    fn process_token(&mut self, token: &Token) -> Result<(), ParseErrorKind> {
        match token {
            Token::OpenTag(tag) => self.handle_open_tag(tag, true),
            Token::CloseTag(tag) if tag.self_closing => self.handle_open_tag(tag, false),
            Token::CloseTag(tag) => {
                self.handle_end_tag(tag)?;
                Ok(())
            }
            Token::Text(text) => {
                let _ = self.doc.append(self.cursor, NodeType::Text(text.text.clone()));
                Ok(())
            }
            Token::Comment(comment) => self.handle_comment(comment),
            Token::CData(text) => {
                let _ = self.doc.append(self.cursor, NodeType::CData(text.text.clone()));
                Ok(())
            }
            Token::Script(_) => {
                let script = self.doc.append(
                    self.cursor,
                    NodeType::Element(ElementData {
                        tag_name: "script".to_string(),
                        attrs: Vec::new(),
                    }),
                );
                let _ = self
                    .doc
                    .append(script, NodeType::Text(SCRIPT_PLACEHOLDER.to_string()));
                Ok(())
            }
        }
    }

    /// Append a new element for an open or self-closed tag.
    ///
    /// The attach point comes from the implicit-closure resolver; the
    /// insertion point moves there either way, and into the new element
    /// only when the tag opens a scope.
    fn handle_open_tag(&mut self, tag: &TagToken, enters_scope: bool) -> Result<(), ParseErrorKind> {
        let Some(data) = self.parse_tag_node(tag)? else {
            return Ok(());
        };

        let mut ancestors = vec![self.cursor];
        ancestors.extend(self.doc.ancestors(self.cursor));
        if let Some(parent) = implied_parent(&self.doc, &ancestors, &data.tag_name) {
            self.cursor = parent;
        }

        let id = self.doc.append(self.cursor, NodeType::Element(data));
        if enters_scope {
            self.cursor = id;
        }
        Ok(())
    }

    /// Sanitize a tag token into element data, or decide to drop it.
    ///
    /// An empty-named tag is classified by its raw source form into a
    /// placeholder element; unclassifiable forms are discarded with a
    /// deduplicated warning and no state change.
    fn parse_tag_node(&mut self, tag: &TagToken) -> Result<Option<ElementData>, ParseErrorKind> {
        if tag.raw_name.is_empty() {
            let raw = tag.span.snippet(self.source);
            return Ok(match classify_unnamed(&raw) {
                Some(placeholder) => Some(ElementData {
                    tag_name: placeholder.to_string(),
                    attrs: Vec::new(),
                }),
                None => {
                    warn_once("Builder", &format!("discarding unnamed tag: `{raw}`"));
                    None
                }
            });
        }

        let tag_name = clean_tag_name(&tag.raw_name);
        let attrs = sanitize_attributes(&tag.attributes, &mut self.xmlns_counter)
            .map_err(|name| ParseErrorKind::AttributeConflict { name })?;
        Ok(Some(ElementData { tag_name, attrs }))
    }

    /// Close the nearest matching open scope, everything beneath included.
    ///
    /// The scan starts at the insertion point itself. No match means a
    /// dangling end tag, which is ignored. A match on the synthetic root
    /// is the builder invariant violation: the stream closed a scope this
    /// builder never opened.
    fn handle_end_tag(&mut self, tag: &TagToken) -> Result<(), ParseErrorKind> {
        let name = clean_tag_name(&tag.raw_name);

        let mut current = Some(self.cursor);
        while let Some(id) = current {
            if self
                .doc
                .as_element(id)
                .is_some_and(|e| e.tag_name == name)
            {
                match self.doc.parent(id) {
                    Some(parent) => self.cursor = parent,
                    None => return Err(ParseErrorKind::InvariantViolation),
                }
                return Ok(());
            }
            current = self.doc.parent(id);
        }
        Ok(())
    }

    /// Append a comment or CDATA node, depending on the reported marker.
    fn handle_comment(&mut self, comment: &CommentToken) -> Result<(), ParseErrorKind> {
        let node_type = match comment.marker.as_str() {
            "!--" => NodeType::Comment(comment.text.clone()),
            "![CDATA[" => NodeType::CData(comment.text.clone()),
            _ => {
                return Err(ParseErrorKind::UnrecognizedCommentForm {
                    marker: comment.marker.clone(),
                });
            }
        };
        let _ = self.doc.append(self.cursor, node_type);
        Ok(())
    }
}
