//! The lexer state machine.
//!
//! A permissive, pull-based tokenizer: the caller (normally the tree
//! builder) asks for one token at a time and the machine consumes exactly
//! as much input as that token needs. Comments, CDATA sections, and script
//! bodies are extracted whole rather than walked character by character;
//! tags run through a per-character state machine so attribute quoting and
//! entity decoding behave the same way everywhere.

use std::collections::VecDeque;

use strum_macros::Display;

use super::token::{
    CommentToken, LexError, RawAttribute, Span, TagToken, TextToken, Token, TokenSource,
};

/// Behavior knobs for the lexer.
///
/// The defaults are the configuration the tree builder is specified
/// against; the other settings exist for callers that want raw-er output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct LexerOptions {
    /// Decode named and numeric character references in text and attribute
    /// values.
    pub decode_entities: bool,
    /// When `decode_entities` is off, still decode the markup-significant
    /// mini set (`amp`, `lt`, `gt`, `quot`, `nbsp`).
    pub decode_mini_entities: bool,
    /// Report only the body of comments, CDATA sections, and scripts.
    /// When off, the token text is the full raw form, delimiters included.
    pub extract_between_tags_only: bool,
    /// Compress the whitespace run at the end of a text chunk terminated
    /// by a tag down to a single space.
    pub compress_whitespace_before_tag: bool,
    /// Compatibility mode: a self-closed tag that carries attributes is
    /// reported as a plain open tag. Must stay off for the tree builder's
    /// self-closing-vs-open distinction to hold.
    pub closed_tags_with_attributes_are_open: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            decode_entities: true,
            decode_mini_entities: true,
            extract_between_tags_only: true,
            compress_whitespace_before_tag: true,
            closed_tags_with_attributes_are_open: false,
        }
    }
}

/// States of the tag machine.
///
/// Text, comments, CDATA, scripts, and raw declarations are handled in
/// bulk from the `Data` state; the remaining states walk the inside of a
/// tag one character at a time.
#[derive(Debug, PartialEq, Eq, Display)]
pub enum LexerState {
    /// Between tags, accumulating text.
    Data,
    /// After `</`, deciding whether a real end tag follows.
    EndTagOpen,
    /// Reading a tag name.
    TagName,
    /// Between attributes, before a name has started.
    BeforeAttributeName,
    /// Reading an attribute name.
    AttributeName,
    /// After an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// After `=`, before the value has started.
    BeforeAttributeValue,
    /// Inside a double-quoted attribute value.
    AttributeValueDoubleQuoted,
    /// Inside a single-quoted attribute value.
    AttributeValueSingleQuoted,
    /// Inside an unquoted attribute value.
    AttributeValueUnquoted,
    /// After the `/` of a self-closing tag.
    SelfClosingStartTag,
}

/// Streaming HTML lexer over a borrowed input string.
pub struct Lexer<'a> {
    pub(super) input: &'a str,
    pub(super) current_pos: usize,
    pub(super) state: LexerState,
    pub(super) reconsume: bool,
    pub(super) current_input_character: Option<char>,
    pub(super) options: LexerOptions,
    pub(super) pending: VecDeque<Token>,
    pub(super) text_buffer: String,
    pub(super) text_start: usize,
    at_eof: bool,

    // Tag under assembly.
    tag_start: usize,
    tag_name: String,
    attributes: Vec<RawAttribute>,
    current_attr_name: String,
    current_attr_value: String,
    is_end_tag: bool,
    self_closing: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer with the default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, LexerOptions::default())
    }

    /// Create a lexer with explicit options.
    #[must_use]
    pub fn with_options(input: &'a str, options: LexerOptions) -> Self {
        Self {
            input,
            current_pos: 0,
            state: LexerState::Data,
            reconsume: false,
            current_input_character: None,
            options,
            pending: VecDeque::new(),
            text_buffer: String::new(),
            text_start: 0,
            at_eof: false,
            tag_start: 0,
            tag_name: String::new(),
            attributes: Vec::new(),
            current_attr_name: String::new(),
            current_attr_value: String::new(),
            is_end_tag: false,
            self_closing: false,
        }
    }

    /// Produce the next token, or `None` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Present to satisfy the token source contract; this lexer is total
    /// over its input and never returns one.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            if self.at_eof {
                return Ok(None);
            }
            self.step();
        }
    }

    /// Run one step of the machine: consume (or reconsume) a character and
    /// dispatch on the current state.
    fn step(&mut self) {
        if self.reconsume {
            self.reconsume = false;
        } else {
            self.current_input_character = self.consume();
        }
        match self.state {
            LexerState::Data => self.handle_data_state(),
            LexerState::EndTagOpen => self.handle_end_tag_open_state(),
            LexerState::TagName => self.handle_tag_name_state(),
            LexerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            LexerState::AttributeName => self.handle_attribute_name_state(),
            LexerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            LexerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            LexerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"');
            }
            LexerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'');
            }
            LexerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            LexerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
        }
    }

    fn handle_data_state(&mut self) {
        match self.current_input_character {
            None => {
                self.flush_text_at_eof();
                self.at_eof = true;
            }
            Some('<') => {
                // Position of the `<` itself.
                let tag_start = self.current_pos - 1;
                if self.next_few_characters_are("!--") {
                    self.flush_text_before_tag(tag_start);
                    self.consume_string("!--");
                    self.lex_comment(tag_start, "!--", "-->");
                } else if self.next_few_characters_are("![CDATA[") {
                    self.flush_text_before_tag(tag_start);
                    self.consume_string("![CDATA[");
                    self.lex_comment(tag_start, "![CDATA[", "]]>");
                } else if self.peek_codepoint(0) == Some('!') {
                    // Doctypes, conditional blocks, short comments: emitted
                    // as an empty-named tag for the builder to classify.
                    self.flush_text_before_tag(tag_start);
                    self.lex_raw_declaration(tag_start, ">");
                } else if self.peek_codepoint(0) == Some('%') {
                    self.flush_text_before_tag(tag_start);
                    self.lex_raw_declaration(tag_start, "%>");
                } else if self.peek_codepoint(0) == Some('/') {
                    self.flush_text_before_tag(tag_start);
                    let _ = self.consume();
                    self.start_tag(tag_start, true);
                    self.switch_to(LexerState::EndTagOpen);
                } else if matches!(self.peek_codepoint(0), Some(c) if c.is_ascii_alphabetic() || c == '?')
                {
                    self.flush_text_before_tag(tag_start);
                    self.start_tag(tag_start, false);
                    self.switch_to(LexerState::TagName);
                } else {
                    // No tag can start here; the `<` is literal text.
                    self.append_text('<', tag_start);
                }
            }
            Some('&') if self.decoding_enabled() => {
                let start = self.current_pos - 1;
                let decoded = self.consume_character_reference();
                self.append_text_str(&decoded, start);
            }
            Some(c) => {
                let start = self.current_pos - c.len_utf8();
                self.append_text(c, start);
            }
        }
    }

    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.reconsume_in(LexerState::TagName);
            }
            // `</>`: dropped entirely.
            Some('>') => {
                self.log_malformed_tag();
                self.switch_to(LexerState::Data);
            }
            None => {
                // A trailing `</` is literal text.
                let start = self.tag_start;
                self.append_text_str("</", start);
                self.flush_text_at_eof();
                self.at_eof = true;
            }
            Some(_) => {
                // `</` followed by junk: consume the bogus form and let the
                // builder classify or discard it.
                self.log_malformed_tag();
                self.lex_raw_declaration(self.tag_start, ">");
                self.switch_to(LexerState::Data);
            }
        }
    }

    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(LexerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(LexerState::SelfClosingStartTag),
            Some('>') => self.finish_tag(),
            Some('<') => self.abort_malformed_tag(),
            None => self.abort_tag_at_eof(),
            Some(c) if c.is_ascii_uppercase() => self.tag_name.push(c.to_ascii_lowercase()),
            Some(c) => self.tag_name.push(c),
        }
    }

    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(LexerState::SelfClosingStartTag),
            Some('>') => self.finish_tag(),
            Some('<') => self.abort_malformed_tag(),
            None => self.abort_tag_at_eof(),
            Some(_) => {
                self.commit_attribute();
                self.reconsume_in(LexerState::AttributeName);
            }
        }
    }

    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if c == '/' || Self::is_whitespace_char(c) => {
                self.reconsume_in(LexerState::AfterAttributeName);
            }
            Some('=') => self.switch_to(LexerState::BeforeAttributeValue),
            Some('>') => self.finish_tag(),
            Some('<') => self.abort_malformed_tag(),
            None => self.abort_tag_at_eof(),
            Some(c) if c.is_ascii_uppercase() => {
                self.current_attr_name.push(c.to_ascii_lowercase());
            }
            Some(c) => self.current_attr_name.push(c),
        }
    }

    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(LexerState::SelfClosingStartTag),
            Some('=') => self.switch_to(LexerState::BeforeAttributeValue),
            Some('>') => self.finish_tag(),
            Some('<') => self.abort_malformed_tag(),
            None => self.abort_tag_at_eof(),
            Some(_) => {
                // A bare attribute (no value) followed by another name.
                self.commit_attribute();
                self.reconsume_in(LexerState::AttributeName);
            }
        }
    }

    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => self.switch_to(LexerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(LexerState::AttributeValueSingleQuoted),
            Some('>') => self.finish_tag(),
            Some('<') => self.abort_malformed_tag(),
            None => self.abort_tag_at_eof(),
            Some(_) => self.reconsume_in(LexerState::AttributeValueUnquoted),
        }
    }

    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => {
                self.commit_attribute();
                self.switch_to(LexerState::BeforeAttributeName);
            }
            Some('&') if self.decoding_enabled() => {
                let decoded = self.consume_character_reference();
                self.current_attr_value.push_str(&decoded);
            }
            None => self.abort_tag_at_eof(),
            Some(c) => self.current_attr_value.push(c),
        }
    }

    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.commit_attribute();
                self.switch_to(LexerState::BeforeAttributeName);
            }
            // `src=x/>`: the slash closes the tag; `src=a/b` keeps it.
            Some('/') if self.peek_codepoint(0) == Some('>') => {
                self.commit_attribute();
                self.switch_to(LexerState::SelfClosingStartTag);
            }
            Some('>') => self.finish_tag(),
            Some('&') if self.decoding_enabled() => {
                let decoded = self.consume_character_reference();
                self.current_attr_value.push_str(&decoded);
            }
            Some('<') => self.abort_malformed_tag(),
            None => self.abort_tag_at_eof(),
            Some(c) => self.current_attr_value.push(c),
        }
    }

    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.self_closing = true;
                self.finish_tag();
            }
            Some('<') => self.abort_malformed_tag(),
            None => self.abort_tag_at_eof(),
            Some(_) => self.reconsume_in(LexerState::BeforeAttributeName),
        }
    }
}

// =============================================================================
// Tag Assembly
// =============================================================================

impl Lexer<'_> {
    /// Begin assembling a tag whose `<` sits at byte `start`.
    fn start_tag(&mut self, start: usize, is_end_tag: bool) {
        self.tag_start = start;
        self.tag_name.clear();
        self.attributes.clear();
        self.current_attr_name.clear();
        self.current_attr_value.clear();
        self.is_end_tag = is_end_tag;
        self.self_closing = false;
    }

    /// Push the attribute under assembly onto the tag, if one has started.
    fn commit_attribute(&mut self) {
        if self.current_attr_name.is_empty() {
            self.current_attr_value.clear();
            return;
        }
        let name = std::mem::take(&mut self.current_attr_name);
        let value = std::mem::take(&mut self.current_attr_value);
        self.attributes.push(RawAttribute::new(name, value));
    }

    /// Close out the tag under assembly and emit it.
    fn finish_tag(&mut self) {
        self.commit_attribute();
        let span = self.span_from(self.tag_start);
        let raw_name = std::mem::take(&mut self.tag_name);
        let attributes = std::mem::take(&mut self.attributes);
        self.switch_to(LexerState::Data);

        if !self.is_end_tag && !self.self_closing && raw_name == "script" {
            self.lex_script(self.tag_start);
            return;
        }

        if self.is_end_tag {
            // Anything lexed after an end tag's name is discarded.
            self.emit(Token::CloseTag(TagToken {
                raw_name,
                attributes: Vec::new(),
                self_closing: false,
                span,
            }));
        } else if self.self_closing {
            if self.options.closed_tags_with_attributes_are_open && !attributes.is_empty() {
                self.emit(Token::OpenTag(TagToken {
                    raw_name,
                    attributes,
                    self_closing: false,
                    span,
                }));
            } else {
                self.emit(Token::CloseTag(TagToken {
                    raw_name,
                    attributes,
                    self_closing: true,
                    span,
                }));
            }
        } else {
            self.emit(Token::OpenTag(TagToken {
                raw_name,
                attributes,
                self_closing: false,
                span,
            }));
        }
    }

    /// A `<` inside an unquoted tag body aborts the tag: the consumed span
    /// becomes an empty-named tag for the builder to classify or discard,
    /// and the `<` is re-lexed as a fresh tag start.
    fn abort_malformed_tag(&mut self) {
        self.log_malformed_tag();
        let span = Span {
            offset: self.tag_start,
            len: (self.current_pos - 1) - self.tag_start,
        };
        self.emit(Token::OpenTag(TagToken {
            raw_name: String::new(),
            attributes: Vec::new(),
            self_closing: false,
            span,
        }));
        self.reconsume_in(LexerState::Data);
    }

    /// Input ended inside a tag. The consumed span degrades to an
    /// empty-named tag, which the builder discards unless it classifies.
    fn abort_tag_at_eof(&mut self) {
        self.log_malformed_tag();
        let span = self.span_from(self.tag_start);
        self.emit(Token::OpenTag(TagToken {
            raw_name: String::new(),
            attributes: Vec::new(),
            self_closing: false,
            span,
        }));
        self.switch_to(LexerState::Data);
        self.at_eof = true;
    }
}

// =============================================================================
// Bulk Extraction
// =============================================================================

impl Lexer<'_> {
    /// Extract a comment or CDATA section whose opening marker has just
    /// been consumed. An unterminated form runs to the end of input.
    fn lex_comment(&mut self, start: usize, marker: &str, terminator: &str) {
        let body_start = self.current_pos;
        let body_end = match self.input[body_start..].find(terminator) {
            Some(found) => {
                self.current_pos = body_start + found + terminator.len();
                body_start + found
            }
            None => {
                self.current_pos = self.input.len();
                self.input.len()
            }
        };
        let span = self.span_from(start);
        let text = if self.options.extract_between_tags_only {
            self.input[body_start..body_end].to_string()
        } else {
            span.snippet(self.input)
        };
        self.emit(Token::Comment(CommentToken {
            marker: marker.to_string(),
            text,
            span,
        }));
    }

    /// Consume a raw `<!...>` or `<%...%>` form through `terminator` and
    /// emit it as an empty-named open tag covering the raw span.
    fn lex_raw_declaration(&mut self, start: usize, terminator: &str) {
        match self.input[self.current_pos..].find(terminator) {
            Some(found) => self.current_pos += found + terminator.len(),
            None => self.current_pos = self.input.len(),
        }
        let span = self.span_from(start);
        self.emit(Token::OpenTag(TagToken {
            raw_name: String::new(),
            attributes: Vec::new(),
            self_closing: false,
            span,
        }));
    }

    /// Extract a script body after its open tag has been consumed.
    ///
    /// The close match is case-insensitive; an unterminated script runs to
    /// the end of input. Attributes on the open tag are discarded.
    fn lex_script(&mut self, start: usize) {
        let body_start = self.current_pos;
        let lowered = self.input[body_start..].to_ascii_lowercase();
        let body_end = match lowered.find("</script") {
            Some(found) => {
                let close_start = body_start + found;
                let after = match self.input[close_start..].find('>') {
                    Some(gt) => close_start + gt + 1,
                    None => self.input.len(),
                };
                self.current_pos = after;
                close_start
            }
            None => {
                self.current_pos = self.input.len();
                self.input.len()
            }
        };
        let span = self.span_from(start);
        let text = if self.options.extract_between_tags_only {
            self.input[body_start..body_end].to_string()
        } else {
            span.snippet(self.input)
        };
        self.emit(Token::Script(TextToken { text, span }));
    }
}

// =============================================================================
// Text Accumulation
// =============================================================================

impl Lexer<'_> {
    /// Push one character of text, recording where the chunk began.
    fn append_text(&mut self, c: char, start: usize) {
        if self.text_buffer.is_empty() {
            self.text_start = start;
        }
        self.text_buffer.push(c);
    }

    /// Push a decoded string of text, recording where the chunk began.
    fn append_text_str(&mut self, s: &str, start: usize) {
        if self.text_buffer.is_empty() {
            self.text_start = start;
        }
        self.text_buffer.push_str(s);
    }

    /// Whether any character-reference decoding is in effect.
    const fn decoding_enabled(&self) -> bool {
        self.options.decode_entities || self.options.decode_mini_entities
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        Lexer::next_token(self)
    }
}
