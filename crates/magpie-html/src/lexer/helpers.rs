//! Helper functions for the HTML lexer.
//!
//! This module contains utility functions used throughout the lexer:
//! - State transitions ("switch to", "reconsume in")
//! - Input handling (consume, peek, lookahead matching)
//! - Text buffering and token emission
//! - Character reference decoding

use std::mem;

use magpie_common::warning::warn_once;

use super::core::{Lexer, LexerState};
use super::entities::{lookup_entity, lookup_mini_entity};
use super::token::{Span, TextToken, Token};

/// Longest entity name considered after `&`. The longest name in the full
/// HTML table is 32 characters.
const MAX_ENTITY_NAME_LEN: usize = 32;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Lexer<'_> {
    /// Transition to a new state. The next character will be consumed on the
    /// next step of the machine.
    pub(super) const fn switch_to(&mut self, new_state: LexerState) {
        self.state = new_state;
    }

    /// Transition to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: LexerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input Helpers
// =============================================================================

impl Lexer<'_> {
    /// Consume the next input character, advancing the position.
    /// Returns None at the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        if let Some(c) = self.input[self.current_pos..].chars().next() {
            self.current_pos += c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    /// Peek at the codepoint `offset` characters past the current position
    /// without consuming it.
    #[must_use]
    pub(super) fn peek_codepoint(&self, offset: usize) -> Option<char> {
        let slice = &self.input[self.current_pos..];
        slice.chars().nth(offset)
    }

    /// Check if the next few characters match the target string exactly.
    #[must_use]
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// Check if the next few characters match the target string using
    /// ASCII case-insensitive comparison.
    #[must_use]
    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        for (i, target_char) in target.chars().enumerate() {
            match self.peek_codepoint(i) {
                Some(input_char) => {
                    if !input_char.eq_ignore_ascii_case(&target_char) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        // Advance by the number of bytes in the target string.
        // This is safe for ASCII targets like "--", "[CDATA[", "/script".
        self.current_pos += target.len();
    }

    /// Whitespace as the tag machine sees it: space, tab, LF, CR, FF.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\r' | '\x0C')
    }
}

// =============================================================================
// Text Buffering and Token Emission Helpers
// =============================================================================

impl Lexer<'_> {
    /// Queue a token for the caller to pull.
    pub(super) fn emit(&mut self, token: Token) {
        self.pending.push_back(token);
    }

    /// The span from byte `start` to the current position.
    pub(super) const fn span_from(&self, start: usize) -> Span {
        Span {
            offset: start,
            len: self.current_pos - start,
        }
    }

    /// Flush buffered text as a token ending at byte `end`, the position of
    /// the `<` that opens the next tag. A run of whitespace at the end of
    /// the buffer compresses to a single space when the option is on.
    pub(super) fn flush_text_before_tag(&mut self, end: usize) {
        if self.text_buffer.is_empty() {
            return;
        }
        let mut text = mem::take(&mut self.text_buffer);
        if self.options.compress_whitespace_before_tag {
            let kept = text.trim_end_matches(Self::is_whitespace_char).len();
            if kept < text.len() {
                text.truncate(kept);
                text.push(' ');
            }
        }
        let span = Span {
            offset: self.text_start,
            len: end - self.text_start,
        };
        self.emit(Token::Text(TextToken { text, span }));
    }

    /// Flush buffered text verbatim at the end of input. Trailing whitespace
    /// is kept: compression only applies before a tag.
    pub(super) fn flush_text_at_eof(&mut self) {
        if self.text_buffer.is_empty() {
            return;
        }
        let text = mem::take(&mut self.text_buffer);
        let span = Span {
            offset: self.text_start,
            len: self.input.len() - self.text_start,
        };
        self.emit(Token::Text(TextToken { text, span }));
    }
}

// =============================================================================
// Character Reference Helpers
// =============================================================================

impl Lexer<'_> {
    /// Decode a character reference after a consumed `&`.
    ///
    /// Takes the longest alphanumeric run after the ampersand and tries it
    /// with its trailing semicolon first, then as a legacy bare name.
    /// Numeric references (`&#64;`, `&#x41;`) decode only when full entity
    /// decoding is on. Anything unrecognized leaves the `&` literal and
    /// consumes nothing past it.
    pub(super) fn consume_character_reference(&mut self) -> String {
        if self.peek_codepoint(0) == Some('#') {
            if self.options.decode_entities {
                if let Some(decoded) = self.consume_numeric_reference() {
                    return decoded;
                }
            }
            return String::from("&");
        }
        let name: String = self.input[self.current_pos..]
            .chars()
            .take(MAX_ENTITY_NAME_LEN)
            .take_while(char::is_ascii_alphanumeric)
            .collect();
        if name.is_empty() {
            return String::from("&");
        }
        let lookup: fn(&str) -> Option<&'static str> = if self.options.decode_entities {
            lookup_entity
        } else {
            lookup_mini_entity
        };
        if self.input[self.current_pos + name.len()..].starts_with(';') {
            let with_semicolon = format!("{name};");
            if let Some(replacement) = lookup(&with_semicolon) {
                self.consume_string(&with_semicolon);
                return replacement.to_string();
            }
        }
        if let Some(replacement) = lookup(&name) {
            self.consume_string(&name);
            return replacement.to_string();
        }
        String::from("&")
    }

    /// Decode `&#NN;` or `&#xHH;`. Returns None when no digits follow the
    /// marker, in which case nothing is consumed.
    fn consume_numeric_reference(&mut self) -> Option<String> {
        let after_hash = &self.input[self.current_pos + 1..];
        let (radix, prefix_len) = match after_hash.chars().next() {
            Some('x' | 'X') => (16, 2),
            _ => (10, 1),
        };
        let digits: String = self.input[self.current_pos + prefix_len..]
            .chars()
            .take_while(|c| c.is_digit(radix))
            .collect();
        if digits.is_empty() {
            return None;
        }
        let mut consumed = prefix_len + digits.len();
        if self.input[self.current_pos + consumed..].starts_with(';') {
            consumed += 1;
        }
        // Out-of-range and surrogate codepoints decode to U+FFFD.
        let replacement = u32::from_str_radix(&digits, radix)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or('\u{FFFD}');
        self.current_pos += consumed;
        Some(replacement.to_string())
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl Lexer<'_> {
    /// Report a malformed tag through the shared warning system. Malformed
    /// tags are not fatal: the machine degrades them to literal text or to
    /// an empty-named tag for the tree builder to classify.
    pub(super) fn log_malformed_tag(&self) {
        let pos = self.current_pos;
        let state = &self.state;
        warn_once(
            "HTML Lexer",
            &format!("malformed tag near byte {pos} (in {state} state)"),
        );
    }
}
