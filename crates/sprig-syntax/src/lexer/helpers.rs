//! Helper functions for the lexer.
//!
//! - State transitions
//! - Input handling (the byte cursor)
//! - Token emission (flushing the buffer)

use sprig_common::Span;

use super::core::{Lexer, LexerState};
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Lexer<'_> {
    /// Transitions to a new state. The next character is handled by the new
    /// state on the next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: LexerState) {
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl Lexer<'_> {
    /// Returns the character at the cursor and advances past it.
    /// Returns None once the input is exhausted.
    ///
    /// The cursor is a byte offset, so each call is O(1) regardless of how
    /// much input remains.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_char_pos = self.current_pos;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Record the character being handled as the first of a new token.
    pub(super) const fn mark_token_start(&mut self) {
        self.token_start = self.current_char_pos;
    }

    /// Span from the start of the pending token to `end`.
    pub(super) const fn pending_span(&self, end: usize) -> Span {
        Span::new(self.token_start, end)
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl Lexer<'_> {
    /// Emit `TagOpen` with the buffered name. Called on the closing `>`.
    pub(super) fn emit_tag_open(&mut self) {
        let token = Token::TagOpen {
            name: std::mem::take(&mut self.buffer),
            span: self.pending_span(self.current_pos),
        };
        self.token_stream.push(token);
    }

    /// Emit `TagClose` with the buffered name. Called on the closing `>`.
    pub(super) fn emit_tag_close(&mut self) {
        let token = Token::TagClose {
            name: std::mem::take(&mut self.buffer),
            span: self.pending_span(self.current_pos),
        };
        self.token_stream.push(token);
    }

    /// Emit `Text` with the buffered characters, ending at byte `end`
    /// (the `<` that ended the run, or the end of input).
    pub(super) fn emit_text(&mut self, end: usize) {
        let token = Token::Text {
            content: std::mem::take(&mut self.buffer),
            span: self.pending_span(end),
        };
        self.token_stream.push(token);
    }
}
