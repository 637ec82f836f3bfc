use strum_macros::{Display, EnumIter};

use super::token::Token;
use crate::error::LexError;

/// The lexer state machine.
///
/// Character classes are literal: `<`, `/`, `>` and everything else. A
/// class a state gives no special meaning to is handled as "everything else".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum LexerState {
    /// Between tokens. The start state.
    Initial,
    /// Just consumed `<`.
    TagOpen,
    /// Inside the name of an opening tag.
    TagName,
    /// Inside a run of character data.
    Text,
    /// Just consumed `</`.
    TagEnd,
    /// Inside the name of a closing tag.
    TagEndName,
}

impl LexerState {
    /// True for the states in which end of input means an unterminated tag.
    #[must_use]
    pub const fn is_inside_tag(self) -> bool {
        matches!(
            self,
            Self::TagOpen | Self::TagName | Self::TagEnd | Self::TagEndName
        )
    }
}

/// Scans one template left to right, one character at a time, with no
/// lookahead and no backtracking.
///
/// ```ignore
/// let mut lexer = Lexer::new("<p>hi</p>");
/// lexer.run()?;
/// let tokens = lexer.into_tokens();
/// ```
pub struct Lexer<'src> {
    pub(super) state: LexerState,
    pub(super) input: &'src str,
    /// Byte offset of the next character to consume.
    pub(super) current_pos: usize,
    /// Byte offset of the character being handled.
    pub(super) current_char_pos: usize,
    /// Characters of the tag name or text run collected so far.
    pub(super) buffer: String,
    /// Byte offset where the pending token began (its `<` or first text char).
    pub(super) token_start: usize,
    pub(super) token_stream: Vec<Token>,
}

impl<'src> Lexer<'src> {
    /// Create a lexer for the given input, in the initial state.
    #[must_use]
    pub const fn new(input: &'src str) -> Self {
        Self {
            state: LexerState::Initial,
            input,
            current_pos: 0,
            current_char_pos: 0,
            buffer: String::new(),
            token_start: 0,
            token_stream: Vec::new(),
        }
    }

    /// The state the machine is currently in.
    #[must_use]
    pub const fn state(&self) -> LexerState {
        self.state
    }

    /// Consume the lexer and return the token stream.
    /// Call this after [`Lexer::run`] to get the tokens for the tree builder.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Drive the state machine until the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::UnterminatedTag`] if the input ends while inside a
    /// tag. The span runs from the tag's `<` to the end of input.
    pub fn run(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.consume() {
            match self.state {
                LexerState::Initial => self.handle_initial_state(c),
                LexerState::TagOpen => self.handle_tag_open_state(c),
                LexerState::TagName => self.handle_tag_name_state(c),
                LexerState::Text => self.handle_text_state(c),
                LexerState::TagEnd => self.handle_tag_end_state(c),
                LexerState::TagEndName => self.handle_tag_end_name_state(c),
            }
        }
        self.handle_end_of_input()
    }

    fn handle_initial_state(&mut self, c: char) {
        self.mark_token_start();
        match c {
            '<' => self.switch_to(LexerState::TagOpen),
            c => {
                self.buffer.push(c);
                self.switch_to(LexerState::Text);
            }
        }
    }

    fn handle_tag_open_state(&mut self, c: char) {
        match c {
            '/' => self.switch_to(LexerState::TagEnd),
            c => {
                self.buffer.push(c);
                self.switch_to(LexerState::TagName);
            }
        }
    }

    fn handle_tag_name_state(&mut self, c: char) {
        match c {
            '>' => {
                self.emit_tag_open();
                self.switch_to(LexerState::Initial);
            }
            c => self.buffer.push(c),
        }
    }

    fn handle_text_state(&mut self, c: char) {
        match c {
            '<' => {
                self.emit_text(self.current_char_pos);
                self.mark_token_start();
                self.switch_to(LexerState::TagOpen);
            }
            c => self.buffer.push(c),
        }
    }

    // Single-character transit: whatever follows `</` starts the name.
    fn handle_tag_end_state(&mut self, c: char) {
        self.buffer.push(c);
        self.switch_to(LexerState::TagEndName);
    }

    fn handle_tag_end_name_state(&mut self, c: char) {
        match c {
            '>' => {
                self.emit_tag_close();
                self.switch_to(LexerState::Initial);
            }
            c => self.buffer.push(c),
        }
    }

    fn handle_end_of_input(&mut self) -> Result<(), LexError> {
        match self.state {
            LexerState::Initial => Ok(()),
            LexerState::Text => {
                self.emit_text(self.current_pos);
                self.switch_to(LexerState::Initial);
                Ok(())
            }
            state => Err(LexError::UnterminatedTag {
                state,
                span: self.pending_span(self.current_pos),
            }),
        }
    }
}
