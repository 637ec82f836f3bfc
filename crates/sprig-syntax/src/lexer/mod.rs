//! Template lexer module.
//!
//! Turns raw template text into a flat stream of tag-open, tag-close and
//! text tokens. Nesting is not tracked here; see [`crate::parser`].

/// Lexer state machine implementation.
pub mod core;
/// Helper methods for lexer state transitions and token emission.
pub mod helpers;
/// Token types produced by the lexer.
pub mod token;

pub use self::core::{Lexer, LexerState};
pub use token::Token;

use crate::error::LexError;

/// Tokenize a template string.
///
/// # Errors
///
/// Returns [`LexError::UnterminatedTag`] if the input ends inside a tag.
pub fn tokenize(template: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(template);
    lexer.run()?;
    Ok(lexer.into_tokens())
}
