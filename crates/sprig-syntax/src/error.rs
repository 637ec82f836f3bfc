//! Errors produced by the lexer and the tree builder.
//!
//! Every error is terminal for the call that produced it: no partial tree is
//! returned alongside it.

use sprig_common::Span;
use thiserror::Error;

use crate::lexer::LexerState;

/// Failure to tokenize a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// Input ended while still inside a tag (`<div`, `</`, ...).
    #[error("unterminated tag: input ended in the {state} state")]
    UnterminatedTag {
        /// The tag state the lexer halted in.
        state: LexerState,
        /// From the tag's `<` to the end of input.
        span: Span,
    },
}

impl LexError {
    /// Where in the source the error points.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnterminatedTag { span, .. } => *span,
        }
    }
}

/// Failure to build a tree from a template or token stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The template could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Elements were still open at the end of input.
    #[error("{}", describe_unclosed(.tags))]
    UnclosedElement {
        /// Names of the unclosed elements, innermost first.
        tags: Vec<String>,
        /// The opening tag of the innermost unclosed element.
        span: Span,
    },

    /// A closing tag arrived with no element open.
    #[error("unexpected closing tag </{tag}> with no open element")]
    UnexpectedCloseTag {
        /// Name on the closing tag.
        tag: String,
        /// The closing tag.
        span: Span,
    },

    /// A closing tag did not match the innermost open element (strict mode).
    #[error("closing tag </{found}> does not match open element <{expected}>")]
    MismatchedTag {
        /// Name of the innermost open element.
        expected: String,
        /// Name on the closing tag.
        found: String,
        /// The closing tag.
        span: Span,
    },
}

impl ParseError {
    /// Where in the source the error points.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(err) => err.span(),
            Self::UnclosedElement { span, .. }
            | Self::UnexpectedCloseTag { span, .. }
            | Self::MismatchedTag { span, .. } => *span,
        }
    }
}

fn describe_unclosed(tags: &[String]) -> String {
    let list = tags
        .iter()
        .map(|tag| format!("<{tag}>"))
        .collect::<Vec<_>>()
        .join(", ");
    if tags.len() == 1 {
        format!("unclosed element {list}")
    } else {
        format!("unclosed elements {list}")
    }
}
