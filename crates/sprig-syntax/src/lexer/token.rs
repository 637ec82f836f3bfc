use core::fmt;

use serde::Serialize;
use sprig_common::Span;

/// A unit of lexer output.
///
/// Tokens are ordered and carry no references to each other; the tree
/// builder relates them purely by position in the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Token {
    /// `<name>`, emitted on the `>` that ends an opening tag.
    TagOpen {
        /// Everything between `<` and `>`, verbatim.
        name: String,
        /// From `<` through `>`.
        span: Span,
    },

    /// `</name>`, emitted on the `>` that ends a closing tag.
    TagClose {
        /// Everything between `</` and `>`, verbatim.
        name: String,
        /// From `<` through `>`.
        span: Span,
    },

    /// A run of character data, ended by `<` or end of input.
    Text {
        /// The characters of the run. Never empty.
        content: String,
        /// Exactly the run.
        span: Span,
    },
}

impl Token {
    /// Create a tag-open token.
    #[must_use]
    pub fn tag_open(name: impl Into<String>, span: impl Into<Span>) -> Self {
        Self::TagOpen {
            name: name.into(),
            span: span.into(),
        }
    }

    /// Create a tag-close token.
    #[must_use]
    pub fn tag_close(name: impl Into<String>, span: impl Into<Span>) -> Self {
        Self::TagClose {
            name: name.into(),
            span: span.into(),
        }
    }

    /// Create a text token.
    #[must_use]
    pub fn text(content: impl Into<String>, span: impl Into<Span>) -> Self {
        Self::Text {
            content: content.into(),
            span: span.into(),
        }
    }

    /// Source span of the token.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::TagOpen { span, .. } | Self::TagClose { span, .. } | Self::Text { span, .. } => {
                *span
            }
        }
    }

    /// Short name of the token kind, for listings.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::TagOpen { .. } => "tag-open",
            Self::TagClose { .. } => "tag-close",
            Self::Text { .. } => "text",
        }
    }
}

/// Renders the token back in template syntax. Concatenating the rendering
/// of every token reproduces the input exactly.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TagOpen { name, .. } => write!(f, "<{name}>"),
            Self::TagClose { name, .. } => write!(f, "</{name}>"),
            Self::Text { content, .. } => f.write_str(content),
        }
    }
}
