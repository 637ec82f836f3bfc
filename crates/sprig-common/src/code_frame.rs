//! Code frames: a few lines of source around a span, with carets under it.
//!
//! ```text
//! 1 | <div>
//! 2 |   <span>hi</div>
//!   |           ^^^^^^
//! 3 | </span>
//! ```

use core::fmt;
use std::borrow::Cow;

use crate::span::{LineIndex, Span};

/// Default number of unmarked lines shown above and below the span.
const DEFAULT_CONTEXT_LINES: usize = 2;

/// A renderable excerpt of a source text pointing at `span`.
#[derive(Debug, Clone)]
pub struct CodeFrame<'i, 'src> {
    index: Cow<'i, LineIndex<'src>>,
    span: Span,
    context_lines: usize,
}

impl<'src> CodeFrame<'src, 'src> {
    /// Create a frame for `span`, indexing `source` on the spot.
    #[must_use]
    pub fn new(source: &'src str, span: Span) -> Self {
        Self {
            index: Cow::Owned(LineIndex::new(source)),
            span,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

impl<'i, 'src> CodeFrame<'i, 'src> {
    /// Create a frame for `span` over an existing line index.
    #[must_use]
    pub const fn with_index(index: &'i LineIndex<'src>, span: Span) -> Self {
        Self {
            index: Cow::Borrowed(index),
            span,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }

    /// Show `lines` lines of context above and below the span.
    #[must_use]
    pub const fn with_context_lines(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }

    /// Render the frame to a string.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CodeFrame<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = &*self.index;
        let start = index.line_col(self.span.start);
        // Resolve the last covered character, not the position after it, so a
        // span ending on a newline does not mark the following line.
        let last = if self.span.is_empty() {
            start
        } else {
            index.line_col(self.span.end - 1)
        };

        let first_line = start.line.saturating_sub(self.context_lines).max(1);
        let last_line = (last.line + self.context_lines).min(index.line_count());
        let width = last_line.to_string().len();

        for line in first_line..=last_line {
            let text = index.line_text(line);
            if text.is_empty() {
                writeln!(f, "{line:>width$} |")?;
            } else {
                writeln!(f, "{line:>width$} | {text}")?;
            }

            if line < start.line || line > last.line {
                continue;
            }
            let from = if line == start.line { start.column } else { 1 };
            let to = if line == last.line {
                last.column + 1
            } else {
                text.chars().count() + 1
            };
            let carets = to.saturating_sub(from).max(1);
            // Tabs are kept so the carets line up under tab-indented text.
            let mut padding: String = text
                .chars()
                .take(from - 1)
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            padding.push_str(&" ".repeat((from - 1).saturating_sub(padding.len())));
            writeln!(f, "{:>width$} | {padding}{}", "", "^".repeat(carets))?;
        }
        Ok(())
    }
}
