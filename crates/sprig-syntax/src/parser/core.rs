use sprig_common::Span;
use strum_macros::Display;

use crate::ast::{Element, Node, Root, Text};
use crate::error::ParseError;
use crate::lexer::Token;

/// How a closing tag is checked against the element it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum TagMatching {
    /// A closing tag must name the innermost open element, otherwise
    /// [`ParseError::MismatchedTag`].
    #[default]
    Strict,
    /// A closing tag closes the innermost open element whatever it names.
    /// Each mismatch is recorded as a [`ParseIssue`].
    Lenient,
}

/// Options controlling tree construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Closing tag policy. Strict by default.
    pub tag_matching: TagMatching,
}

impl ParseOptions {
    /// Options with lenient tag matching.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            tag_matching: TagMatching::Lenient,
        }
    }

    /// Set the closing tag policy.
    #[must_use]
    pub const fn with_tag_matching(mut self, tag_matching: TagMatching) -> Self {
        self.tag_matching = tag_matching;
        self
    }
}

/// A non-fatal issue noticed while building the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human-readable description.
    pub message: String,
    /// Index into the token stream where this issue was encountered.
    pub token_index: usize,
    /// The offending token.
    pub span: Span,
}

/// An element whose closing tag has not been seen yet.
#[derive(Debug)]
struct OpenElement {
    tag: String,
    open_span: Span,
    children: Vec<Node>,
}

/// Builds a [`Root`] from a token stream.
///
/// Maintains the stack of open elements. The root is its permanent bottom
/// entry: it is held in `root_children` rather than in the vector, so the
/// stack can never be popped past it and its depth is
/// `stack_of_open_elements.len() + 1`.
///
/// Each open element owns the children collected so far. Closing it moves
/// the finished [`Element`] into its parent, so the result never needs
/// back-references.
pub struct TreeBuilder<'t> {
    /// Input tokens from the lexer.
    tokens: &'t [Token],

    /// Current position in the token stream.
    token_index: usize,

    options: ParseOptions,

    /// Children of the root.
    root_children: Vec<Node>,

    /// Open elements above the root, innermost last.
    stack_of_open_elements: Vec<OpenElement>,

    /// Issues encountered so far (lenient mode only).
    issues: Vec<ParseIssue>,
}

impl<'t> TreeBuilder<'t> {
    /// Create a tree builder over a token stream, with default options.
    #[must_use]
    pub const fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            token_index: 0,
            options: ParseOptions {
                tag_matching: TagMatching::Strict,
            },
            root_children: Vec::new(),
            stack_of_open_elements: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Use the given options.
    #[must_use]
    pub const fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable lenient mode - closing tags are not checked against the
    /// element they close.
    #[must_use]
    pub const fn with_lenient_matching(mut self) -> Self {
        self.options.tag_matching = TagMatching::Lenient;
        self
    }

    /// Depth of the open-element stack, counting the root.
    #[must_use]
    pub const fn stack_depth(&self) -> usize {
        self.stack_of_open_elements.len() + 1
    }

    /// Run the tree builder and return the root.
    ///
    /// # Errors
    ///
    /// See [`TreeBuilder::run_with_issues`].
    pub fn run(self) -> Result<Root, ParseError> {
        self.run_with_issues().map(|(root, _)| root)
    }

    /// Run the tree builder and return both the root and any non-fatal
    /// issues.
    ///
    /// # Errors
    ///
    /// - [`ParseError::UnexpectedCloseTag`] if a closing tag arrives with no
    ///   element open.
    /// - [`ParseError::MismatchedTag`] in strict mode, if a closing tag does
    ///   not name the innermost open element.
    /// - [`ParseError::UnclosedElement`] if elements remain open after the
    ///   last token.
    pub fn run_with_issues(mut self) -> Result<(Root, Vec<ParseIssue>), ParseError> {
        let tokens = self.tokens;
        while self.token_index < tokens.len() {
            self.process_token(&tokens[self.token_index])?;
            self.token_index += 1;
        }
        self.finish()
    }

    fn process_token(&mut self, token: &Token) -> Result<(), ParseError> {
        match token {
            Token::TagOpen { name, span } => {
                self.insert_element(name, *span);
                Ok(())
            }
            Token::Text { content, span } => {
                self.insert_text(content, *span);
                Ok(())
            }
            Token::TagClose { name, span } => self.close_element(name, *span),
        }
    }

    /// The node currently accepting children.
    fn current_children(&mut self) -> &mut Vec<Node> {
        match self.stack_of_open_elements.last_mut() {
            Some(open) => &mut open.children,
            None => &mut self.root_children,
        }
    }

    /// Open a new element as the last child of the current node and make it
    /// the current node.
    fn insert_element(&mut self, tag: &str, span: Span) {
        self.stack_of_open_elements.push(OpenElement {
            tag: tag.to_string(),
            open_span: span,
            children: Vec::new(),
        });
    }

    /// Append a text leaf to the current node. The stack is unchanged.
    fn insert_text(&mut self, content: &str, span: Span) {
        let text = Node::Text(Text {
            content: content.to_string(),
            span,
        });
        self.current_children().push(text);
    }

    /// Pop the innermost open element and attach it to its parent.
    fn close_element(&mut self, name: &str, span: Span) -> Result<(), ParseError> {
        let Some(open) = self.stack_of_open_elements.pop() else {
            return Err(ParseError::UnexpectedCloseTag {
                tag: name.to_string(),
                span,
            });
        };

        if open.tag != name {
            match self.options.tag_matching {
                TagMatching::Strict => {
                    return Err(ParseError::MismatchedTag {
                        expected: open.tag,
                        found: name.to_string(),
                        span,
                    });
                }
                TagMatching::Lenient => self.issues.push(ParseIssue {
                    message: format!(
                        "closing tag </{name}> closed open element <{}>",
                        open.tag
                    ),
                    token_index: self.token_index,
                    span,
                }),
            }
        }

        let element = Node::Element(Element {
            tag: open.tag,
            children: open.children,
            span: open.open_span.to(span),
        });
        self.current_children().push(element);
        Ok(())
    }

    fn finish(self) -> Result<(Root, Vec<ParseIssue>), ParseError> {
        if let Some(innermost) = self.stack_of_open_elements.last() {
            return Err(ParseError::UnclosedElement {
                tags: self
                    .stack_of_open_elements
                    .iter()
                    .rev()
                    .map(|open| open.tag.clone())
                    .collect(),
                span: innermost.open_span,
            });
        }
        let root = Root {
            children: self.root_children,
        };
        Ok((root, self.issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_depth_tracks_open_elements() {
        let tokens = vec![
            Token::tag_open("a", 0..3),
            Token::tag_open("b", 3..6),
            Token::tag_close("b", 6..10),
        ];
        let mut builder = TreeBuilder::new(&tokens);
        assert_eq!(builder.stack_depth(), 1);
        builder.process_token(&tokens[0]).unwrap();
        builder.process_token(&tokens[1]).unwrap();
        assert_eq!(builder.stack_depth(), 3);
        builder.process_token(&tokens[2]).unwrap();
        assert_eq!(builder.stack_depth(), 2);
    }

    #[test]
    fn test_unexpected_close_leaves_root_in_place() {
        let tokens = vec![Token::tag_close("a", 0..4)];
        let mut builder = TreeBuilder::new(&tokens);
        assert!(builder.process_token(&tokens[0]).is_err());
        assert_eq!(builder.stack_depth(), 1);
    }

    #[test]
    fn test_options_builders() {
        assert_eq!(ParseOptions::default().tag_matching, TagMatching::Strict);
        assert_eq!(ParseOptions::lenient().tag_matching, TagMatching::Lenient);
        assert_eq!(
            ParseOptions::lenient()
                .with_tag_matching(TagMatching::Strict)
                .tag_matching,
            TagMatching::Strict
        );
        let tokens: Vec<Token> = Vec::new();
        let builder = TreeBuilder::new(&tokens).with_lenient_matching();
        assert_eq!(builder.options, ParseOptions::lenient());
    }
}
