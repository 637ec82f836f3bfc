//! Template lexer and tree builder for sprig.
//!
//! # Scope
//!
//! This crate implements a two-stage front end for a small markup template
//! language:
//!
//! - **Lexer** ([`lexer`]) - a six-state machine that scans the template one
//!   character at a time and emits a flat stream of tag-open, tag-close and
//!   text tokens.
//! - **Tree Builder** ([`parser`]) - consumes the tokens in order with a stack
//!   of open elements and produces a single [`Root`] of element and text
//!   nodes.
//!
//! Data flows one way: text, then tokens, then tree. Both stages are pure and
//! synchronous, allocate fresh state per call, and run in time linear in the
//! input.
//!
//! # Not In Scope
//!
//! - Attributes, whitespace in tag names, self-closing markers (`<br/>`) and
//!   entities: everything between `<` and `>` is the tag name, verbatim
//! - Compiling the tree to render functions
//! - Caching or incremental reparsing

/// Syntax tree types.
pub mod ast;
/// Lexer and parser errors.
pub mod error;
/// Template lexer.
pub mod lexer;
/// Tree construction.
pub mod parser;

pub use ast::{Element, Node, Root, Text, print_tree};
pub use error::{LexError, ParseError};
pub use lexer::{Lexer, LexerState, Token, tokenize};
pub use parser::{ParseIssue, ParseOptions, TagMatching, TreeBuilder};

/// Build a tree from an already tokenized template.
///
/// # Errors
///
/// Returns a [`ParseError`] if the token stream is structurally inconsistent.
pub fn build_tree(tokens: &[Token], options: ParseOptions) -> Result<Root, ParseError> {
    TreeBuilder::new(tokens).with_options(options).run()
}

/// Tokenize and build a tree with strict tag matching.
///
/// # Errors
///
/// Returns [`ParseError::Lex`] if the template cannot be tokenized, or
/// another [`ParseError`] if its tags do not nest.
pub fn parse(template: &str) -> Result<Root, ParseError> {
    parse_with_options(template, ParseOptions::default())
}

/// Tokenize and build a tree with the given options.
///
/// # Errors
///
/// Returns [`ParseError::Lex`] if the template cannot be tokenized, or
/// another [`ParseError`] if its tags do not nest.
pub fn parse_with_options(template: &str, options: ParseOptions) -> Result<Root, ParseError> {
    let tokens = tokenize(template)?;
    build_tree(&tokens, options)
}
