//! Tree builder module: token stream in, syntax tree out.

/// Tree builder implementation.
pub mod core;

pub use self::core::{ParseIssue, ParseOptions, TagMatching, TreeBuilder};
