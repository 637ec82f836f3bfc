//! Common utilities for the sprig template front end.
//!
//! This crate provides shared infrastructure used by the syntax crate and the CLI:
//! - **Spans** - byte ranges into a template and line/column lookup
//! - **Code frames** - source excerpts with a caret marker under a span
//! - **Warning System** - colored terminal output for non-fatal issues

pub mod code_frame;
pub mod span;
pub mod warning;

pub use code_frame::CodeFrame;
pub use span::{LineCol, LineIndex, Span};
