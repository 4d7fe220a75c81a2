//! Shared primitives for the parameter parser, generator and document scanner.

pub mod span;
pub mod text;

pub use span::{Position, SourceMap, Span, Spanned};
pub use text::{is_all_digits, is_blank, strip_comment, trim};
