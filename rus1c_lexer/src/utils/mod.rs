//! Shared primitive types for the scanners and their consumers

pub mod span;

pub use span::{Position, SourceMap, Span, Spanned};
