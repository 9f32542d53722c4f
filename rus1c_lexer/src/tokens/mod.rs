//! Token model shared by both scanners
//!
//! A scan produces leaf tokens (`kind` + exact source text + span) and group
//! markers bracketing the parts of each string literal. Concatenating the
//! leaf token texts of a scan always reproduces the scanned input.

pub mod token;
pub mod token_stream;

pub use token::{GroupKind, Token, TokenKind};
pub use token_stream::{validation, SpannedToken, TokenEvent, TokenStream};
