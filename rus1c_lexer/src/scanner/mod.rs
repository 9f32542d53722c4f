//! Shared scanning infrastructure and the scanner registry
//!
//! Both scanners follow the same loop: at the cursor, try an ordered list
//! of alternatives for the current [`LexerState`], commit to the first that
//! matches, emit, repeat until end of input. Anything no alternative takes
//! becomes a one-character `error` token.

pub mod cursor;
pub mod error;
pub(crate) mod session;

use crate::config::ScannerPreferences;
use crate::encoder::Encoder;
use crate::rus1c::Rus1cScanner;
use crate::rus1c_sql::Rus1cSqlScanner;
use crate::tokens::TokenStream;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use cursor::Cursor;
pub use error::ScanError;

/// Mode of the scan loop, selecting which alternatives are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LexerState {
    Initial,
    InString,
}

impl LexerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LexerState::Initial => "initial",
            LexerState::InString => "in_string",
        }
    }
}

impl fmt::Display for LexerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tokenizer for one language
///
/// Scanners hold no per-scan state, so one instance can serve any number of
/// scans, including concurrent ones.
pub trait Scanner: Send + Sync {
    /// Short machine name (`rus1c`, `rus1c_sql`)
    fn name(&self) -> &'static str;

    /// File extension associated with the language, if any
    fn file_extension(&self) -> Option<&'static str>;

    /// Scan the whole input, feeding every token and group marker to `encoder`
    fn scan_tokens(&self, input: &str, encoder: &mut dyn Encoder) -> Result<(), ScanError>;

    /// Scan into a fresh [`TokenStream`]
    fn tokenize(&self, input: &str) -> Result<TokenStream, ScanError> {
        let mut stream = TokenStream::for_source_len(input.len());
        self.scan_tokens(input, &mut stream)?;
        Ok(stream)
    }
}

/// Languages with a registered scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// 1C:Enterprise module code
    Rus1c,
    /// 1C:Enterprise query language
    Rus1cSql,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Rus1c, Language::Rus1cSql];

    pub fn name(&self) -> &'static str {
        match self {
            Language::Rus1c => "rus1c",
            Language::Rus1cSql => "rus1c_sql",
        }
    }

    /// Look up a language by its machine name, ignoring case
    pub fn for_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|lang| lang.name() == name)
    }

    /// Pick a language from a file extension (without the dot)
    pub fn for_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "1c" | "bsl" => Some(Language::Rus1c),
            _ => None,
        }
    }

    pub fn scanner(&self, preferences: ScannerPreferences) -> Box<dyn Scanner> {
        match self {
            Language::Rus1c => Box::new(Rus1cScanner::with_preferences(preferences)),
            Language::Rus1cSql => Box::new(Rus1cSqlScanner::with_preferences(preferences)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// ASCII whitespace as the scanners understand it: space, tab, line feed,
/// vertical tab, form feed, carriage return
pub(crate) fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Letters of both alphabets 1C identifiers are written in
pub(crate) fn is_word_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, 'А'..='я' | 'Ё' | 'ё')
}

pub(crate) fn is_word_char(ch: char) -> bool {
    is_word_letter(ch) || ch == '_' || ch.is_ascii_digit()
}

/// Byte length of the run of ASCII digits at the start of `s`
pub(crate) fn digits_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}
