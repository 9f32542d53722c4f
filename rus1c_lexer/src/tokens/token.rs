//! Token kinds and leaf tokens produced by the 1C scanners
//!
//! Kinds are a closed set shared by both scanners. Scanner A only ever
//! produces a subset of them; which subset is an implementation detail of
//! each scanner, not of the kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification tag of a leaf token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Space,
    Comment,
    Preprocessor,
    Directive,
    Operator,
    Ident,
    Keyword,
    /// Object type names in queries (`Справочник`, `Документ`, ...)
    Type,
    /// Command verbs in queries
    Class,
    /// Predefined functions in queries
    Predefined,
    PredefinedType,
    PredefinedConstant,
    Integer,
    Float,
    Hex,
    Octal,
    /// Opening or closing quote of a string literal
    Delimiter,
    /// Literal text inside a string
    Content,
    /// Escape sequence inside a string (`""`, `\n`, `A`)
    Char,
    /// Prefix tag before a query string (`x`, `N`, `_utf8`)
    Modifier,
    /// `@name` query parameter
    Variable,
    /// A single character no rule recognized
    Error,
}

impl TokenKind {
    /// Every kind, in declaration order
    pub const ALL: [TokenKind; 22] = [
        TokenKind::Space,
        TokenKind::Comment,
        TokenKind::Preprocessor,
        TokenKind::Directive,
        TokenKind::Operator,
        TokenKind::Ident,
        TokenKind::Keyword,
        TokenKind::Type,
        TokenKind::Class,
        TokenKind::Predefined,
        TokenKind::PredefinedType,
        TokenKind::PredefinedConstant,
        TokenKind::Integer,
        TokenKind::Float,
        TokenKind::Hex,
        TokenKind::Octal,
        TokenKind::Delimiter,
        TokenKind::Content,
        TokenKind::Char,
        TokenKind::Modifier,
        TokenKind::Variable,
        TokenKind::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Space => "space",
            TokenKind::Comment => "comment",
            TokenKind::Preprocessor => "preprocessor",
            TokenKind::Directive => "directive",
            TokenKind::Operator => "operator",
            TokenKind::Ident => "ident",
            TokenKind::Keyword => "keyword",
            TokenKind::Type => "type",
            TokenKind::Class => "class",
            TokenKind::Predefined => "predefined",
            TokenKind::PredefinedType => "predefined_type",
            TokenKind::PredefinedConstant => "predefined_constant",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::Hex => "hex",
            TokenKind::Octal => "octal",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Content => "content",
            TokenKind::Char => "char",
            TokenKind::Modifier => "modifier",
            TokenKind::Variable => "variable",
            TokenKind::Error => "error",
        }
    }

    /// Whitespace and comments carry no meaning for a reader of the code
    pub fn is_significant(&self) -> bool {
        !matches!(self, TokenKind::Space | TokenKind::Comment)
    }

    /// Kinds that only appear between the markers of a string group
    pub fn is_string_part(&self) -> bool {
        matches!(
            self,
            TokenKind::Delimiter | TokenKind::Content | TokenKind::Char | TokenKind::Modifier
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown token kind: {}", s))
    }
}

/// Composite constructs bracketed by begin/end group markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    String,
}

impl GroupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKind::String => "string",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf token: the exact source text and its classification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_significant(&self) -> bool {
        self.kind.is_significant()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.text)
    }
}
