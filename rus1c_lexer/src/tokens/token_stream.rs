//! In-memory token stream: the default consumer of scanner output

use super::token::{GroupKind, Token, TokenKind};
use crate::encoder::Encoder;
use crate::utils::Spanned;
use serde::Serialize;

/// A token with its source location
pub type SpannedToken = Spanned<Token>;

/// One call a scanner made into its encoder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenEvent {
    Text(SpannedToken),
    BeginGroup { group: GroupKind },
    EndGroup { group: GroupKind },
}

impl TokenEvent {
    pub fn token(&self) -> Option<&SpannedToken> {
        match self {
            TokenEvent::Text(token) => Some(token),
            _ => None,
        }
    }
}

/// Ordered record of everything a scanner emitted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenStream {
    events: Vec<TokenEvent>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for an input of `source_len` bytes
    pub fn for_source_len(source_len: usize) -> Self {
        let divisor = crate::config::compile_time::lexical::TOKEN_CAPACITY_DIVISOR;
        Self {
            events: Vec::with_capacity(source_len / divisor + 1),
        }
    }

    pub fn events(&self) -> &[TokenEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TokenEvent> {
        self.events
    }

    /// Leaf tokens in emission order, group markers skipped
    pub fn tokens(&self) -> impl Iterator<Item = &SpannedToken> {
        self.events.iter().filter_map(TokenEvent::token)
    }

    /// Leaf tokens other than whitespace and comments
    pub fn significant_tokens(&self) -> impl Iterator<Item = &SpannedToken> {
        self.tokens().filter(|t| t.value.is_significant())
    }

    /// Concatenation of every token's text
    pub fn text(&self) -> String {
        self.tokens().map(|t| t.value.text.as_str()).collect()
    }

    /// Number of leaf tokens
    pub fn len(&self) -> usize {
        self.tokens().count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count_kind(&self, kind: TokenKind) -> usize {
        self.tokens().filter(|t| t.value.kind == kind).count()
    }

    /// Number of opened groups
    pub fn group_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TokenEvent::BeginGroup { .. }))
            .count()
    }

    /// `(kind, text)` pairs, convenient for assertions
    pub fn kinds_and_texts(&self) -> Vec<(TokenKind, &str)> {
        self.tokens()
            .map(|t| (t.value.kind, t.value.text.as_str()))
            .collect()
    }
}

impl Encoder for TokenStream {
    fn text_token(&mut self, token: SpannedToken) {
        self.events.push(TokenEvent::Text(token));
    }

    fn begin_group(&mut self, kind: GroupKind) {
        self.events.push(TokenEvent::BeginGroup { group: kind });
    }

    fn end_group(&mut self, kind: GroupKind) {
        self.events.push(TokenEvent::EndGroup { group: kind });
    }
}

/// Structural checks over a finished stream
pub mod validation {
    use super::*;

    /// Token texts concatenate back to the source
    pub fn validate_lossless(stream: &TokenStream, source: &str) -> Result<(), String> {
        let mut offset = 0;
        for token in stream.tokens() {
            let text = token.value.text.as_str();
            if text.is_empty() {
                return Err(format!("Empty {} token at offset {}", token.value.kind, offset));
            }
            if !source[offset..].starts_with(text) {
                return Err(format!(
                    "Token {} does not match source at offset {}",
                    token.value, offset
                ));
            }
            offset += text.len();
        }

        if offset != source.len() {
            return Err(format!(
                "Tokens cover {} of {} source bytes",
                offset,
                source.len()
            ));
        }
        Ok(())
    }

    /// Groups are balanced and never nested
    pub fn validate_groups(stream: &TokenStream) -> Result<(), String> {
        let mut open: Option<GroupKind> = None;

        for (index, event) in stream.events().iter().enumerate() {
            match event {
                TokenEvent::BeginGroup { group } => {
                    if let Some(current) = open {
                        return Err(format!(
                            "Group {} opened at event {} inside open {} group",
                            group, index, current
                        ));
                    }
                    open = Some(*group);
                }
                TokenEvent::EndGroup { group } => match open.take() {
                    Some(current) if current == *group => {}
                    Some(current) => {
                        return Err(format!(
                            "Group {} closed at event {} while {} is open",
                            group, index, current
                        ))
                    }
                    None => {
                        return Err(format!(
                            "Group {} closed at event {} without being opened",
                            group, index
                        ))
                    }
                },
                TokenEvent::Text(token) => {
                    if token.value.kind.is_string_part() && open.is_none() {
                        return Err(format!(
                            "String part {} outside a group at event {}",
                            token.value, index
                        ));
                    }
                }
            }
        }

        match open {
            Some(group) => Err(format!("Group {} never closed", group)),
            None => Ok(()),
        }
    }

    /// Spans start at zero, are contiguous, and agree with token lengths
    pub fn validate_span_order(stream: &TokenStream) -> Result<(), String> {
        let mut expected = 0;
        for token in stream.tokens() {
            let span = token.span;
            if span.start.offset != expected {
                return Err(format!(
                    "Span order violation: token {} starts at {}, expected {}",
                    token.value, span.start.offset, expected
                ));
            }
            if span.len() != token.value.text.len() {
                return Err(format!(
                    "Span of token {} covers {} bytes, text has {}",
                    token.value,
                    span.len(),
                    token.value.text.len()
                ));
            }
            expected = span.end.offset;
        }
        Ok(())
    }

    /// Validate token stream integrity
    pub fn validate_token_stream(stream: &TokenStream, source: &str) -> Result<(), String> {
        validate_lossless(stream, source)?;
        validate_groups(stream)?;
        validate_span_order(stream)?;
        Ok(())
    }
}
