use super::Encoder;
use crate::tokens::{GroupKind, SpannedToken, TokenEvent, TokenKind, TokenStream};
use serde::Serialize;
use std::collections::BTreeMap;

/// Token counts gathered while a scan runs
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ScanMetrics {
    pub total_tokens: usize,
    pub significant_tokens: usize,
    pub by_kind: BTreeMap<TokenKind, usize>,
    pub string_groups: usize,
    pub error_tokens: usize,
    pub comment_count: usize,
    /// Longest comment in bytes
    pub max_comment_length: usize,
    /// Longest string literal in bytes, delimiters and prefix included
    pub max_string_length: usize,
    /// Line of the last token seen
    pub last_line: u32,

    #[serde(skip)]
    open_string_length: Option<usize>,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an already collected stream
    pub fn from_stream(stream: &TokenStream) -> Self {
        let mut metrics = Self::new();
        for event in stream.events() {
            match event {
                TokenEvent::Text(token) => metrics.text_token(token.clone()),
                TokenEvent::BeginGroup { group } => metrics.begin_group(*group),
                TokenEvent::EndGroup { group } => metrics.end_group(*group),
            }
        }
        metrics
    }

    pub fn count(&self, kind: TokenKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn has_errors(&self) -> bool {
        self.error_tokens > 0
    }

    /// Human-readable summary, one kind per line
    pub fn format_summary(&self) -> String {
        let mut out = format!(
            "tokens: {} ({} significant)\nstrings: {}\nerrors: {}\nlines: {}\n",
            self.total_tokens,
            self.significant_tokens,
            self.string_groups,
            self.error_tokens,
            self.last_line
        );
        for (kind, count) in &self.by_kind {
            out.push_str(&format!("  {:<20}{}\n", kind.as_str(), count));
        }
        out
    }
}

impl Encoder for ScanMetrics {
    fn text_token(&mut self, token: SpannedToken) {
        let len = token.value.text.len();
        let kind = token.value.kind;

        self.total_tokens += 1;
        if kind.is_significant() {
            self.significant_tokens += 1;
        }
        *self.by_kind.entry(kind).or_insert(0) += 1;
        self.last_line = token.span.end.line;

        match kind {
            TokenKind::Error => self.error_tokens += 1,
            TokenKind::Comment => {
                self.comment_count += 1;
                self.max_comment_length = self.max_comment_length.max(len);
            }
            _ => {}
        }

        if let Some(open) = self.open_string_length.as_mut() {
            *open += len;
        }
    }

    fn begin_group(&mut self, kind: GroupKind) {
        match kind {
            GroupKind::String => {
                self.string_groups += 1;
                self.open_string_length = Some(0);
            }
        }
    }

    fn end_group(&mut self, kind: GroupKind) {
        match kind {
            GroupKind::String => {
                if let Some(length) = self.open_string_length.take() {
                    self.max_string_length = self.max_string_length.max(length);
                }
            }
        }
    }
}
