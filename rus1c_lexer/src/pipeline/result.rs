use crate::encoder::ScanMetrics;
use crate::file_processor::FileMetadata;
use crate::scanner::Language;
use crate::tokens::TokenStream;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Everything one highlighting run produced
#[derive(Debug, Serialize)]
pub struct HighlightResult {
    pub language: Language,
    pub tokens: TokenStream,
    /// Present when metrics collection is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ScanMetrics>,
    /// Present when the source came from a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FileMetadata>,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

impl HighlightResult {
    /// Metrics as collected, or counted from the stream when collection was off
    pub fn metrics_or_count(&self) -> ScanMetrics {
        self.metrics
            .clone()
            .unwrap_or_else(|| ScanMetrics::from_stream(&self.tokens))
    }

    pub fn has_error_tokens(&self) -> bool {
        self.tokens
            .tokens()
            .any(|t| t.value.kind == crate::tokens::TokenKind::Error)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
