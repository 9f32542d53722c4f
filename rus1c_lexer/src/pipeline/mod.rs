//! Highlighting entry points: pick a scanner, run it, report on the result

mod error;
mod result;

pub use error::PipelineError;
pub use result::HighlightResult;

use crate::config::ScannerPreferences;
use crate::encoder::{ScanMetrics, Tee};
use crate::file_processor::FileProcessor;
use crate::logging::codes;
use crate::scanner::Language;
use crate::tokens::{validation, TokenKind, TokenStream};
use crate::{log_debug, log_error, log_success, log_warning};
use std::path::Path;
use std::time::Instant;

/// Tokenize source text already in memory
pub fn highlight_source(
    language: Language,
    source: &str,
    preferences: &ScannerPreferences,
) -> Result<HighlightResult, PipelineError> {
    let start_time = Instant::now();
    let scanner = language.scanner(preferences.clone());

    let mut tokens = TokenStream::for_source_len(source.len());
    let metrics = if preferences.collect_metrics {
        let mut metrics = ScanMetrics::new();
        scanner.scan_tokens(source, &mut Tee::new(&mut tokens, &mut metrics))?;
        Some(metrics)
    } else {
        scanner.scan_tokens(source, &mut tokens)?;
        None
    };

    if cfg!(debug_assertions) {
        check_stream(&tokens, source, language);
    }
    report_error_tokens(&tokens, language);

    Ok(HighlightResult {
        language,
        tokens,
        metrics,
        metadata: None,
        duration: start_time.elapsed(),
    })
}

/// Read and tokenize a file
///
/// The language comes from the file extension unless `language` is given.
pub fn highlight_file(
    path: impl AsRef<Path>,
    language: Option<Language>,
    preferences: &ScannerPreferences,
) -> Result<HighlightResult, PipelineError> {
    let path = path.as_ref();
    let start_time = Instant::now();

    let language = match language.or_else(|| language_for_path(path)) {
        Some(language) => language,
        None => {
            let error = PipelineError::UnknownLanguage {
                path: path.to_path_buf(),
                extension: path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(str::to_owned),
            };
            log_error!(error.error_code(), &error.to_string());
            return Err(error);
        }
    };

    log_debug!("Highlighting file",
        "file" => path.display(),
        "language" => language
    );

    let file = FileProcessor::new().process_file(path)?;
    let mut result = highlight_source(language, &file.source, preferences)?;
    result.metadata = Some(file.metadata);
    result.duration = start_time.elapsed();

    log_success!(codes::success::FILE_PROCESSING_SUCCESS, "File highlighted",
        "file" => path.display(),
        "language" => language,
        "tokens" => result.tokens.len(),
        "duration_ms" => format!("{:.2}", result.duration.as_secs_f64() * 1000.0)
    );

    Ok(result)
}

/// Language registered for the file's extension
pub fn language_for_path(path: &Path) -> Option<Language> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::for_extension)
}

fn check_stream(tokens: &TokenStream, source: &str, language: Language) {
    match validation::validate_token_stream(tokens, source) {
        Ok(()) => {
            log_success!(codes::success::TOKEN_STREAM_VALIDATED, "Token stream validated",
                "scanner" => language,
                "tokens" => tokens.len()
            );
        }
        Err(violation) => {
            log_error!(codes::system::INTERNAL_ERROR, "Malformed token stream",
                "scanner" => language,
                "violation" => violation
            );
        }
    }
}

/// One warning per scan, pointing at the first unrecognized character
fn report_error_tokens(tokens: &TokenStream, language: Language) {
    let mut errors = tokens.tokens().filter(|t| t.value.kind == TokenKind::Error);
    let Some(first) = errors.next() else {
        return;
    };

    log_warning!(code = codes::lexical::UNRECOGNIZED_CHARACTER, "Unrecognized characters in source",
        span = first.span,
        "scanner" => language,
        "first" => first.value.text.escape_debug(),
        "count" => 1 + errors.count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn prefs(collect_metrics: bool) -> ScannerPreferences {
        ScannerPreferences {
            collect_metrics,
            ..ScannerPreferences::default()
        }
    }

    #[test]
    fn test_highlight_source_collects_metrics() {
        let result = highlight_source(Language::Rus1c, "А = \"б\";", &prefs(true)).unwrap();
        let metrics = result.metrics.as_ref().unwrap();

        assert_eq!(metrics.string_groups, 1);
        assert_eq!(metrics.total_tokens, result.tokens.len());
        assert_eq!(result.metrics_or_count(), ScanMetrics::from_stream(&result.tokens));
        assert!(result.metadata.is_none());
    }

    #[test]
    fn test_metrics_can_be_disabled() {
        let result = highlight_source(Language::Rus1cSql, "ВЫБРАТЬ 1", &prefs(false)).unwrap();
        assert!(result.metrics.is_none());
        assert_eq!(result.metrics_or_count().count(TokenKind::Class), 1);
    }

    #[test]
    fn test_highlight_file_picks_language_from_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("module.bsl");
        fs::write(&path, "Возврат Истина;").unwrap();

        let result = highlight_file(&path, None, &prefs(true)).unwrap();
        assert_eq!(result.language, Language::Rus1c);
        assert_eq!(result.tokens.text(), "Возврат Истина;");
        assert_eq!(result.metadata.as_ref().map(|m| m.line_count), Some(1));
    }

    #[test]
    fn test_override_and_unknown_language() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("query.txt");
        fs::write(&path, "ВЫБРАТЬ @п").unwrap();

        let err = highlight_file(&path, None, &prefs(true)).unwrap_err();
        assert_matches!(err, PipelineError::UnknownLanguage { extension: Some(ref ext), .. } if ext == "txt");
        assert_eq!(err.error_code().as_str(), "E012");

        let result = highlight_file(&path, Some(Language::Rus1cSql), &prefs(true)).unwrap();
        assert_eq!(result.tokens.count_kind(TokenKind::Variable), 1);
    }

    #[test]
    fn test_file_errors_pass_through() {
        let dir = tempdir().unwrap();
        let err = highlight_file(dir.path().join("gone.1c"), None, &prefs(true)).unwrap_err();
        assert_matches!(err, PipelineError::FileProcessing(_));
        assert_eq!(err.error_code().as_str(), "E005");
    }

    #[test]
    fn test_json_output() {
        let result = highlight_source(Language::Rus1c, "\"a", &prefs(true)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

        assert_eq!(json["language"], "rus1c");
        assert_eq!(json["tokens"]["events"][0]["event"], "begin_group");
        assert!(json["metrics"]["total_tokens"].is_number());
        assert!(json.get("metadata").is_none());
    }
}
