//! Global logging as seen by a host process: events, codes, and the
//! per-file collector

use rus1c_lexer::logging::{self, codes, LogLevel, LoggingService, MemoryLogger};
use rus1c_lexer::{highlight_file, highlight_source, Language, ScannerPreferences};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

static LOGGER: OnceLock<Arc<MemoryLogger>> = OnceLock::new();

fn memory_logger() -> Arc<MemoryLogger> {
    LOGGER
        .get_or_init(|| {
            let logger = Arc::new(MemoryLogger::new());
            let service = LoggingService::new(logger.clone(), LogLevel::Debug);
            logging::init_global_logging_with_service(Arc::new(service)).unwrap();
            logger
        })
        .clone()
}

#[test]
fn test_scan_events_are_logged() {
    let logger = memory_logger();
    let prefs = ScannerPreferences {
        log_error_tokens: true,
        log_implicit_string_close: true,
        ..ScannerPreferences::default()
    };

    let path = PathBuf::from("logged.1c");
    logging::with_file_context(path.clone(), 7, || {
        highlight_source(Language::Rus1c, "А = 1 € \"open", &prefs).unwrap();
    });

    assert!(logger.has_success_with_code(codes::success::TOKENIZATION_COMPLETE));
    assert!(logger.has_success_with_code(codes::success::TOKEN_STREAM_VALIDATED));

    let warnings = logger.get_events_with_code(codes::lexical::UNRECOGNIZED_CHARACTER);
    let warning = warnings
        .iter()
        .find(|e| e.is_warning() && e.context.get("file").map(String::as_str) == Some("logged.1c"))
        .expect("warning for the first error token");
    assert_eq!(warning.span.map(|s| s.start.column), Some(7));
    assert_eq!(warning.context.get("count").map(String::as_str), Some("1"));

    // Debug events carry the per-token detail
    assert!(logger
        .get_events()
        .iter()
        .any(|e| e.message == "String closed at end of input"));

    let collector = logging::try_get_global_error_collector().unwrap();
    let file_events = collector.get_file_events(&path);
    assert_eq!(file_events.len(), 1);
    assert!(file_events[0].is_warning());
}

#[test]
fn test_file_errors_reach_the_collector() {
    let logger = memory_logger();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.1c");

    let result = logging::with_file_context(missing.clone(), 8, || {
        highlight_file(&missing, None, &ScannerPreferences::default())
    });
    assert!(result.is_err());

    assert!(!logger
        .get_events_with_code(codes::file_processing::FILE_NOT_FOUND)
        .is_empty());

    let collector = logging::try_get_global_error_collector().unwrap();
    let errors = collector.get_file_errors(&missing);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, codes::file_processing::FILE_NOT_FOUND);

    let report = logging::cargo_style_summary().unwrap();
    assert!(report.contains("missing.1c"));
    assert!(report.contains("failed"));
}
