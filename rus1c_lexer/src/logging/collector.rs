//! Per-file event collection with cargo-style reporting
//!
//! The CLI highlights several files in one run; errors and warnings logged
//! while a file context is active are grouped here under that file's path.

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

// ============================================================================
// FILE PROCESSING CONTEXT
// ============================================================================

/// Context information for file processing
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

/// Summary of a multi-file run
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe error collector keyed by file path
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
    file_contexts: Mutex<BTreeMap<PathBuf, FileProcessingContext>>,
    processing_start: Instant,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
            file_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event for a specific file
    ///
    /// Events past the per-file limit are dropped; a single warning marks
    /// the overflow. Once the total capacity is reached nothing else is kept.
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = self.file_events.lock().unwrap();

        let total: usize = events.values().map(Vec::len).sum();
        if total >= MAX_ERROR_COLLECTION {
            return;
        }

        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < MAX_LOG_EVENTS_PER_FILE {
            file_events.push(event);
        } else if file_events.len() == MAX_LOG_EVENTS_PER_FILE {
            file_events.push(LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            )));
        }
    }

    /// Record file processing context; a file with no events still counts
    pub fn record_file_context(&self, context: FileProcessingContext) {
        self.file_events
            .lock()
            .unwrap()
            .entry(context.file_path.clone())
            .or_default();
        self.file_contexts
            .lock()
            .unwrap()
            .insert(context.file_path.clone(), context);
    }

    /// Get all events for a specific file
    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        let events = self.file_events.lock().unwrap();
        events.get(file_path).cloned().unwrap_or_default()
    }

    /// Get errors for a specific file
    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        self.get_file_events(file_path)
            .into_iter()
            .filter(|e| e.is_error())
            .collect()
    }

    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        self.file_events.lock().unwrap().clone()
    }

    /// Get processing summary
    pub fn get_summary(&self) -> ProcessingSummary {
        let events = self.file_events.lock().unwrap();

        let mut summary = ProcessingSummary {
            total_files: events.len(),
            total_processing_time: self.processing_start.elapsed(),
            ..Default::default()
        };

        for file_events in events.values() {
            let errors = file_events.iter().filter(|e| e.is_error()).count();
            let warnings = file_events.iter().filter(|e| e.is_warning()).count();

            if errors > 0 {
                summary.failed_files += 1;
            } else if warnings > 0 {
                summary.files_with_warnings += 1;
            } else {
                summary.successful_files += 1;
            }

            summary.total_errors += errors;
            summary.total_warnings += warnings;
        }

        summary
    }

    /// Time spent on a file since its context was recorded
    pub fn file_elapsed(&self, file_path: &Path) -> Option<Duration> {
        self.file_contexts
            .lock()
            .unwrap()
            .get(file_path)
            .map(FileProcessingContext::elapsed)
    }

    pub fn total_event_count(&self) -> usize {
        self.file_events.lock().unwrap().values().map(Vec::len).sum()
    }

    /// Current count, capacity, and usage ratio
    pub fn get_capacity_info(&self) -> (usize, usize, f64) {
        let current = self.total_event_count();
        (
            current,
            MAX_ERROR_COLLECTION,
            current as f64 / MAX_ERROR_COLLECTION as f64,
        )
    }

    pub fn clear(&self) {
        self.file_events.lock().unwrap().clear();
        self.file_contexts.lock().unwrap().clear();
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

fn push_event(output: &mut String, label: &str, file_path: &Path, event: &LogEvent) {
    let span_info = event
        .span
        .as_ref()
        .map(|s| {
            format!(
                "\n  --> {}:{}:{}",
                file_path.display(),
                s.start().line,
                s.start().column
            )
        })
        .unwrap_or_default();

    output.push_str(&format!(
        "{}[{}]: {}{}\n",
        label,
        event.code.as_str(),
        event.message,
        span_info
    ));

    for (key, value) in &event.context {
        if key != "file" && key != "file_id" {
            output.push_str(&format!("  = {}: {}\n", key, value));
        }
    }
}

/// Format collected events in cargo-style output
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        if events.is_empty() {
            continue;
        }

        for event in events.iter().filter(|e| e.is_error()) {
            push_event(&mut output, "error", file_path, event);

            let action = super::codes::get_action(event.code.as_str());
            if action != "No specific action available" {
                output.push_str(&format!("  = help: {}\n", action));
            }
        }

        for event in events.iter().filter(|e| e.is_warning()) {
            push_event(&mut output, "warning", file_path, event);
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    output.push_str(&format!(
        "Highlighted {} file(s): {} ok, {} with warnings, {} failed\n",
        summary.total_files,
        summary.successful_files,
        summary.files_with_warnings,
        summary.failed_files
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_error_collector_basic() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("Module.bsl");

        collector.record_event(
            &path,
            LogEvent::error(codes::file_processing::INVALID_ENCODING, "Not UTF-8"),
        );
        collector.record_event(&path, LogEvent::warning("Odd input"));

        assert_eq!(collector.get_file_events(&path).len(), 2);
        assert_eq!(collector.get_file_errors(&path).len(), 1);
        assert_eq!(collector.total_event_count(), 2);
    }

    #[test]
    fn test_processing_summary() {
        let collector = ErrorCollector::new();
        collector.record_file_context(FileProcessingContext::new(PathBuf::from("a.1c"), 0));
        collector.record_file_context(FileProcessingContext::new(PathBuf::from("b.1c"), 1));
        collector.record_event(
            Path::new("b.1c"),
            LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "missing"),
        );

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.successful_files, 1);
        assert_eq!(summary.failed_files, 1);
        assert!(summary.has_errors());
        assert!(!summary.has_warnings());
        assert!(collector.file_elapsed(Path::new("a.1c")).is_some());
    }

    #[test]
    fn test_per_file_limit() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("noisy.1c");

        for _ in 0..MAX_LOG_EVENTS_PER_FILE + 5 {
            collector.record_event(&path, LogEvent::warning("noise"));
        }

        let events = collector.get_file_events(&path);
        assert_eq!(events.len(), MAX_LOG_EVENTS_PER_FILE + 1);
        assert!(events
            .last()
            .map(|e| e.message.contains("Too many events"))
            .unwrap_or(false));
    }

    #[test]
    fn test_cargo_style_report() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("Module.bsl");
        collector.record_event(
            &path,
            LogEvent::error(codes::file_processing::FILE_TOO_LARGE, "File too large")
                .with_context("size", "99"),
        );

        let report = format_cargo_style_errors(&collector);
        assert!(report.contains("error[E007]: File too large"));
        assert!(report.contains("= size: 99"));
        assert!(report.contains("= help:"));
        assert!(report.contains("1 failed"));

        collector.clear();
        assert_eq!(collector.total_event_count(), 0);
    }
}
