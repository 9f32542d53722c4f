//! Reading source files for highlighting, with compile-time size limits

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// File processor specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Not a regular file: {path}")]
    NotAFile { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path} (at byte {valid_up_to})")]
    InvalidEncoding { path: String, valid_up_to: usize },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::NotAFile { .. } | FileProcessorError::IoError { .. } => {
                codes::file_processing::IO_ERROR
            }
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(err: &io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound { path },
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied { path },
            _ => FileProcessorError::IoError {
                message: format!("{}: {}", path, err),
            },
        }
    }
}

/// What was learned about a file while reading it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    pub path: PathBuf,
    /// Size on disk in bytes, BOM included
    pub size: u64,
    /// Lowercased extension without the dot
    pub extension: Option<String>,
    pub line_count: usize,
    /// Whether a UTF-8 byte order mark was stripped from the start
    pub had_bom: bool,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

/// Decoded file contents and metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    /// Contents as UTF-8, without a leading BOM
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

/// Reads source files, enforcing the compile-time size limit
#[derive(Debug, Clone)]
pub struct FileProcessor {
    /// Emit the detailed success event with size and timing
    pub enable_performance_logging: bool,
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            enable_performance_logging: true,
        }
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a file and decode it as UTF-8
    pub fn process_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let path = path.as_ref();
        let start_time = Instant::now();
        let file = path.display().to_string();

        log_debug!("Starting file processing", "file" => file.as_str());

        let size = self.check_file(path).inspect_err(|err| {
            log_error!(err.error_code(), &err.to_string(), "file" => file.as_str());
        })?;

        let bytes = fs::read(path).map_err(|err| {
            let error = FileProcessorError::from_io(&err, path);
            log_error!(error.error_code(), "Failed to read file",
                "file" => file.as_str(),
                "io_error" => err
            );
            error
        })?;

        let (body, had_bom) = match bytes.strip_prefix(UTF8_BOM) {
            Some(body) => (body, true),
            None => (&bytes[..], false),
        };

        let source = match std::str::from_utf8(body) {
            Ok(text) => text.to_owned(),
            Err(err) => {
                let error = FileProcessorError::InvalidEncoding {
                    path: file.clone(),
                    valid_up_to: err.valid_up_to() + if had_bom { UTF8_BOM.len() } else { 0 },
                };
                log_error!(error.error_code(), "File is not valid UTF-8",
                    "file" => file.as_str(),
                    "valid_up_to" => err.valid_up_to()
                );
                return Err(error);
            }
        };

        let metadata = FileMetadata {
            path: path.to_path_buf(),
            size,
            extension: path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_lowercase),
            line_count: source.lines().count(),
            had_bom,
        };

        if metadata.is_large_file() {
            log_debug!("Large file", "file" => file.as_str(), "size" => metadata.human_readable_size());
        }

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };
        self.log_processing_success(&result, &file);

        Ok(result)
    }

    /// Existence, kind and size checks before reading; returns the size
    fn check_file(&self, path: &Path) -> Result<u64, FileProcessorError> {
        let meta = fs::metadata(path).map_err(|err| FileProcessorError::from_io(&err, path))?;

        if !meta.is_file() {
            return Err(FileProcessorError::NotAFile {
                path: path.display().to_string(),
            });
        }
        if meta.len() > MAX_FILE_SIZE {
            return Err(FileProcessorError::FileTooLarge {
                size: meta.len(),
                max_size: MAX_FILE_SIZE,
            });
        }
        Ok(meta.len())
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file: &str) {
        if self.enable_performance_logging {
            let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File read",
                "file" => file,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "bom" => result.metadata.had_bom,
                "duration_ms" => duration_ms
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File read",
                "file" => file
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn write_temp(bytes: &[u8], suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_reads_utf8_source() {
        let file = write_temp("Процедура А()\nКонецПроцедуры\n".as_bytes(), ".1C");
        let result = FileProcessor::new().process_file(file.path()).unwrap();

        assert_eq!(result.source, "Процедура А()\nКонецПроцедуры\n");
        assert_eq!(result.metadata.line_count, 2);
        assert_eq!(result.metadata.extension.as_deref(), Some("1c"));
        assert!(!result.metadata.had_bom);
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("А = 1;".as_bytes());
        let file = write_temp(&bytes, ".bsl");

        let result = FileProcessor::new().process_file(file.path()).unwrap();
        assert_eq!(result.source, "А = 1;");
        assert!(result.metadata.had_bom);
        assert_eq!(result.metadata.size, bytes.len() as u64);
    }

    #[test]
    fn test_empty_file_is_valid() {
        let file = write_temp(b"", ".1c");
        let result = FileProcessor::new().process_file(file.path()).unwrap();
        assert!(result.source.is_empty());
        assert_eq!(result.metadata.line_count, 0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = FileProcessor::new()
            .process_file(dir.path().join("absent.1c"))
            .unwrap_err();
        assert_matches!(err, FileProcessorError::FileNotFound { .. });
        assert_eq!(err.error_code().as_str(), "E005");
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let err = FileProcessor::new().process_file(dir.path()).unwrap_err();
        assert_matches!(err, FileProcessorError::NotAFile { .. });
    }

    #[test]
    fn test_invalid_utf8() {
        let file = write_temp(b"ok\xFF\xFE", ".1c");
        let err = FileProcessor::new().process_file(file.path()).unwrap_err();
        assert_matches!(err, FileProcessorError::InvalidEncoding { valid_up_to: 2, .. });
        assert_eq!(err.error_code().as_str(), "E010");
    }

    #[test]
    fn test_human_readable_size() {
        let meta = FileMetadata {
            path: PathBuf::from("a.1c"),
            size: 2048,
            extension: Some("1c".into()),
            line_count: 1,
            had_bom: false,
        };
        assert_eq!(meta.human_readable_size(), "2.00 KB");
        assert_eq!(
            FileMetadata { size: 12, ..meta }.human_readable_size(),
            "12 B"
        );
    }
}
