use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};
use crate::scanner::ScanError;
use std::path::PathBuf;

/// Highlighting errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Scanning failed: {0}")]
    Scan(#[from] ScanError),

    #[error("No scanner for {}{}", .path.display(), describe_extension(.extension))]
    UnknownLanguage {
        path: PathBuf,
        extension: Option<String>,
    },
}

fn describe_extension(extension: &Option<String>) -> String {
    match extension {
        Some(ext) => format!(" (extension .{}; pass a language explicitly)", ext),
        None => " (no extension; pass a language explicitly)".to_string(),
    }
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::FileProcessing(err) => err.error_code(),
            PipelineError::Scan(err) => err.error_code(),
            PipelineError::UnknownLanguage { .. } => codes::file_processing::UNKNOWN_LANGUAGE,
        }
    }
}
