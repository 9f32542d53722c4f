//! File processor module with compile-time limits and global logging integration

mod processor;

pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a file with default settings
pub fn process_file(
    path: impl AsRef<std::path::Path>,
) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(path)
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    FileProcessor::max_file_size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("query.txt");
        fs::write(&file_path, "ВЫБРАТЬ 1").unwrap();

        let result = process_file(&file_path).unwrap();
        assert_eq!(result.source, "ВЫБРАТЬ 1");
        assert_eq!(result.metadata.extension.as_deref(), Some("txt"));
    }

    #[test]
    fn test_compile_time_limit_access() {
        assert_eq!(get_max_file_size(), MAX_FILE_SIZE);
        assert!(get_max_file_size() > 0);
    }
}
