//! Error and success codes with their classification metadata
//!
//! Every code a scanner, the file processor, or the pipeline can log is
//! declared here together with its severity and recovery behavior.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const UNKNOWN_LANGUAGE: Code = Code::new("E012");
}

/// Lexical analysis codes
pub mod lexical {
    use super::Code;

    pub const UNRECOGNIZED_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const INTERNAL_SCANNER_FAULT: Code = Code::new("E029");
}

/// Configuration error codes
pub mod configuration {
    use super::Code;

    pub const INVALID_CONFIGURATION: Code = Code::new("E030");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const TOKEN_STREAM_VALIDATED: Code = Code::new("I021");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        use Severity::*;

        let entries = [
            // System
            ErrorMetadata::new(
                "ERR001",
                "System",
                Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the input that triggered it",
            ),
            // File processing
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Medium,
                false,
                false,
                "Source file not found",
                "Check the path passed on the command line",
            ),
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                High,
                false,
                false,
                "Source file exceeds the maximum size",
                "Split the module or raise max_file_size in the build profile",
            ),
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                High,
                false,
                false,
                "Permission denied reading source file",
                "Check file permissions",
            ),
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Medium,
                false,
                false,
                "Source file is not valid UTF-8",
                "Re-save the module as UTF-8 (1C exports use UTF-8 with BOM)",
            ),
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Medium,
                false,
                false,
                "I/O error reading source file",
                "Retry the operation or check the file system",
            ),
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Medium,
                false,
                false,
                "No scanner registered for this language or extension",
                "Pass --lang rus1c or --lang rus1c_sql explicitly",
            ),
            // Lexical
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Low,
                true,
                false,
                "Character not recognized by any scanner rule",
                "The character is emitted as an error token; no action needed",
            ),
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Low,
                true,
                false,
                "String literal left open at end of input",
                "Close the string literal",
            ),
            ErrorMetadata::new(
                "E029",
                "Lexical",
                Critical,
                false,
                true,
                "Scanner reached a state no rule covers",
                "File a bug report with the input that triggered it",
            ),
            // Configuration
            ErrorMetadata::new(
                "E030",
                "Configuration",
                High,
                false,
                true,
                "Invalid runtime configuration",
                "Fix the configuration file or environment variables",
            ),
            // Success
            ErrorMetadata::new(
                "I004",
                "System",
                Low,
                true,
                false,
                "Logging system initialized",
                "Ready to scan",
            ),
            ErrorMetadata::new(
                "I006",
                "FileProcessing",
                Low,
                true,
                false,
                "Source file loaded",
                "Ready for scanning",
            ),
            ErrorMetadata::new(
                "I020",
                "Lexical",
                Low,
                true,
                false,
                "Tokenization completed",
                "Token stream ready for rendering",
            ),
            ErrorMetadata::new(
                "I021",
                "Lexical",
                Low,
                true,
                false,
                "Token stream passed structural validation",
                "Token stream ready for rendering",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_code_has_metadata() {
        let declared = [
            system::INTERNAL_ERROR,
            file_processing::FILE_NOT_FOUND,
            file_processing::FILE_TOO_LARGE,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            file_processing::UNKNOWN_LANGUAGE,
            lexical::UNRECOGNIZED_CHARACTER,
            lexical::UNTERMINATED_STRING,
            lexical::INTERNAL_SCANNER_FAULT,
            configuration::INVALID_CONFIGURATION,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::FILE_PROCESSING_SUCCESS,
            success::TOKENIZATION_COMPLETE,
            success::TOKEN_STREAM_VALIDATED,
        ];

        for code in declared {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_error_token_is_recoverable() {
        let code = lexical::UNRECOGNIZED_CHARACTER.as_str();
        assert!(is_recoverable(code));
        assert!(!requires_halt(code));
        assert_eq!(get_severity(code), Severity::Low);
    }

    #[test]
    fn test_internal_fault_halts() {
        let code = lexical::INTERNAL_SCANNER_FAULT.as_str();
        assert!(requires_halt(code));
        assert_eq!(get_severity(code), Severity::Critical);
        assert_eq!(get_category(code), "Lexical");
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_action("X999"), "No specific action available");
        assert_eq!(get_category("X999"), "Unknown");
        assert!(is_recoverable("X999"));
    }
}
