//! Syntax-highlighting scanners for 1C:Enterprise module code (`rus1c`) and
//! its query language (`rus1c_sql`)
//!
//! ```
//! use rus1c_lexer::{highlight_source, Language, ScannerPreferences, TokenKind};
//!
//! let result = highlight_source(Language::Rus1cSql, "ВЫБРАТЬ 1", &ScannerPreferences::default())?;
//! assert_eq!(result.tokens.count_kind(TokenKind::Class), 1);
//! # Ok::<(), rus1c_lexer::PipelineError>(())
//! ```

// Internal modules
pub mod config;
pub mod encoder;
pub mod file_processor;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod rus1c;
pub mod rus1c_sql;
pub mod scanner;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use config::ScannerPreferences;
pub use encoder::{DebugEncoder, Encoder, ScanMetrics};
pub use pipeline::{highlight_file, highlight_source, HighlightResult, PipelineError};
pub use rus1c::Rus1cScanner;
pub use rus1c_sql::Rus1cSqlScanner;
pub use scanner::{Language, ScanError, Scanner};
pub use tokens::{Token, TokenKind, TokenStream};
