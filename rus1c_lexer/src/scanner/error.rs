use super::LexerState;
use crate::logging::codes;

/// Failure of a scan as a whole
///
/// Unrecognized input never produces one of these: it becomes an `error`
/// token. The only failure is reaching a state no rule covers, which is a
/// bug in the scanner rather than in the input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    #[error(
        "Internal scanner fault in {state} state at byte {offset}: no rule matches {} ({tokens_emitted} tokens emitted)",
        describe_lookahead(.lookahead)
    )]
    InternalFault {
        lookahead: Option<char>,
        offset: usize,
        state: LexerState,
        tokens_emitted: usize,
    },
}

impl ScanError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ScanError::InternalFault { .. } => codes::lexical::INTERNAL_SCANNER_FAULT,
        }
    }
}

fn describe_lookahead(lookahead: &Option<char>) -> String {
    match lookahead {
        Some(ch) => format!("{:?}", ch),
        None => "end of input".to_string(),
    }
}
