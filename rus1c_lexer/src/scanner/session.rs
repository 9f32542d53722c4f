//! Per-scan state shared by both scanners: cursor, encoder, lexer state,
//! and the logging that surrounds a scan.

use super::{Cursor, LexerState, ScanError};
use crate::config::compile_time::lexical::MAX_ERROR_TOKENS_LOGGED;
use crate::config::ScannerPreferences;
use crate::encoder::Encoder;
use crate::logging::codes;
use crate::tokens::{GroupKind, Token, TokenKind};
use crate::utils::{Position, Spanned};
use crate::{log_debug, log_error, log_success};

pub(crate) struct ScanSession<'a, 'e> {
    pub cursor: Cursor<'a>,
    pub state: LexerState,
    encoder: &'e mut dyn Encoder,
    scanner: &'static str,
    log_error_tokens: bool,
    log_implicit_close: bool,
    tokens_emitted: usize,
    error_tokens: usize,
}

impl<'a, 'e> ScanSession<'a, 'e> {
    pub fn start(
        scanner: &'static str,
        input: &'a str,
        encoder: &'e mut dyn Encoder,
        preferences: &ScannerPreferences,
    ) -> Self {
        log_debug!("Scan started",
            "scanner" => scanner,
            "bytes" => input.len()
        );

        Self {
            cursor: Cursor::new(input),
            state: LexerState::Initial,
            encoder,
            scanner,
            log_error_tokens: preferences.log_error_tokens,
            log_implicit_close: preferences.log_implicit_string_close,
            tokens_emitted: 0,
            error_tokens: 0,
        }
    }

    /// Consume `len` bytes and emit them as one token
    pub fn emit(&mut self, kind: TokenKind, len: usize) -> &'a str {
        let start = self.cursor.position();
        self.cursor.advance_bytes(len);
        self.emit_from(kind, start)
    }

    /// Emit everything consumed since `start` as one token
    pub fn emit_from(&mut self, kind: TokenKind, start: Position) -> &'a str {
        let text = self.cursor.slice_from(start);
        debug_assert!(!text.is_empty(), "empty {} token", kind);

        let span = self.cursor.span_from(start);
        self.encoder
            .text_token(Spanned::new(Token::new(kind, text), span));
        self.tokens_emitted += 1;
        text
    }

    /// Consume one character as an `error` token
    pub fn error_char(&mut self) {
        let start = self.cursor.position();
        if self.cursor.bump().is_none() {
            return;
        }
        let text = self.emit_from(TokenKind::Error, start);
        self.error_tokens += 1;

        if !self.log_error_tokens {
            return;
        }
        if self.error_tokens <= MAX_ERROR_TOKENS_LOGGED {
            log_debug!("Unrecognized character",
                span = self.cursor.span_from(start),
                "code" => codes::lexical::UNRECOGNIZED_CHARACTER,
                "scanner" => self.scanner,
                "char" => text.escape_debug()
            );
        } else if self.error_tokens == MAX_ERROR_TOKENS_LOGGED + 1 {
            log_debug!("Further unrecognized characters not logged",
                "scanner" => self.scanner,
                "limit" => MAX_ERROR_TOKENS_LOGGED
            );
        }
    }

    pub fn begin_string(&mut self) {
        self.encoder.begin_group(GroupKind::String);
        self.state = LexerState::InString;
    }

    pub fn end_string(&mut self) {
        self.encoder.end_group(GroupKind::String);
        self.state = LexerState::Initial;
    }

    /// Build the fault for a state no rule covers, logging it first
    pub fn fault(&self) -> ScanError {
        let err = ScanError::InternalFault {
            lookahead: self.cursor.peek(),
            offset: self.cursor.offset(),
            state: self.state,
            tokens_emitted: self.tokens_emitted,
        };
        log_error!(err.error_code(), &err.to_string(),
            "scanner" => self.scanner,
            "state" => self.state
        );
        err
    }

    /// Close an open string at end of input and log completion
    pub fn finish(mut self) {
        if self.state == LexerState::InString {
            if self.log_implicit_close {
                log_debug!("String closed at end of input",
                    "code" => codes::lexical::UNTERMINATED_STRING,
                    "scanner" => self.scanner,
                    "offset" => self.cursor.offset()
                );
            }
            self.end_string();
        }

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
            "scanner" => self.scanner,
            "tokens" => self.tokens_emitted,
            "error_tokens" => self.error_tokens
        );
    }
}
