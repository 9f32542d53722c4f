use super::keywords::classify_word;
use crate::config::ScannerPreferences;
use crate::encoder::Encoder;
use crate::scanner::session::ScanSession;
use crate::scanner::{
    digits_len, is_space, is_word_char, is_word_letter, LexerState, ScanError, Scanner,
};
use crate::tokens::TokenKind;
use crate::utils::Position;

const QUOTES: [char; 3] = ['`', '"', '\''];

/// Scanner for the 1C:Enterprise query language
#[derive(Debug, Clone, Default)]
pub struct Rus1cSqlScanner {
    preferences: ScannerPreferences,
}

impl Rus1cSqlScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: ScannerPreferences) -> Self {
        Self { preferences }
    }
}

impl Scanner for Rus1cSqlScanner {
    fn name(&self) -> &'static str {
        "rus1c_sql"
    }

    fn file_extension(&self) -> Option<&'static str> {
        None
    }

    fn scan_tokens(&self, input: &str, encoder: &mut dyn Encoder) -> Result<(), ScanError> {
        let mut session = ScanSession::start(self.name(), input, encoder, &self.preferences);

        // Set by a `.` directly followed by a letter; cleared by the next word
        let mut name_expected = false;
        // Quote that opened the current string
        let mut string_quote = '"';
        // Start of string content not yet emitted
        let mut pending: Option<Position> = None;

        while !session.cursor.is_eof() {
            match session.state {
                LexerState::Initial => {
                    let rest = session.cursor.rest();

                    if let Some(len) = match_space(rest) {
                        session.emit(TokenKind::Space, len);
                    } else if rest.starts_with("//") || rest.starts_with('#') {
                        session.emit(TokenKind::Comment, line_len(rest));
                    } else if let Some((len, bang)) = match_block_comment(rest) {
                        let kind = if bang {
                            TokenKind::Directive
                        } else {
                            TokenKind::Comment
                        };
                        session.emit(kind, len);
                    } else if let Some(len) = match_operator(rest) {
                        let op = session.emit(TokenKind::Operator, len);
                        if op == "." && session.cursor.peek().is_some_and(starts_word) {
                            name_expected = true;
                        }
                    } else if let Some((prefix, quote)) = match_string_open(rest) {
                        session.begin_string();
                        if prefix > 0 {
                            session.emit(TokenKind::Modifier, prefix);
                        }
                        session.emit(TokenKind::Delimiter, quote.len_utf8());
                        string_quote = quote;
                    } else if let Some(len) = match_word(rest) {
                        let word = &rest[..len];
                        let kind = if name_expected {
                            TokenKind::Ident
                        } else if word.starts_with('@') {
                            TokenKind::Variable
                        } else {
                            classify_word(word)
                        };
                        session.emit(kind, len);
                        name_expected = false;
                    } else if let Some(len) = match_hex(rest) {
                        session.emit(TokenKind::Hex, len);
                    } else if let Some(len) = match_octal(rest) {
                        session.emit(TokenKind::Octal, len);
                    } else if let Some(len) = match_integer(rest) {
                        session.emit(TokenKind::Integer, len);
                    } else if let Some(len) = match_float(rest) {
                        session.emit(TokenKind::Float, len);
                    } else if rest.starts_with("\\N") {
                        session.emit(TokenKind::PredefinedConstant, 2);
                    } else {
                        session.error_char();
                    }
                }

                LexerState::InString => {
                    let rest = session.cursor.rest();
                    let run = rest.find(['\\', '`', '"', '\'']).unwrap_or(rest.len());

                    if run > 0 {
                        let start = session.cursor.position();
                        pending.get_or_insert(start);
                        session.cursor.advance_bytes(run);
                    } else if rest.starts_with(string_quote) {
                        let quote = string_quote.len_utf8();
                        if rest[quote..].starts_with(string_quote) {
                            let start = session.cursor.position();
                            pending.get_or_insert(start);
                            session.cursor.advance_bytes(2 * quote);
                        } else {
                            if let Some(start) = pending.take() {
                                session.emit_from(TokenKind::Content, start);
                            }
                            session.emit(TokenKind::Delimiter, quote);
                            session.end_string();
                        }
                    } else if rest.starts_with(QUOTES) {
                        // A quote other than the opening one is plain content
                        let start = session.cursor.position();
                        pending.get_or_insert(start);
                        session.cursor.bump();
                    } else if let Some(len) = match_escape(rest) {
                        if let Some(start) = pending.take() {
                            session.emit_from(TokenKind::Content, start);
                        }
                        session.emit(TokenKind::Char, len);
                    } else if rest == "\\" {
                        if let Some(start) = pending.take() {
                            session.emit_from(TokenKind::Content, start);
                        }
                        session.error_char();
                        session.end_string();
                    } else {
                        return Err(session.fault());
                    }
                }
            }
        }

        if let Some(start) = pending.take() {
            session.emit_from(TokenKind::Content, start);
        }
        session.finish();
        Ok(())
    }
}

/// Whitespace run or a backslash line continuation
fn match_space(rest: &str) -> Option<usize> {
    let len: usize = rest
        .chars()
        .take_while(|&c| is_space(c))
        .map(char::len_utf8)
        .sum();
    if len > 0 {
        Some(len)
    } else if rest.starts_with("\\\n") {
        Some(2)
    } else {
        None
    }
}

fn line_len(rest: &str) -> usize {
    rest.find('\n').unwrap_or(rest.len())
}

/// `/* ... */`, or to end of input when unclosed. The flag is set for the
/// `/*!` form.
fn match_block_comment(rest: &str) -> Option<(usize, bool)> {
    let body = rest.strip_prefix("/*")?;
    let bang = body.starts_with('!');
    let open = if bang { 3 } else { 2 };
    let len = match rest[open..].find("*/") {
        Some(end) => open + end + 2,
        None => rest.len(),
    };
    Some((len, bang))
}

/// Single-character operators; a sign or dot counts only when no digit
/// follows, otherwise it belongs to a number
fn match_operator(rest: &str) -> Option<usize> {
    let mut chars = rest.chars();
    let first = chars.next()?;
    match first {
        '*' | '/' | '=' | '<' | '>' | ':' | ';' | ',' | '!' | '&' | '^' | '|' => Some(1),
        '(' | ')' | '[' | ']' | '{' | '}' | '~' | '%' => Some(1),
        '-' | '+' | '.' if !chars.next().is_some_and(|c| c.is_ascii_digit()) => Some(1),
        _ => None,
    }
}

fn starts_word(ch: char) -> bool {
    is_word_letter(ch) || ch == '_'
}

/// Optional prefix (`x`, `n`, `b` or `_name`) and the opening quote.
/// Returns the prefix length in bytes and the quote.
fn match_string_open(rest: &str) -> Option<(usize, char)> {
    let quote_at = |at: usize| {
        rest[at..]
            .chars()
            .next()
            .filter(|c| QUOTES.contains(c))
            .map(|c| (at, c))
    };

    let first = rest.chars().next()?;
    if QUOTES.contains(&first) {
        return Some((0, first));
    }
    if matches!(first, 'x' | 'X' | 'n' | 'N' | 'b' | 'B') {
        if let Some(open) = quote_at(1) {
            return Some(open);
        }
    }
    if first == '_' {
        let name = rest[1..]
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        if name > 0 {
            return quote_at(1 + name);
        }
    }
    None
}

/// Word with an optional `@` sigil
fn match_word(rest: &str) -> Option<usize> {
    let sigil = usize::from(rest.starts_with('@'));
    let first = rest[sigil..].chars().next().filter(|&c| starts_word(c))?;
    let head = sigil + first.len_utf8();
    let tail: usize = rest[head..]
        .chars()
        .take_while(|&c| is_word_char(c))
        .map(char::len_utf8)
        .sum();
    Some(head + tail)
}

fn match_hex(rest: &str) -> Option<usize> {
    let digits = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))?
        .bytes()
        .take_while(u8::is_ascii_hexdigit)
        .count();
    (digits > 0).then_some(2 + digits)
}

/// `0` and octal digits, the whole run, with no decimal digit, fraction,
/// exponent or suffix after it
fn match_octal(rest: &str) -> Option<usize> {
    let digits = rest
        .strip_prefix('0')?
        .bytes()
        .take_while(|b| (b'0'..=b'7').contains(b))
        .count();
    if digits == 0 {
        return None;
    }
    let len = 1 + digits;
    match rest[len..].chars().next() {
        Some('8' | '9' | '.' | 'e' | 'E' | 'f' | 'F') => None,
        _ => Some(len),
    }
}

fn sign_len(rest: &str) -> usize {
    usize::from(rest.starts_with(['-', '+']))
}

/// Signed digit run that does not continue as a float
fn match_integer(rest: &str) -> Option<usize> {
    let sign = sign_len(rest);
    let digits = digits_len(&rest[sign..]);
    if digits == 0 {
        return None;
    }
    let len = sign + digits;
    match rest[len..].chars().next() {
        Some('.' | 'e' | 'E' | 'f' | 'F') => None,
        _ => Some(len),
    }
}

/// `12f`, `.5`, `1.5`, `1.5e-3` or `15e3`, optionally signed
fn match_float(rest: &str) -> Option<usize> {
    let sign = sign_len(rest);
    let body = &rest[sign..];
    let int = digits_len(body);

    if int > 0 && body[int..].starts_with(['f', 'F']) {
        return Some(sign + int + 1);
    }

    if let Some(frac) = body[int..].strip_prefix('.') {
        let digits = digits_len(frac);
        if digits > 0 {
            let len = int + 1 + digits;
            let exp = exponent_len(&body[len..]).unwrap_or(0);
            return Some(sign + len + exp);
        }
    }

    if int > 0 {
        return exponent_len(&body[int..]).map(|exp| sign + int + exp);
    }
    None
}

/// `e` or `E`, an optional sign, and at least one digit
fn exponent_len(rest: &str) -> Option<usize> {
    let after = rest.strip_prefix(['e', 'E'])?;
    let sign = sign_len(after);
    let digits = digits_len(&after[sign..]);
    (digits > 0).then_some(1 + sign + digits)
}

/// Backslash escape inside a string. Unicode forms are tried first, then
/// single-character codes, `\x` with one or two hex digits, one to three
/// octal digits, and finally any character.
fn match_escape(rest: &str) -> Option<usize> {
    let body = rest.strip_prefix('\\')?;
    let hex_run = |s: &str, max: usize| {
        s.bytes()
            .take(max)
            .take_while(u8::is_ascii_hexdigit)
            .count()
    };

    if let Some(code) = body.strip_prefix('u') {
        if hex_run(code, 4) == 4 {
            return Some(6);
        }
    }
    if let Some(code) = body.strip_prefix('U') {
        if hex_run(code, 8) == 8 {
            return Some(10);
        }
    }

    let first = body.chars().next()?;
    if first == 'x' {
        let digits = hex_run(&body[1..], 2);
        if digits > 0 {
            return Some(2 + digits);
        }
    }
    if ('0'..='7').contains(&first) {
        let digits = body
            .bytes()
            .take(3)
            .take_while(|b| (b'0'..=b'7').contains(b))
            .count();
        return Some(1 + digits);
    }
    Some(1 + first.len_utf8())
}
