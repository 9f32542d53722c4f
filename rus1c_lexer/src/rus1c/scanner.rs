use super::keywords::{classify_word, is_name_follows_word};
use crate::config::ScannerPreferences;
use crate::encoder::Encoder;
use crate::scanner::session::ScanSession;
use crate::scanner::{
    digits_len, is_space, is_word_char, is_word_letter, LexerState, ScanError, Scanner,
};
use crate::tokens::TokenKind;

/// Scanner for 1C:Enterprise module code
#[derive(Debug, Clone, Default)]
pub struct Rus1cScanner {
    preferences: ScannerPreferences,
}

impl Rus1cScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: ScannerPreferences) -> Self {
        Self { preferences }
    }
}

impl Scanner for Rus1cScanner {
    fn name(&self) -> &'static str {
        "rus1c"
    }

    fn file_extension(&self) -> Option<&'static str> {
        Some("1c")
    }

    fn scan_tokens(&self, input: &str, encoder: &mut dyn Encoder) -> Result<(), ScanError> {
        let mut session = ScanSession::start(self.name(), input, encoder, &self.preferences);

        // Set by `procedure`, `function` and `.`; the next word is a plain name.
        // Layout, comments, directives and error tokens leave it untouched.
        let mut name_follows = false;

        while !session.cursor.is_eof() {
            match session.state {
                LexerState::Initial => {
                    let rest = session.cursor.rest();

                    if let Some(len) = match_space(rest) {
                        session.emit(TokenKind::Space, len);
                    } else if rest.starts_with('#') {
                        session.emit(TokenKind::Preprocessor, line_len(rest));
                    } else if rest.starts_with('&') && line_len(rest) > 1 {
                        session.emit(TokenKind::Directive, line_len(rest));
                    } else if rest.starts_with("//") {
                        session.emit(TokenKind::Comment, line_len(rest));
                    } else if let Some(len) = match_operator(rest) {
                        let op = session.emit(TokenKind::Operator, len);
                        name_follows = op == ".";
                    } else if let Some(len) = match_word(rest) {
                        let word = &rest[..len];
                        let kind = if name_follows {
                            TokenKind::Ident
                        } else {
                            classify_word(word)
                        };
                        session.emit(kind, len);
                        name_follows = is_name_follows_word(word);
                    } else if rest.starts_with('"') {
                        session.begin_string();
                        session.emit(TokenKind::Delimiter, 1);
                        name_follows = false;
                    } else if let Some(len) = match_integer(rest) {
                        session.emit(TokenKind::Integer, len);
                        name_follows = false;
                    } else if let Some(len) = match_float(rest) {
                        session.emit(TokenKind::Float, len);
                        name_follows = false;
                    } else {
                        session.error_char();
                    }
                }

                LexerState::InString => {
                    let rest = session.cursor.rest();
                    let content = rest.find('"').unwrap_or(rest.len());

                    if content > 0 {
                        session.emit(TokenKind::Content, content);
                    } else if rest.starts_with("\"\"") {
                        session.emit(TokenKind::Char, 2);
                    } else if rest.starts_with('"') {
                        session.emit(TokenKind::Delimiter, 1);
                        session.end_string();
                    } else {
                        return Err(session.fault());
                    }
                    name_follows = false;
                }
            }
        }

        session.finish();
        Ok(())
    }
}

fn match_space(rest: &str) -> Option<usize> {
    let len: usize = rest
        .chars()
        .take_while(|&c| is_space(c))
        .map(char::len_utf8)
        .sum();
    (len > 0).then_some(len)
}

/// Bytes up to, not including, the next line feed
fn line_len(rest: &str) -> usize {
    rest.find('\n').unwrap_or(rest.len())
}

fn match_operator(rest: &str) -> Option<usize> {
    let mut chars = rest.chars();
    let first = chars.next()?;
    let second = chars.next();

    let len = match (first, second) {
        ('<', Some('>' | '=')) | ('>', Some('=')) | (':', Some('=')) => 2,
        ('<' | '>' | ':', _) => 1,
        ('-' | '+' | '=' | '*' | '/' | ';' | ',' | '?' | '%' | '|', _) => 1,
        ('(' | ')' | '[' | ']' | '.', _) => 1,
        _ => return None,
    };
    Some(len)
}

/// A word may also start with `#` or `&`; both only reach here when the
/// line rules above did not take them.
fn match_word(rest: &str) -> Option<usize> {
    let first = rest.chars().next()?;
    if !(is_word_letter(first) || matches!(first, '_' | '#' | '&')) {
        return None;
    }
    let tail: usize = rest[first.len_utf8()..]
        .chars()
        .take_while(|&c| is_word_char(c))
        .map(char::len_utf8)
        .sum();
    Some(first.len_utf8() + tail)
}

/// Digits not followed by a fraction, which belongs to the float rule
fn match_integer(rest: &str) -> Option<usize> {
    let int = digits_len(rest);
    if int == 0 || match_fraction(&rest[int..]).is_some() {
        return None;
    }
    Some(int)
}

fn match_float(rest: &str) -> Option<usize> {
    let int = digits_len(rest);
    if int == 0 {
        return None;
    }
    match_fraction(&rest[int..]).map(|frac| int + frac)
}

/// `.` followed by at least one digit
fn match_fraction(rest: &str) -> Option<usize> {
    let digits = digits_len(rest.strip_prefix('.')?);
    (digits > 0).then_some(1 + digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::DebugEncoder;
    use crate::tokens::validation::validate_token_stream;

    fn kinds(input: &str) -> Vec<(TokenKind, String)> {
        Rus1cScanner::new()
            .tokenize(input)
            .unwrap()
            .tokens()
            .map(|t| (t.value.kind, t.value.text.clone()))
            .collect()
    }

    fn debug(input: &str) -> String {
        let mut out = DebugEncoder::new();
        Rus1cScanner::new().scan_tokens(input, &mut out).unwrap();
        out.into_output()
    }

    #[test]
    fn test_procedure_header() {
        assert_eq!(
            debug("Процедура МояФункция(Знач А) Экспорт"),
            "keyword(Процедура) ident(МояФункция)operator(()keyword(Знач) ident(А)operator(\\)) keyword(Экспорт)"
        );
    }

    #[test]
    fn test_name_follows_overrides_keywords() {
        assert_eq!(
            kinds("Function Если"),
            vec![
                (TokenKind::Keyword, "Function".to_string()),
                (TokenKind::Space, " ".to_string()),
                (TokenKind::Ident, "Если".to_string()),
            ]
        );
        assert_eq!(
            kinds("Объект.Новый")[2],
            (TokenKind::Ident, "Новый".to_string())
        );
        // Only the very next word is affected
        assert_eq!(kinds("Процедура А Если")[4].0, TokenKind::Keyword);
    }

    #[test]
    fn test_name_follows_survives_comments_and_errors() {
        let tokens = kinds("Процедура // имя ниже\n  Если");
        assert_eq!(tokens.last().map(|t| t.0), Some(TokenKind::Ident));

        let tokens = kinds("Процедура€Если");
        assert_eq!(tokens[1].0, TokenKind::Error);
        assert_eq!(tokens[2].0, TokenKind::Ident);
    }

    #[test]
    fn test_lines() {
        assert_eq!(
            debug("#Если Сервер Тогда\n&НаКлиенте\n// note"),
            "preprocessor(#Если Сервер Тогда)\ndirective(&НаКлиенте)\ncomment(// note)"
        );
    }

    #[test]
    fn test_lone_ampersand_is_a_word() {
        assert_eq!(kinds("&")[0], (TokenKind::Ident, "&".to_string()));
        assert_eq!(kinds("&\n")[0], (TokenKind::Ident, "&".to_string()));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            debug("А<>Б<=В>=Г:=Д<Е>Ж:З"),
            "ident(А)operator(<>)ident(Б)operator(<=)ident(В)operator(>=)ident(Г)operator(:=)\
             ident(Д)operator(<)ident(Е)operator(>)ident(Ж)operator(:)ident(З)"
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(debug("12"), "integer(12)");
        assert_eq!(debug("3.14"), "float(3.14)");
        assert_eq!(debug("3."), "integer(3)operator(.)");
        assert_eq!(debug("3.x"), "integer(3)operator(.)ident(x)");
    }

    #[test]
    fn test_doubled_quote_is_one_char_token() {
        assert_eq!(
            debug("\"ab\"\"cd\""),
            "string<delimiter(\")content(ab)char(\"\")content(cd)delimiter(\")>"
        );
        assert_eq!(debug("\"\""), "string<delimiter(\")delimiter(\")>");
    }

    #[test]
    fn test_multiline_string() {
        assert_eq!(
            debug("\"а\n|б\""),
            "string<delimiter(\")content(а\n|б)delimiter(\")>"
        );
    }

    #[test]
    fn test_unterminated_string_closes_group() {
        assert_eq!(debug("\"abc"), "string<delimiter(\")content(abc)>");
        assert_eq!(debug("\""), "string<delimiter(\")>");
    }

    #[test]
    fn test_error_token_and_resume() {
        assert_eq!(
            debug("А = 1 € 2;"),
            "ident(А) operator(=) integer(1) error(€) integer(2)operator(;)"
        );
        assert_eq!(debug("!"), "error(!)");
        assert_eq!(debug("\u{a0}"), "error(\u{a0})");
    }

    #[test]
    fn test_stream_is_well_formed() {
        let source = "Процедура Тест()\n\tСтрока = \"a\"\"b\";\n\tЕсли Истина Тогда\n\t\tВозврат;\nКонецЕсли;\nКонецПроцедуры\n\"open";
        let stream = Rus1cScanner::new().tokenize(source).unwrap();
        validate_token_stream(&stream, source).unwrap();
        assert_eq!(stream.text(), source);
    }
}
