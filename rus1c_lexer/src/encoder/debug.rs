use super::Encoder;
use crate::tokens::{GroupKind, SpannedToken, TokenKind, TokenStream};

/// Compact text rendering of a token stream
///
/// Whitespace is written as-is, every other token as `kind(text)` and each
/// group as `kind<...>`. Inside the parentheses `)` and `\` are escaped with
/// a backslash so the rendering stays unambiguous.
///
/// ```
/// use rus1c_lexer::encoder::DebugEncoder;
/// use rus1c_lexer::scanner::Language;
/// use rus1c_lexer::config::ScannerPreferences;
///
/// let scanner = Language::Rus1c.scanner(ScannerPreferences::default());
/// let mut out = DebugEncoder::new();
/// scanner.scan_tokens("А = 1;", &mut out).unwrap();
/// assert_eq!(out.output(), "ident(А) operator(=) integer(1)operator(;)");
/// ```
#[derive(Debug, Default, Clone)]
pub struct DebugEncoder {
    out: String,
}

impl DebugEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn into_output(self) -> String {
        self.out
    }

    /// Render an already collected stream
    pub fn render(stream: &TokenStream) -> String {
        let mut encoder = Self::new();
        for event in stream.events() {
            match event {
                crate::tokens::TokenEvent::Text(token) => encoder.text_token(token.clone()),
                crate::tokens::TokenEvent::BeginGroup { group } => encoder.begin_group(*group),
                crate::tokens::TokenEvent::EndGroup { group } => encoder.end_group(*group),
            }
        }
        encoder.out
    }
}

impl Encoder for DebugEncoder {
    fn text_token(&mut self, token: SpannedToken) {
        let token = token.value;
        if token.kind == TokenKind::Space {
            self.out.push_str(&token.text);
            return;
        }

        self.out.push_str(token.kind.as_str());
        self.out.push('(');
        for ch in token.text.chars() {
            if ch == ')' || ch == '\\' {
                self.out.push('\\');
            }
            self.out.push(ch);
        }
        self.out.push(')');
    }

    fn begin_group(&mut self, kind: GroupKind) {
        self.out.push_str(kind.as_str());
        self.out.push('<');
    }

    fn end_group(&mut self, _kind: GroupKind) {
        self.out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Token;
    use crate::utils::{Position, Span, Spanned};

    fn token(kind: TokenKind, text: &str) -> SpannedToken {
        Spanned::new(Token::new(kind, text), Span::default())
    }

    #[test]
    fn test_escapes_closing_paren_and_backslash() {
        let mut encoder = DebugEncoder::new();
        encoder.text_token(token(TokenKind::Operator, ")"));
        encoder.text_token(token(TokenKind::Char, "\\n"));
        assert_eq!(encoder.output(), "operator(\\))char(\\\\n)");
    }

    #[test]
    fn test_groups_and_space() {
        let mut encoder = DebugEncoder::new();
        encoder.text_token(token(TokenKind::Space, " \n"));
        encoder.begin_group(GroupKind::String);
        encoder.text_token(token(TokenKind::Delimiter, "\""));
        encoder.end_group(GroupKind::String);
        assert_eq!(encoder.into_output(), " \nstring<delimiter(\")>");
    }

    #[test]
    fn test_render_matches_live_encoding() {
        let mut stream = TokenStream::new();
        let start = Position::start();
        stream.text_token(Spanned::new(
            Token::new(TokenKind::Keyword, "Если"),
            Span::new(start, start.advance_str("Если")),
        ));
        assert_eq!(DebugEncoder::render(&stream), "keyword(Если)");
    }
}
