//! Properties both scanners must hold for any input

use assert_matches::assert_matches;
use rus1c_lexer::encoder::DebugEncoder;
use rus1c_lexer::rus1c_sql::keywords::TABLES;
use rus1c_lexer::tokens::validation::validate_token_stream;
use rus1c_lexer::tokens::TokenEvent;
use rus1c_lexer::{
    highlight_source, Language, Rus1cScanner, Rus1cSqlScanner, Scanner, ScannerPreferences,
    TokenKind,
};

const SAMPLES: &[&str] = &[
    "",
    " ",
    "\"",
    "\\",
    "'",
    "/*",
    "&",
    "#",
    "Процедура МояФункция(Знач А) Экспорт\n\tВозврат А + 1;\nКонецПроцедуры",
    "&НаСервере\nФункция Т()\n\t// комментарий\n\tС = \"a\"\"b\n|c\";\nКонецФункции",
    "ВЫБРАТЬ ПЕРВЫЕ 10 Т.Ссылка КАК Ссылка ИЗ Документ.Заказ КАК Т ГДЕ Т.Дата МЕЖДУ &Начало И &Конец",
    "SELECT x'ff', _utf8'a\\'b', `col`, \"q\"\"q\" FROM t WHERE a <> -1.5e3 /*! hint */ # end",
    "'\\u12'\\N @var 0x 0x1G 017 0178 017.5 1. .5 +.5e 12f \\\n",
    "€ ¤ \u{a0} \u{feff} 😀 \t\r\n",
    "\"unterminated \\",
    "'open ''doubled",
    "Ёлка.ёж = ЁЁ;",
];

fn scanners() -> Vec<Box<dyn Scanner>> {
    vec![Box::new(Rus1cScanner::new()), Box::new(Rus1cSqlScanner::new())]
}

#[test]
fn test_lossless_and_well_formed_on_samples() {
    for scanner in scanners() {
        for sample in SAMPLES {
            let stream = scanner.tokenize(sample).unwrap();
            assert_eq!(&stream.text(), sample, "{} lost input", scanner.name());
            validate_token_stream(&stream, sample)
                .unwrap_or_else(|e| panic!("{} on {:?}: {}", scanner.name(), sample, e));
        }
    }
}

#[test]
fn test_every_prefix_terminates_cleanly() {
    // Truncated buffers are the normal case while editing
    let source = SAMPLES.join("\n");
    for scanner in scanners() {
        for (end, _) in source.char_indices() {
            let prefix = &source[..end];
            let stream = scanner.tokenize(prefix).unwrap();
            assert_eq!(stream.text(), prefix);
        }
    }
}

#[test]
fn test_groups_do_not_nest() {
    let source = "'a' \"b\" `c` x'd'";
    let stream = Rus1cSqlScanner::new().tokenize(source).unwrap();

    let mut depth = 0;
    for event in stream.events() {
        match event {
            TokenEvent::BeginGroup { .. } => {
                depth += 1;
                assert_eq!(depth, 1);
            }
            TokenEvent::EndGroup { .. } => depth -= 1,
            TokenEvent::Text(_) => {}
        }
    }
    assert_eq!(depth, 0);
    assert_eq!(stream.group_count(), 4);
}

#[test]
fn test_error_fallback_consumes_one_character() {
    for scanner in scanners() {
        let stream = scanner.tokenize("a€b").unwrap();
        let kinds: Vec<_> = stream.kinds_and_texts();
        assert_eq!(kinds[1], (TokenKind::Error, "€"), "{}", scanner.name());
        assert_eq!(stream.count_kind(TokenKind::Error), 1);
    }
}

#[test]
fn test_keyword_case_does_not_matter() {
    let scanner = Rus1cScanner::new();
    let kind_of = |word: &str| scanner.tokenize(word).unwrap().kinds_and_texts()[0].0;
    for word in ["procedure", "PROCEDURE", "Procedure", "процедура", "ПРОЦЕДУРА", "ПрОцЕдУрА"] {
        assert_eq!(kind_of(word), TokenKind::Keyword, "{}", word);
    }
}

#[test]
fn test_every_query_table_word_classifies_stably() {
    let scanner = Rus1cSqlScanner::new();
    for (words, _) in TABLES {
        for word in words.iter() {
            let first = scanner.tokenize(word).unwrap().kinds_and_texts()[0].0;
            let upper = scanner.tokenize(&word.to_uppercase()).unwrap().kinds_and_texts()[0].0;
            assert_eq!(first, upper, "{}", word);
            assert_ne!(first, TokenKind::Ident, "{}", word);
        }
    }
}

#[test]
fn test_documented_examples() {
    let render = |scanner: &dyn Scanner, source: &str| {
        let mut out = DebugEncoder::new();
        scanner.scan_tokens(source, &mut out).unwrap();
        out.into_output()
    };
    let a = Rus1cScanner::new();
    let b = Rus1cSqlScanner::new();

    assert_eq!(
        render(&a, "\"ab\"\"cd\""),
        "string<delimiter(\")content(ab)char(\"\")content(cd)delimiter(\")>"
    );
    assert_eq!(render(&a, "Процедура МояФункция"), "keyword(Процедура) ident(МояФункция)");
    assert_eq!(
        render(&b, "x\"48656c6c6f\""),
        "string<modifier(x)delimiter(\")content(48656c6c6f)delimiter(\")>"
    );
    assert_eq!(
        render(&b, "0x1A 017 017.5 3.14e10"),
        "hex(0x1A) octal(017) float(017.5) float(3.14e10)"
    );
    assert_eq!(render(&a, "\"abc"), "string<delimiter(\")content(abc)>");
}

#[test]
fn test_language_registry() {
    assert_eq!(Language::for_name("Rus1c"), Some(Language::Rus1c));
    assert_eq!(Language::for_extension("1C"), Some(Language::Rus1c));
    assert_eq!(Language::for_extension("sql"), None);

    let prefs = ScannerPreferences::default();
    for language in Language::ALL {
        let scanner = language.scanner(prefs.clone());
        assert_eq!(scanner.name(), language.name());
    }
    assert_eq!(Rus1cScanner::new().file_extension(), Some("1c"));
    assert_eq!(Rus1cSqlScanner::new().file_extension(), None);
}

#[test]
fn test_scanners_share_across_threads() {
    let scanner = std::sync::Arc::new(Rus1cSqlScanner::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let scanner = scanner.clone();
            std::thread::spawn(move || {
                let source = format!("ВЫБРАТЬ {} ИЗ Т", i);
                scanner.tokenize(&source).map(|s| s.text())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let text = handle.join().unwrap();
        assert_matches!(text, Ok(ref t) if *t == format!("ВЫБРАТЬ {} ИЗ Т", i));
    }
}

#[test]
fn test_highlight_never_fails_on_text_input() {
    let prefs = ScannerPreferences::default();
    for language in Language::ALL {
        for sample in SAMPLES {
            let result = highlight_source(language, sample, &prefs);
            assert_matches!(result, Ok(_));
        }
    }
}
