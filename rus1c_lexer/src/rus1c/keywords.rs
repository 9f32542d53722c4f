//! Word tables for 1C:Enterprise module code

use crate::tokens::TokenKind;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Reserved words, English and Russian spellings side by side
pub const KEYWORDS: &[&str] = &[
    "If", "Если", "Then", "Тогда", "ElsIf", "ИначеЕсли", "Else", "Иначе", "EndIf", "КонецЕсли",
    "Do", "Цикл", "For", "Для", "To", "По", "Each", "Каждого", "In", "Из", "While", "Пока",
    "EndDo", "КонецЦикла",
    "Procedure", "Процедура", "EndProcedure", "КонецПроцедуры",
    "Function", "Функция", "EndFunction", "КонецФункции",
    "Var", "Перем", "Export", "Экспорт", "Val", "Знач", "Goto", "Перейти",
    "And", "И", "Or", "Или", "Not", "Не",
    "Break", "Прервать", "Continue", "Продолжить", "Return", "Возврат",
    "Try", "Попытка", "Except", "Исключение", "EndTry", "КонецПопытки",
    "Raise", "ВызватьИсключение",
    "False", "Ложь", "True", "Истина", "Undefined", "Неопределено", "Null",
    "New", "Новый", "Execute", "Выполнить",
    "AddHandler", "ДобавитьОбработчик", "RemoveHandler", "УдалитьОбработчик",
];

/// Compilation directives placed before a procedure or function
pub const DIRECTIVES: &[&str] = &[
    "&НаКлиенте",
    "&НаСервере",
    "&НаСервереБезКонтекста",
    "&НаКлиентеНаСервереБезКонтекста",
    "&AtClient",
    "&AtServer",
    "&AtServerNoContext",
    "&AtClientAtServerNoContext",
];

/// Words after which the next word names a declaration or a member
pub const NAME_FOLLOWS: &[&str] = &["procedure", "function", "процедура", "функция"];

static WORD_KINDS: OnceLock<HashMap<String, TokenKind>> = OnceLock::new();

fn word_kinds() -> &'static HashMap<String, TokenKind> {
    WORD_KINDS.get_or_init(|| {
        let mut kinds = HashMap::with_capacity(KEYWORDS.len() + DIRECTIVES.len());
        for word in KEYWORDS {
            kinds.entry(word.to_lowercase()).or_insert(TokenKind::Keyword);
        }
        for word in DIRECTIVES {
            kinds.entry(word.to_lowercase()).or_insert(TokenKind::Directive);
        }
        kinds
    })
}

/// Classify a word regardless of case; unknown words are identifiers
pub fn classify_word(word: &str) -> TokenKind {
    word_kinds()
        .get(&word.to_lowercase())
        .copied()
        .unwrap_or(TokenKind::Ident)
}

/// Whether `word` puts the scanner into name-follows context
pub fn is_name_follows_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    NAME_FOLLOWS.contains(&lower.as_str())
}
