//! Word tables for the 1C:Enterprise query language
//!
//! A word found in several tables takes the kind of the first table in
//! [`TABLES`] order.

use crate::tokens::TokenKind;
use std::collections::HashMap;
use std::sync::OnceLock;

pub const KEYWORDS: &[&str] = &[
    "AND", "И", "OR", "ИЛИ", "IN", "В", "HIERARCHY", "ИЕРАРХИИ", "NOT", "НЕ",
    "BETWEEN", "МЕЖДУ", "LIKE", "ПОДОБНО", "ESCAPE", "СПЕЦСИМВОЛ", "NULL", "IS", "ЕСТЬ",
    "CASE", "ВЫБОР", "WHEN", "КОГДА", "THEN", "ТОГДА", "ELSE", "ИНАЧЕ", "END", "КОНЕЦ",
    "CAST", "ВЫРАЗИТЬ", "TRUE", "ИСТИНА", "FALSE", "ЛОЖЬ", "REFS", "ССЫЛКА",
    "UNDEFINED", "НЕОПРЕДЕЛЕНО", "DAY", "ДЕНЬ", "HOUR", "ЧАС", "MINUTE", "МИНУТА",
    "MONTH", "МЕСЯЦ", "QUARTER", "КВАРТАЛ", "SECOND", "СЕКУНДА", "WEEK", "НЕДЕЛЯ",
    "YEAR", "ГОД", "TENDAYS", "ДЕКАДА", "HALFYEAR", "ПОЛУГОДИЕ",
];

/// Schema object names, highlighted as types
pub const OBJECTS: &[&str] = &[
    "database", "databases", "table", "tables", "column", "columns", "fields", "index",
    "constraint", "constraints", "transaction", "function", "procedure", "row", "key",
    "view", "trigger",
];

/// Clause and command words, highlighted as classes
pub const COMMANDS: &[&str] = &[
    "SELECT", "ВЫБРАТЬ", "FROM", "ИЗ", "WHERE", "ГДЕ", "ORDER", "УПОРЯДОЧИТЬ", "BY", "ПО",
    "ON", "DESC", "УБЫВ", "HIERARCHY", "ИЕРАРХИЯ", "ONLY", "ТОЛЬКО", "GROUP", "СГРУППИРОВАТЬ",
    "DISTINCT", "РАЗЛИЧНЫЕ", "TOP", "ПЕРВЫЕ", "HAVING", "ИМЕЮЩИЕ",
    "LEFT", "ЛЕВОЕ", "RIGHT", "ПРАВОЕ", "FULL", "ПОЛНОЕ", "INNER", "ВНУТРЕННЕЕ",
    "JOIN", "СОЕДИНЕНИЕ", "UNION", "ОБЪЕДИНИТЬ", "ALL", "ВСЕ",
    "NUMBER", "ЧИСЛО", "BOOLEAN", "БУЛЕВО", "STRING", "СТРОКА", "DATE", "ДАТА", "AS", "КАК",
    "TOTALS", "ИТОГИ", "OVERALL", "ОБЩИЕ", "AUTOORDER", "АВТОУПОРЯДОЧИВАНИЕ",
    "PERIODS", "ПЕРИОДАМИ", "FOR", "ДЛЯ", "UPDATE", "ИЗМЕНЕНИЯ", "ALLOWED", "РАЗРЕШЕННЫЕ",
    "INTO", "ПОМЕСТИТЬ", "DROP", "УНИЧТОЖИТЬ", "INDEX", "ИНДЕКСИРОВАТЬ",
    "VALUE", "ЗНАЧЕНИЕ", "VALUETYPE", "ТИПЗНАЧЕНИЯ", "TYPE", "ТИП",
    "CHARACTERISTICS", "ХАРАКТЕРИСТИКИ", "CHARACTERISTICTYPES", "ВИДЫХАРАКТЕРИСТИК",
    "LIST", "СПИСОК", "KEYFIELD", "ПОЛЕКЛЮЧА", "ID", "ИДЕНТИФИКАТОР",
    "NAMEFIELD", "ПОЛЕИМЕНИ", "NAME", "ИМЯ", "VALUETYPEFIELD", "ПОЛЕТИПАЗНАЧЕНИЯ",
    "CHARACTERISTICVALUES", "ЗНАЧЕНИЯХАРАКТЕРИСТИК", "VALUES", "ЗНАЧЕНИЯ",
    "OBJECTFIELD", "ПОЛЕОБЪЕКТА", "OBJECT", "ОБЪЕКТ", "TYPEFIELD", "ПОЛЕВИДА",
    "CHARACTERISTIC", "ХАРАКТЕРИСТИКА", "VALUEFIELD", "ПОЛЕЗНАЧЕНИЯ",
];

pub const PREDEFINED_TYPES: &[&str] = &[
    "char", "varchar", "varchar2", "enum", "binary", "text", "tinytext", "mediumtext",
    "longtext", "blob", "tinyblob", "mediumblob", "longblob", "timestamp", "date", "time",
    "datetime", "year", "double", "decimal", "float", "int", "integer", "tinyint",
    "mediumint", "bigint", "smallint", "unsigned", "bit", "bool", "boolean", "hex", "bin",
    "oct",
];

pub const PREDEFINED_CONSTANTS: &[&str] = &["null", "true", "false"];

pub const PREDEFINED_FUNCTIONS: &[&str] = &[
    "sum", "cast", "substring", "abs", "pi", "count", "min", "max", "avg", "now",
];

pub const DIRECTIVES: &[&str] = &[
    "auto_increment", "unique", "default", "charset", "initially", "deferred", "deferrable",
    "cascade", "immediate", "read", "write", "asc", "desc", "after", "primary", "foreign",
    "return", "engine",
];

/// Tables in classification priority order
pub const TABLES: &[(&[&str], TokenKind)] = &[
    (KEYWORDS, TokenKind::Keyword),
    (OBJECTS, TokenKind::Type),
    (COMMANDS, TokenKind::Class),
    (PREDEFINED_TYPES, TokenKind::PredefinedType),
    (PREDEFINED_CONSTANTS, TokenKind::PredefinedConstant),
    (PREDEFINED_FUNCTIONS, TokenKind::Predefined),
    (DIRECTIVES, TokenKind::Directive),
];

static WORD_KINDS: OnceLock<HashMap<String, TokenKind>> = OnceLock::new();

fn word_kinds() -> &'static HashMap<String, TokenKind> {
    WORD_KINDS.get_or_init(|| {
        let mut kinds = HashMap::new();
        for (words, kind) in TABLES {
            for word in words.iter() {
                kinds.entry(word.to_lowercase()).or_insert(*kind);
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_table_classifies() {
        assert_eq!(classify_word("ВЫБРАТЬ"), TokenKind::Class);
        assert_eq!(classify_word("ГДЕ"), TokenKind::Class);
        assert_eq!(classify_word("МЕЖДУ"), TokenKind::Keyword);
        assert_eq!(classify_word("trigger"), TokenKind::Type);
        assert_eq!(classify_word("varchar"), TokenKind::PredefinedType);
        assert_eq!(classify_word("count"), TokenKind::Predefined);
        assert_eq!(classify_word("engine"), TokenKind::Directive);
        assert_eq!(classify_word("Номенклатура"), TokenKind::Ident);
    }

    #[test]
    fn test_first_table_wins() {
        // keyword over predefined constant and predefined function
        assert_eq!(classify_word("null"), TokenKind::Keyword);
        assert_eq!(classify_word("cast"), TokenKind::Keyword);
        // type over class
        assert_eq!(classify_word("index"), TokenKind::Type);
        // class over predefined type and directive
        assert_eq!(classify_word("date"), TokenKind::Class);
        assert_eq!(classify_word("desc"), TokenKind::Class);
        // keyword over predefined type
        assert_eq!(classify_word("year"), TokenKind::Keyword);
    }

    #[test]
    fn test_classification_ignores_case() {
        for word in ["выбрать", "Выбрать", "ВЫБРАТЬ", "select", "SeLeCt"] {
            assert_eq!(classify_word(word), TokenKind::Class, "{}", word);
        }
        assert_eq!(classify_word("Varchar2"), TokenKind::PredefinedType);
    }
}
