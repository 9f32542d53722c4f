//! Scanner for 1C:Enterprise module code (`rus1c`)
//!
//! Words are classified against a bilingual keyword table. A word directly
//! after `Процедура`/`Procedure`, `Функция`/`Function`, or `.` is always an
//! identifier, so declarations and member names that collide with keywords
//! (`Объект.Новый`) are not highlighted as keywords. Strings use `"` only,
//! with `""` as the escape for a quote.

pub mod keywords;
pub mod scanner;

pub use keywords::classify_word;
pub use scanner::Rus1cScanner;
