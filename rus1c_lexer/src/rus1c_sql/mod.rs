//! Scanner for the 1C:Enterprise query language (`rus1c_sql`)
//!
//! A SQL-like dialect with Russian and English clause words. Words are
//! classified against seven tables in a fixed priority (see
//! [`keywords::TABLES`]); an `@` word is a variable and a word right after a
//! member-access `.` is always an identifier. Strings may be quoted with
//! `'`, `"` or `` ` ``, carry a prefix such as `x` or `_utf8`, and use both
//! quote doubling and backslash escapes.

pub mod keywords;
pub mod scanner;

pub use keywords::classify_word;
pub use scanner::Rus1cSqlScanner;
