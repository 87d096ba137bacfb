//! PHP table loader
//!
//! Configuration written as a PHP file that returns an array literal:
//!
//! ```php
//! <?php
//! return [
//!     'debug' => true,
//!     'db' => array('host' => "local", 'port' => 5432),
//!     'hosts' => ['a', 'b'],
//! ];
//! ```
//!
//! The file is never executed. Only the data subset is accepted: array
//! literals, quoted strings, numbers, `true`/`false`/`null` and comments.
//! Variables, constants, calls and operators are parse errors.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::{FormatLoader, Mapping, source_text};

const FORMAT: &str = "PHP table";

/// Loader for data-only PHP array files
#[derive(Debug, Default)]
pub struct TableLoader;

impl TableLoader {
    pub fn new() -> Self {
        Self
    }
}

impl FormatLoader for TableLoader {
    fn name(&self) -> &str {
        FORMAT
    }

    fn load(&self, source: &[u8]) -> Result<Mapping> {
        let text = source_text(FORMAT, source)?;
        Parser::new(text).document()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// PHP stores canonical decimal strings ("5", "-2") as integer keys
    fn from_string(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(i) if i.to_string() == s => Self::Int(i),
            _ => Self::Str(s),
        }
    }

    fn into_string(self) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            Self::Str(s) => s,
        }
    }
}

/// An array literal in source order; a repeated key overwrites in place
#[derive(Debug, Default)]
struct Table {
    entries: Vec<(Key, Value)>,
    next_index: i64,
}

impl Table {
    fn push(&mut self, value: Value) {
        let key = Key::Int(self.next_index);
        self.insert(key, value);
    }

    fn insert(&mut self, key: Key, value: Value) {
        if let Key::Int(i) = key {
            self.next_index = self.next_index.max(i.saturating_add(1));
        }
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(idx, (key, _))| *key == Key::Int(idx as i64))
    }

    fn into_mapping(self) -> Mapping {
        self.entries
            .into_iter()
            .map(|(key, value)| (key.into_string(), value))
            .collect()
    }

    fn into_value(self) -> Value {
        if self.is_list() {
            Value::Array(self.entries.into_iter().map(|(_, value)| value).collect())
        } else {
            Value::Object(self.into_mapping())
        }
    }
}

/// Parsed value before arrays are turned into sequences or mappings
enum Literal {
    Table(Table),
    Scalar(Value),
}

impl Literal {
    fn into_value(self) -> Value {
        match self {
            Self::Table(table) => table.into_value(),
            Self::Scalar(value) => value,
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn document(&mut self) -> Result<Mapping> {
        self.skip_trivia();
        if self.rest().get(..5).is_some_and(|open| open.eq_ignore_ascii_case("<?php")) {
            self.pos += 5;
        }
        self.skip_trivia();
        if !self.keyword("return") {
            return Err(self.error("expected `return`"));
        }

        let table = match self.literal()? {
            Literal::Table(table) => table,
            Literal::Scalar(_) => return Err(self.error("the returned value must be an array")),
        };

        self.skip_trivia();
        self.eat(";");
        self.skip_trivia();
        self.eat("?>");
        self.skip_trivia();
        if self.pos < self.src.len() {
            return Err(self.error("unexpected content after the returned array"));
        }

        Ok(table.into_mapping())
    }

    fn literal(&mut self) -> Result<Literal> {
        self.skip_trivia();
        match self.peek() {
            Some('[') => {
                self.pos += 1;
                self.table(']').map(Literal::Table)
            }
            Some(quote @ ('\'' | '"')) => {
                self.pos += 1;
                self.string(quote).map(|s| Literal::Scalar(Value::String(s)))
            }
            Some(c) if c == '-' || c.is_ascii_digit() => self.number().map(Literal::Scalar),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let start = self.pos;
                let word = self.identifier();
                match word.to_lowercase().as_str() {
                    "true" => Ok(Literal::Scalar(Value::Bool(true))),
                    "false" => Ok(Literal::Scalar(Value::Bool(false))),
                    "null" => Ok(Literal::Scalar(Value::Null)),
                    "array" => {
                        self.skip_trivia();
                        if !self.eat("(") {
                            return Err(self.error("expected `(` after `array`"));
                        }
                        self.table(')').map(Literal::Table)
                    }
                    _ => {
                        self.pos = start;
                        Err(self.error(format!("unsupported expression `{word}`")))
                    }
                }
            }
            Some(c) => Err(self.error(format!("unexpected character `{c}`"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    /// Items of an array literal; the opening bracket is already consumed
    fn table(&mut self, close: char) -> Result<Table> {
        let mut table = Table::default();

        loop {
            self.skip_trivia();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(table);
            }

            let first = self.literal()?;
            self.skip_trivia();
            if self.eat("=>") {
                let key = self.key(first)?;
                let value = self.literal()?.into_value();
                table.insert(key, value);
            } else {
                table.push(first.into_value());
            }

            self.skip_trivia();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok(table);
                }
                Some(c) => return Err(self.error(format!("expected `,` or `{close}`, found `{c}`"))),
                None => return Err(self.error(format!("unclosed array, expected `{close}`"))),
            }
        }
    }

    fn key(&self, literal: Literal) -> Result<Key> {
        match literal {
            Literal::Scalar(Value::String(s)) => Ok(Key::from_string(s)),
            Literal::Scalar(Value::Number(n)) => match n.as_i64() {
                Some(i) => Ok(Key::Int(i)),
                None => Err(self.error("array keys must be strings or integers")),
            },
            _ => Err(self.error("array keys must be strings or integers")),
        }
    }

    /// String body; the opening quote is already consumed
    fn string(&mut self, quote: char) -> Result<String> {
        let mut out = String::new();
        let mut chars = self.rest().char_indices();

        while let Some((idx, ch)) = chars.next() {
            match ch {
                c if c == quote => {
                    self.pos += idx + c.len_utf8();
                    return Ok(out);
                }
                '\\' => {
                    let Some((_, escaped)) = chars.next() else { break };
                    match (quote, escaped) {
                        ('\'', '\'' | '\\') => out.push(escaped),
                        ('"', '"' | '\\' | '$') => out.push(escaped),
                        ('"', 'n') => out.push('\n'),
                        ('"', 't') => out.push('\t'),
                        ('"', 'r') => out.push('\r'),
                        ('"', '0') => out.push('\0'),
                        _ => {
                            out.push('\\');
                            out.push(escaped);
                        }
                    }
                }
                '$' if quote == '"' => {
                    self.pos += idx;
                    return Err(self.error("variable interpolation is not supported"));
                }
                c => out.push(c),
            }
        }

        Err(self.error("unterminated string"))
    }

    fn number(&mut self) -> Result<Value> {
        let start = self.pos;
        self.eat("-");
        self.skip_trivia();
        let digits_start = self.pos;
        self.consume_digits();
        if self.pos == digits_start {
            return Err(self.error("expected a number"));
        }

        let mut is_float = false;
        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.pos += 1;
            self.consume_digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            self.consume_digits();
            if self.pos == exp_start {
                self.pos = mark;
            } else {
                is_float = true;
            }
        }

        let literal: String = self.src[start..self.pos]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if !is_float {
            if let Ok(i) = literal.parse::<i64>() {
                return Ok(Value::Number(i.into()));
            }
        }
        literal
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| self.error(format!("invalid number `{literal}`")))
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    /// Consume a case-insensitive keyword followed by a word boundary
    fn keyword(&mut self, word: &str) -> bool {
        let start = self.pos;
        if self.identifier().eq_ignore_ascii_case(word) {
            true
        } else {
            self.pos = start;
            false
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and `//`, `#`, `/* */` comments
    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") || trimmed.starts_with('#') {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                self.pos += body.find("*/").map_or(trimmed.len(), |end| end + 4);
            } else {
                return;
            }
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn error(&self, message: impl std::fmt::Display) -> Error {
        let consumed = &self.src[..self.pos.min(self.src.len())];
        let line = consumed.matches('\n').count() + 1;
        Error::syntax(FORMAT, format!("line {line}: {message}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn load(source: &str) -> Result<Mapping> {
        TableLoader::new().load(source.as_bytes())
    }

    #[test]
    fn test_table_short_and_long_syntax() {
        let mapping = load(
            r#"<?php
// application settings
return [
    'debug' => true,
    'db' => array('host' => "local", 'port' => 5432, 'ratio' => 0.5),
    'hosts' => ['a', 'b'],
    'missing' => NULL,
];
"#,
        )
        .unwrap();

        assert_eq!(
            Value::Object(mapping),
            json!({
                "debug": true,
                "db": {"host": "local", "port": 5432, "ratio": 0.5},
                "hosts": ["a", "b"],
                "missing": null
            })
        );
    }

    #[test]
    fn test_table_mixed_keys() {
        let mapping = load("<?php return ['a', 5 => 'b', 'c', 'x' => 'd', '7' => 'e', 'f'];").unwrap();
        let keys: Vec<_> = mapping.keys().cloned().collect();
        assert_eq!(keys, vec!["0", "5", "6", "x", "7", "8"]);
    }

    #[test]
    fn test_table_nested_list_stays_list() {
        let mapping = load("<?php return ['ports' => [80, 443, -1]];").unwrap();
        assert_eq!(mapping.get("ports"), Some(&json!([80, 443, -1])));
    }

    #[test]
    fn test_table_sparse_array_is_mapping() {
        let mapping = load("<?php return ['ids' => [1 => 'a', 3 => 'b']];").unwrap();
        assert_eq!(mapping.get("ids"), Some(&json!({"1": "a", "3": "b"})));
    }

    #[test]
    fn test_table_duplicate_key_overwrites() {
        let mapping = load("<?php return ['a' => 1, 'b' => 2, 'a' => 3];").unwrap();
        assert_eq!(Value::Object(mapping), json!({"a": 3, "b": 2}));
    }

    #[test]
    fn test_table_string_escapes() {
        let mapping = load(r#"<?php return ['s' => 'it\'s', 'd' => "tab\there \$x", 'r' => 'a\nb'];"#).unwrap();
        assert_eq!(mapping.get("s"), Some(&json!("it's")));
        assert_eq!(mapping.get("d"), Some(&json!("tab\there $x")));
        assert_eq!(mapping.get("r"), Some(&json!("a\\nb")));
    }

    #[test]
    fn test_table_comments_and_closing_tag() {
        let mapping = load("<?php\n/* block */ return [ # hash\n 'a' => 1 // trailing\n ] ?>\n").unwrap();
        assert_eq!(Value::Object(mapping), json!({"a": 1}));
    }

    #[test]
    fn test_table_without_open_tag() {
        let mapping = load("return ['a' => 1];").unwrap();
        assert_eq!(mapping.get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_table_rejects_code() {
        assert!(load("<?php system('rm -rf /');").is_err());
        assert!(load("<?php return ['a' => getenv('HOME')];").is_err());
        assert!(load("<?php return ['a' => $secret];").is_err());
        assert!(load("<?php return ['a' => \"$secret\"];").is_err());
        assert!(load("<?php return ['a' => 1 + 2];").is_err());
        assert!(load("<?php return ['a' => 1]; echo 'x';").is_err());
    }

    #[test]
    fn test_table_rejects_scalar_document() {
        assert!(load("<?php return 42;").is_err());
        assert!(load("").is_err());
    }

    #[test]
    fn test_table_unclosed_array_reports_line() {
        let err = load("<?php\nreturn [\n 'a' => 1,\n").unwrap_err();
        assert!(err.to_string().contains("line 4"), "got: {err}");
    }
}
