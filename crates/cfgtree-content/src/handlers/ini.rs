//! INI format loader
//!
//! Sectioned `key = value` files with scalar type inference:
//!
//! ```ini
//! ; comment
//! debug = on          ; true
//! workers = 4         ; number
//! name = "My App"     ; quoted strings are kept verbatim
//!
//! [paths]
//! include[] = src     ; appends to a sequence
//! alias[home] = /srv  ; nested key
//! ```

use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::{FormatLoader, Mapping, source_text};

const FORMAT: &str = "INI";

/// Loader for INI files
#[derive(Debug, Default)]
pub struct IniLoader;

impl IniLoader {
    pub fn new() -> Self {
        Self
    }
}

impl FormatLoader for IniLoader {
    fn name(&self) -> &str {
        FORMAT
    }

    fn load(&self, source: &[u8]) -> Result<Mapping> {
        let text = source_text(FORMAT, source)?;
        let mut root = Mapping::new();
        let mut section: Option<String> = None;

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = parse_section_header(header).map_err(|m| line_error(line_no, m))?;
                section_mut(&mut root, name);
                section = Some(name.to_string());
                continue;
            }

            let Some((raw_key, raw_value)) = line.split_once('=') else {
                return Err(line_error(line_no, "expected `key = value` or `[section]`"));
            };
            let key = raw_key.trim();
            if key.is_empty() {
                return Err(line_error(line_no, "empty key"));
            }
            let value = parse_value(raw_value.trim()).map_err(|m| line_error(line_no, m))?;

            let target = match &section {
                Some(name) => section_mut(&mut root, name),
                None => &mut root,
            };
            assign(target, key, value).map_err(|m| line_error(line_no, m))?;
        }

        Ok(root)
    }
}

fn line_error(line_no: usize, message: impl std::fmt::Display) -> Error {
    Error::syntax(FORMAT, format!("line {line_no}: {message}"))
}

fn parse_section_header(header: &str) -> std::result::Result<&str, &'static str> {
    let Some(end) = header.find(']') else {
        return Err("unterminated section header");
    };
    let trailing = header[end + 1..].trim_start();
    if !(trailing.is_empty() || trailing.starts_with(';') || trailing.starts_with('#')) {
        return Err("unexpected text after section header");
    }
    let name = header[..end].trim();
    if name.is_empty() {
        return Err("empty section name");
    }
    Ok(name)
}

/// Get the mapping for a section, creating it (or replacing a scalar of the
/// same name) on first use
fn section_mut<'a>(root: &'a mut Mapping, name: &str) -> &'a mut Mapping {
    let slot = root
        .entry(name.to_string())
        .or_insert_with(|| Value::Object(Mapping::new()));
    if !slot.is_object() {
        *slot = Value::Object(Mapping::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("section slot is always an object"),
    }
}

/// Store a value under `key`, `key[]` or `key[sub]`
fn assign(target: &mut Mapping, key: &str, value: Value) -> std::result::Result<(), &'static str> {
    let Some((base, inner)) = key
        .strip_suffix(']')
        .and_then(|rest| rest.split_once('['))
    else {
        target.insert(key.to_string(), value);
        return Ok(());
    };

    let base = base.trim();
    let inner = inner.trim();
    if base.is_empty() {
        return Err("empty key before `[`");
    }

    let slot = target.entry(base.to_string()).or_insert(Value::Null);
    if inner.is_empty() {
        match slot {
            Value::Array(items) => items.push(value),
            Value::Object(map) => {
                let next = map.len().to_string();
                map.insert(next, value);
            }
            other => *other = Value::Array(vec![value]),
        }
    } else {
        if let Value::Array(items) = slot {
            let indexed = std::mem::take(items)
                .into_iter()
                .enumerate()
                .map(|(idx, item)| (idx.to_string(), item))
                .collect();
            *slot = Value::Object(indexed);
        }
        match slot {
            Value::Object(map) => {
                map.insert(inner.to_string(), value);
            }
            other => {
                let mut map = Mapping::new();
                map.insert(inner.to_string(), value);
                *other = Value::Object(map);
            }
        }
    }
    Ok(())
}

fn parse_value(raw: &str) -> std::result::Result<Value, &'static str> {
    if let Some(rest) = raw.strip_prefix('"') {
        return parse_quoted(rest, '"').map(Value::String);
    }
    if let Some(rest) = raw.strip_prefix('\'') {
        return parse_quoted(rest, '\'').map(Value::String);
    }

    let bare = match raw.find(';') {
        Some(idx) => raw[..idx].trim_end(),
        None => raw,
    };
    Ok(infer_scalar(bare))
}

/// Read a quoted string up to `quote`; only a comment may follow it
fn parse_quoted(rest: &str, quote: char) -> std::result::Result<String, &'static str> {
    let mut out = String::new();
    let mut chars = rest.char_indices();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' if quote == '"' => match chars.next() {
                Some((_, escaped @ ('"' | '\\'))) => out.push(escaped),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return Err("unterminated quoted value"),
            },
            c if c == quote => {
                let trailing = rest[idx + c.len_utf8()..].trim_start();
                if trailing.is_empty() || trailing.starts_with(';') || trailing.starts_with('#') {
                    return Ok(out);
                }
                return Err("unexpected text after quoted value");
            }
            c => out.push(c),
        }
    }

    Err("unterminated quoted value")
}

fn infer_scalar(bare: &str) -> Value {
    match bare.to_lowercase().as_str() {
        "true" | "on" | "yes" => return Value::Bool(true),
        "false" | "off" | "no" | "none" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if is_integer(bare) {
        if let Ok(i) = bare.parse::<i64>() {
            return Value::Number(i.into());
        }
    }
    if is_decimal(bare) {
        if let Some(n) = bare.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            return Value::Number(n);
        }
    }

    Value::String(bare.to_string())
}

fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    match digits.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && !frac.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
