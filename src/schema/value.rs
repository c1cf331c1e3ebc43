//! Type inference from a field's sample value.
//!
//! The value's own shape decides, independent of the key. Branches are tried
//! in order and the first match wins:
//!
//! 1. literal type tag (`"integer"`, `"double"`, `"id"`, ...)
//! 2. `enum[a,b,c]`
//! 3. file indicator (the whole value is a file keyword, or it ends in an
//!    upload extension)
//! 4. numeric
//! 5. email address or URL
//! 6. ISO date (`YYYY-MM-DD`, optionally with a time)
//! 7. boolean word (`true|false|yes|no`)
//! 8. any alphabetic text
//!
//! Mappings are translatable (language-code keys), arrays (dense `0..n`
//! keys) or plain JSON objects.

use super::meta::{DataType, FieldMeta, FileCategory, RawValue};
use super::patterns::{
    category_extensions, category_for_extension, category_for_keyword, enum_values,
    is_file_extension, LANGUAGE_KEYS,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

#[allow(clippy::expect_used)]
static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").expect("numeric regex should be valid")
});

#[allow(clippy::expect_used)]
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex should be valid")
});

#[allow(clippy::expect_used)]
static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex should be valid"));

#[allow(clippy::expect_used)]
static DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?$")
        .expect("datetime regex should be valid")
});

#[allow(clippy::expect_used)]
static BOOLEAN_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(true|false|yes|no)$").expect("boolean word regex should be valid")
});

#[allow(clippy::expect_used)]
static TRAILING_EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.([A-Za-z0-9]+)$").expect("extension regex should be valid")
});

/// Infer a type from `value`, recording side facts (enum, file,
/// translatable) in `meta`. `None` defers to the key matcher.
pub fn resolve(value: &RawValue, meta: &mut FieldMeta) -> Option<DataType> {
    match value {
        Value::String(s) => resolve_str(s, meta),
        Value::Number(n) => Some(numeric_type(&n.to_string())),
        Value::Bool(_) => Some(DataType::Boolean),
        Value::Array(_) => Some(DataType::Array),
        Value::Object(map) => Some(resolve_mapping(map, meta)),
        Value::Null => None,
    }
}

fn resolve_str(s: &str, meta: &mut FieldMeta) -> Option<DataType> {
    if let Some(ty) = DataType::from_literal(s) {
        if ty == DataType::File {
            meta.set_file(FileCategory::File, category_extensions(FileCategory::File));
        }
        return Some(ty);
    }

    let values = enum_values(s);
    if !values.is_empty() {
        meta.is_enum = true;
        meta.enum_values = values;
        return Some(DataType::String);
    }

    if let Some(category) = file_category(s) {
        meta.set_file(category, category_extensions(category));
        return Some(DataType::File);
    }

    let trimmed = s.trim();
    if NUMERIC.is_match(trimmed) {
        return Some(numeric_type(trimmed));
    }
    if EMAIL.is_match(trimmed) || is_url(trimmed) {
        return Some(DataType::String);
    }
    if DATE.is_match(trimmed) {
        return Some(DataType::Date);
    }
    if DATETIME.is_match(trimmed) {
        return Some(DataType::Datetime);
    }
    if BOOLEAN_WORD.is_match(trimmed) {
        return Some(DataType::Boolean);
    }
    if s.chars().any(char::is_alphabetic) {
        return Some(DataType::String);
    }
    None
}

fn numeric_type(s: &str) -> DataType {
    if s.contains('.') {
        DataType::Float
    } else {
        DataType::Integer
    }
}

fn is_url(s: &str) -> bool {
    url::Url::parse(s)
        .map(|u| u.has_host() && !u.scheme().is_empty())
        .unwrap_or(false)
}

/// File category suggested by a sample value, if it looks like an upload.
///
/// A trailing recognised extension (`photo.jpg`) decides the family; failing
/// that, the value must be a file keyword on its own (`avatar`). Keywords
/// inside longer text (`media@company.com`) do not count.
fn file_category(s: &str) -> Option<FileCategory> {
    let lower = s.trim().to_lowercase();
    if let Some(ext) = TRAILING_EXTENSION
        .captures(&lower)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    {
        if is_file_extension(ext) {
            return Some(category_for_extension(ext));
        }
    }
    category_for_keyword(&lower)
}

fn resolve_mapping(map: &Map<String, Value>, meta: &mut FieldMeta) -> DataType {
    if is_translatable(map) {
        meta.is_translatable = true;
        DataType::Json
    } else if is_dense_sequence(map) {
        DataType::Array
    } else {
        DataType::Json
    }
}

/// Any key is a known language code (case-insensitive).
fn is_translatable(map: &Map<String, Value>) -> bool {
    map.keys()
        .any(|k| LANGUAGE_KEYS.contains(&k.to_ascii_lowercase().as_str()))
}

/// Keys are exactly `"0"`, `"1"`, ... in order. An empty mapping qualifies.
fn is_dense_sequence(map: &Map<String, Value>) -> bool {
    map.keys()
        .enumerate()
        .all(|(i, k)| k.parse::<usize>().ok() == Some(i))
}
