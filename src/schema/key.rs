//! Type inference from a field's clean key.
//!
//! Consulted only when the value matcher has no answer. Rules are tried in
//! order and vocabulary words match anywhere in the key, so `subtotal` is
//! monetary and `nickname` is short text. Text words that contain a count
//! word (`message`, `stage`) are taken out before the count check.

use super::meta::{DataType, FieldMeta, FileCategory};
use super::patterns::{category_extensions, is_file_extension, keyword_category, FILE_EXTENSIONS};
use once_cell::sync::Lazy;
use regex::Regex;

/// Build a regex matching any of `words` anywhere in a key.
#[allow(clippy::expect_used)]
fn vocabulary(words: &[&str]) -> Regex {
    Regex::new(&format!(r"(?i)(?:{})", words.join("|")))
        .expect("vocabulary regex should be valid")
}

static MONETARY: Lazy<Regex> = Lazy::new(|| {
    vocabulary(&[
        "price", "amount", "total", "rate", "score", "percent", "salary", "cost",
    ])
});

static COUNT: Lazy<Regex> = Lazy::new(|| {
    vocabulary(&[
        "count", "qty", "quantity", "number", "age", "rank", "year", "size", "limit", "level",
    ])
});

static BOOLEAN_ADJECTIVE: Lazy<Regex> = Lazy::new(|| {
    vocabulary(&["enable", "active", "visible", "approved", "published"])
});

static LONG_TEXT: Lazy<Regex> = Lazy::new(|| {
    vocabulary(&[
        "description", "details", "content", "body", "notes", "comment", "bio", "message", "text",
    ])
});

static SHORT_TEXT: Lazy<Regex> = Lazy::new(|| {
    vocabulary(&[
        "status", "type", "category", "stage", "role", "title", "name", "slug", "email", "phone",
        "username", "tag",
    ])
});

/// Text words that would otherwise read as the count word `age`.
const COUNT_SHADOWED: &[&str] = &["message", "stage"];

const BOOLEAN_PREFIXES: &[&str] = &["is_", "has_", "can_", "should_", "was_", "were_"];

/// Infer a type from `key`. `None` means the caller must fall back to the
/// resolver.
pub fn resolve(key: &str, meta: &mut FieldMeta) -> Option<DataType> {
    if let Some(category) = keyword_category(key) {
        let types = if category == FileCategory::File {
            FILE_EXTENSIONS.iter().map(|s| s.to_string()).collect()
        } else {
            category_extensions(category)
        };
        meta.set_file(category, types);
        return Some(DataType::File);
    }

    if let Some((_, ext)) = key.rsplit_once('_') {
        if !ext.is_empty() && is_file_extension(ext) {
            let category = super::patterns::category_for_extension(ext);
            meta.set_file(category, vec![ext.to_string()]);
            return Some(DataType::File);
        }
    }

    if key.ends_with("_id") {
        return Some(DataType::ForeignId);
    }
    if key.ends_with("_at") || key.ends_with("_on") {
        return Some(DataType::Datetime);
    }
    if MONETARY.is_match(key) {
        return Some(DataType::Float);
    }
    if is_count_key(key) {
        return Some(DataType::Integer);
    }
    if BOOLEAN_PREFIXES.iter().any(|p| key.starts_with(p)) || BOOLEAN_ADJECTIVE.is_match(key) {
        return Some(DataType::Boolean);
    }
    if LONG_TEXT.is_match(key) {
        return Some(DataType::Text);
    }
    if SHORT_TEXT.is_match(key) {
        return Some(DataType::String);
    }
    None
}

fn is_count_key(key: &str) -> bool {
    let residue = COUNT_SHADOWED
        .iter()
        .fold(key.to_ascii_lowercase(), |rest, word| rest.replace(word, "_"));
    COUNT.is_match(&residue)
}
