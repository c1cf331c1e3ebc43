//! Symbolic key prefixes.
//!
//! A raw key may start with any combination of:
//!
//! - `*` required (`is_nullable = false`)
//! - `^` unique (`is_unique = true`)
//! - `!` has a default; the default is the clean key itself (`!active` →
//!   `"active"`), or the first listed value when the clean key has the
//!   `enum[...]` shape
//!
//! Markers may appear in any order and repeat (`**^price`, `^*!status`); each
//! leading run is stripped whole and its effect applied once.

use super::meta::FieldMeta;
use super::patterns::enum_values;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Required,
    Unique,
    Default,
}

const MARKERS: [(char, Marker); 3] = [
    ('*', Marker::Required),
    ('^', Marker::Unique),
    ('!', Marker::Default),
];

/// Strip marker prefixes from `raw_key`, applying their effects to `meta`.
///
/// The key is trimmed and lower-cased first. Never fails: a key without
/// markers comes back unchanged (apart from case and surrounding whitespace).
pub fn parse(raw_key: &str, meta: &mut FieldMeta) -> String {
    let mut rest = raw_key.trim().to_lowercase();
    let mut wants_default = false;

    'scan: loop {
        for (symbol, marker) in MARKERS {
            if rest.starts_with(symbol) {
                rest = rest.trim_start_matches(symbol).to_string();
                match marker {
                    Marker::Required => meta.is_nullable = false,
                    Marker::Unique => meta.is_unique = true,
                    Marker::Default => wants_default = true,
                }
                continue 'scan;
            }
        }
        break;
    }

    if wants_default {
        meta.has_default = true;
        meta.default_value = Some(guess_default_value(&rest));
    }
    rest
}

/// Default value implied by a clean key.
fn guess_default_value(clean_key: &str) -> Value {
    match enum_values(clean_key).into_iter().next() {
        Some(first) => Value::String(first),
        None => Value::String(clean_key.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_without_markers_is_unchanged() {
        let mut meta = FieldMeta::default();
        assert_eq!(parse("price", &mut meta), "price");
        assert_eq!(meta, FieldMeta::default());
    }

    #[test]
    fn test_key_is_trimmed_and_lowercased() {
        let mut meta = FieldMeta::default();
        assert_eq!(parse("  Country_ID ", &mut meta), "country_id");
    }

    #[test]
    fn test_required_and_unique_in_either_order() {
        for key in ["*^price", "^*price", "**^^price", "^*^price"] {
            let mut meta = FieldMeta::default();
            assert_eq!(parse(key, &mut meta), "price", "key {key}");
            assert!(!meta.is_nullable, "key {key}");
            assert!(meta.is_unique, "key {key}");
            assert!(!meta.has_default, "key {key}");
        }
    }

    #[test]
    fn test_default_marker_uses_clean_key() {
        let mut meta = FieldMeta::default();
        assert_eq!(parse("!active", &mut meta), "active");
        assert!(meta.has_default);
        assert_eq!(meta.default_value, Some(Value::String("active".into())));
    }

    #[test]
    fn test_default_marker_before_other_markers() {
        let mut meta = FieldMeta::default();
        assert_eq!(parse("!*status", &mut meta), "status");
        assert!(!meta.is_nullable);
        assert!(meta.has_default);
        assert_eq!(meta.default_value, Some(Value::String("status".into())));
    }

    #[test]
    fn test_default_from_enum_shape_takes_first_value() {
        let mut meta = FieldMeta::default();
        let clean = parse("^*!enum[draft,published]", &mut meta);
        assert_eq!(clean, "enum[draft,published]");
        assert!(meta.is_unique);
        assert!(!meta.is_nullable);
        assert_eq!(meta.default_value, Some(Value::String("draft".into())));
    }

    #[test]
    fn test_default_from_malformed_enum_keeps_key() {
        let mut meta = FieldMeta::default();
        parse("!enum[]", &mut meta);
        assert_eq!(meta.default_value, Some(Value::String("enum[]".into())));
    }

    #[test]
    fn test_markers_only() {
        let mut meta = FieldMeta::default();
        assert_eq!(parse("*^", &mut meta), "");
        assert!(!meta.is_nullable);
        assert!(meta.is_unique);
    }
}
