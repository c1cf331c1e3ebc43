//! Schema normalization: raw key/value pairs → [`FieldMetaMap`].
//!
//! Per field, in order:
//!
//! 1. start from [`FieldMeta::default`]
//! 2. strip key markers ([`modifiers::parse`])
//! 3. value matcher, then key matcher, then the [`TypeResolver`]
//! 4. settle file category from the key when the value only said "file"
//! 5. relation inference for `foreignId` / `*_id` fields
//! 6. translatable confirmation for label-like fields
//! 7. coerce the default value to the resolved type
//!
//! Output order follows the raw schema. Two raw keys that clean to the same
//! key collide; the later one wins.

use super::key;
use super::meta::{
    DataType, FieldMeta, FieldMetaMap, FileCategory, RawSchema, RawValue, Relation, RelationKind,
};
use super::modifiers;
use super::patterns::{category_extensions, keyword_category};
use super::resolver::TypeResolver;
use super::value;
use crate::naming::{table_name, to_studly_case};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Number, Value};
use tracing::{debug, warn};

#[allow(clippy::expect_used)]
static LABEL_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(title|name|description|label|text)").expect("label regex should be valid")
});

/// Normalize every field of `raw`, asking `resolver` when inference runs out.
pub fn normalize<R: TypeResolver + ?Sized>(raw: &RawSchema, resolver: &mut R) -> FieldMetaMap {
    let mut fields = FieldMetaMap::new();
    for (raw_key, raw_value) in raw {
        let (key, meta) = normalize_field(raw_key, raw_value, resolver);
        debug!(raw_key = %raw_key, key = %key, data_type = %meta.data_type, "normalized field");
        if key.is_empty() {
            warn!(raw_key = %raw_key, "key has no name after removing markers");
        }
        if fields.insert(key.clone(), meta).is_some() {
            warn!(key = %key, raw_key = %raw_key, "duplicate clean key, later field wins");
        }
    }
    fields
}

/// Normalize one raw field, returning its clean key and metadata.
pub fn normalize_field<R: TypeResolver + ?Sized>(
    raw_key: &str,
    raw_value: &RawValue,
    resolver: &mut R,
) -> (String, FieldMeta) {
    let mut meta = FieldMeta::default();
    let key = modifiers::parse(raw_key, &mut meta);

    let data_type = value::resolve(raw_value, &mut meta)
        .or_else(|| key::resolve(&key, &mut meta))
        .unwrap_or_else(|| resolver.prompt_for_type(&key, raw_value));
    meta.data_type = data_type;

    settle_file(&key, &mut meta);
    infer_relation(&key, &mut meta);
    confirm_translatable(&key, &mut meta, resolver);
    coerce_default(&mut meta);

    (key, meta)
}

/// Keep `file` fields fully described, narrowing a generic category from the
/// key (`photo` with value `"file"` is an image).
fn settle_file(key: &str, meta: &mut FieldMeta) {
    if meta.data_type != DataType::File {
        return;
    }
    let from_key = keyword_category(key);
    match (meta.file_category, from_key) {
        (None, category) => {
            let category = category.unwrap_or(FileCategory::File);
            meta.set_file(category, category_extensions(category));
        }
        (Some(FileCategory::File), Some(category))
            if category != FileCategory::File =>
        {
            meta.set_file(category, category_extensions(category));
        }
        _ => {}
    }
}

/// Foreign-key fields (`foreignId` or a `_id` suffix) belong to a related
/// model named after the key: `country_id` → `Country` / `countries`.
fn infer_relation(key: &str, meta: &mut FieldMeta) {
    if meta.data_type != DataType::ForeignId && !key.ends_with("_id") {
        return;
    }
    let base = key.strip_suffix("_id").unwrap_or(key);
    let model = to_studly_case(base);
    if model.is_empty() {
        if meta.data_type == DataType::ForeignId {
            meta.data_type = DataType::Integer;
        }
        return;
    }

    meta.data_type = DataType::ForeignId;
    meta.is_relation = true;
    meta.relation = Some(Relation {
        table: table_name(&model),
        model,
        relation_kind: RelationKind::BelongsTo,
        foreign_key: key.to_string(),
    });

    // A foreign key column is never an upload, enum or translation.
    meta.is_file = false;
    meta.file_category = None;
    meta.file_types = None;
    meta.is_enum = false;
    meta.enum_values.clear();
    meta.is_translatable = false;
}

fn confirm_translatable<R: TypeResolver + ?Sized>(key: &str, meta: &mut FieldMeta, resolver: &mut R) {
    if meta.is_translatable || meta.is_enum || meta.is_file || meta.is_relation {
        return;
    }
    if !LABEL_LIKE.is_match(key) {
        return;
    }
    if resolver.confirm(&format!("Is '{key}' translatable?")) {
        meta.is_translatable = true;
        meta.data_type = DataType::Json;
    }
}

/// Convert a string default to the field's type when it parses; otherwise
/// leave it as written.
fn coerce_default(meta: &mut FieldMeta) {
    let Some(Value::String(text)) = meta.default_value.as_ref() else {
        return;
    };
    let coerced = match meta.data_type {
        DataType::Integer => text.parse::<i64>().ok().map(Value::from),
        DataType::Float => text
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        DataType::Boolean => match text.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(Value::Bool(true)),
            "false" | "no" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    };
    if let Some(value) = coerced {
        meta.default_value = Some(value);
    }
}

/// Built-in sample schema used when the caller has none.
pub fn default_schema() -> RawSchema {
    let mut schema = RawSchema::new();
    schema.insert(
        "*name".into(),
        json!({"ar": "اسم تجريبي", "en": "Sample Name"}),
    );
    schema.insert(
        "description".into(),
        json!({"ar": "وصف تجريبي", "en": "Sample Description"}),
    );
    schema.insert("^phone".into(), json!("phone"));
    schema.insert("photo".into(), json!("file"));
    schema.insert("status".into(), json!("enum[pending,approved,rejected]"));
    schema.insert("country_id".into(), json!(1));
    schema
}

/// One line of the final schema mapping:
/// `name                 → json       (🌍 translatable, 🚫 not null)`.
pub fn describe_field(key: &str, meta: &FieldMeta) -> String {
    let mut flags = Vec::new();
    if meta.is_translatable {
        flags.push("🌍 translatable".to_string());
    }
    if let Some(relation) = &meta.relation {
        flags.push(format!("🔗 relation({})", relation.model));
    }
    if meta.is_file {
        let category = meta.file_category.map(|c| c.as_str()).unwrap_or("file");
        let types = meta
            .file_types
            .as_ref()
            .map(|t| t.join("|"))
            .unwrap_or_else(|| "—".to_string());
        flags.push(format!("🖼️ {category}({types})"));
    }
    if meta.is_enum {
        flags.push(format!("🎯 enum[{}]", meta.enum_values.join("|")));
    }
    if !meta.is_nullable {
        flags.push("🚫 not null".to_string());
    }
    if meta.is_unique {
        flags.push("🔑 unique".to_string());
    }
    if let (true, Some(default)) = (meta.has_default, &meta.default_value) {
        flags.push(format!("⚙️ default({default})"));
    }
    let flags = if flags.is_empty() {
        "—".to_string()
    } else {
        flags.join(", ")
    };
    format!("{key:<20} → {:<10} ({flags})", meta.data_type.as_str())
}
