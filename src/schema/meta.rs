//! Field metadata records produced by normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A raw schema: field key (possibly carrying `*`, `^`, `!` markers) → sample
/// value, type tag, or nested mapping. Key order is the input document order.
pub type RawSchema = serde_json::Map<String, Value>;

/// A raw field value as it appears in a [`RawSchema`].
pub type RawValue = Value;

/// Canonical data type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    String,
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    Datetime,
    Timestamp,
    Json,
    Array,
    File,
    ForeignId,
}

impl DataType {
    /// Every canonical type, in the order offered to the user when a type
    /// has to be chosen by hand.
    pub const ALL: [DataType; 12] = [
        DataType::String,
        DataType::Text,
        DataType::Integer,
        DataType::Float,
        DataType::Boolean,
        DataType::Date,
        DataType::Datetime,
        DataType::Timestamp,
        DataType::ForeignId,
        DataType::Json,
        DataType::Array,
        DataType::File,
    ];

    /// The canonical tag (`foreignId`, `datetime`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Text => "text",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Datetime => "datetime",
            DataType::Timestamp => "timestamp",
            DataType::Json => "json",
            DataType::Array => "array",
            DataType::File => "file",
            DataType::ForeignId => "foreignId",
        }
    }

    /// Parse a literal type tag, case-insensitively, including the aliases
    /// `int`, `double` and `id`.
    pub fn from_literal(tag: &str) -> Option<DataType> {
        let ty = match tag.trim().to_ascii_lowercase().as_str() {
            "string" => DataType::String,
            "text" => DataType::Text,
            "int" | "integer" => DataType::Integer,
            "float" | "double" => DataType::Float,
            "boolean" => DataType::Boolean,
            "date" => DataType::Date,
            "datetime" => DataType::Datetime,
            "timestamp" => DataType::Timestamp,
            "json" => DataType::Json,
            "array" => DataType::Array,
            "file" => DataType::File,
            "id" | "foreignid" => DataType::ForeignId,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upload category of a file field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Document,
    Audio,
    Video,
    File,
}

impl FileCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Document => "document",
            FileCategory::Audio => "audio",
            FileCategory::Video => "video",
            FileCategory::File => "file",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of relation a foreign-key field implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    BelongsTo,
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongsTo",
        }
    }
}

/// Related entity derived from a foreign-key field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Related model name (`Country`)
    pub model: String,
    /// Related table name (`countries`)
    pub table: String,
    pub relation_kind: RelationKind,
    /// The clean key holding the foreign key (`country_id`)
    pub foreign_key: String,
}

/// Inferred metadata for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub data_type: DataType,
    pub is_column: bool,
    pub is_translatable: bool,
    pub is_file: bool,
    pub file_category: Option<FileCategory>,
    pub file_types: Option<Vec<String>>,
    pub is_relation: bool,
    pub relation: Option<Relation>,
    pub is_nullable: bool,
    pub is_unique: bool,
    pub has_default: bool,
    pub default_value: Option<Value>,
    pub is_enum: bool,
    pub enum_values: Vec<String>,
}

impl Default for FieldMeta {
    fn default() -> Self {
        FieldMeta {
            data_type: DataType::String,
            is_column: true,
            is_translatable: false,
            is_file: false,
            file_category: None,
            file_types: None,
            is_relation: false,
            relation: None,
            is_nullable: true,
            is_unique: false,
            has_default: false,
            default_value: None,
            is_enum: false,
            enum_values: Vec::new(),
        }
    }
}

impl FieldMeta {
    /// Mark the field as a file upload of the given category.
    ///
    /// Category and extensions are always set together.
    pub fn set_file(&mut self, category: FileCategory, types: Vec<String>) {
        self.is_file = true;
        self.file_category = Some(category);
        self.file_types = Some(types);
    }
}

/// One normalized field: its clean key and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedField {
    pub key: String,
    #[serde(flatten)]
    pub meta: FieldMeta,
}

/// Ordered map of clean key → [`FieldMeta`].
///
/// Iteration follows first-insertion order. Inserting an existing key
/// replaces its metadata in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMetaMap {
    fields: Vec<NormalizedField>,
}

impl FieldMetaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the previous metadata for a colliding key.
    pub fn insert(&mut self, key: impl Into<String>, meta: FieldMeta) -> Option<FieldMeta> {
        let key = key.into();
        if let Some(existing) = self.fields.iter_mut().find(|f| f.key == key) {
            return Some(std::mem::replace(&mut existing.meta, meta));
        }
        self.fields.push(NormalizedField { key, meta });
        None
    }

    pub fn get(&self, key: &str) -> Option<&FieldMeta> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.meta)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldMeta)> {
        self.fields.iter().map(|f| (f.key.as_str(), &f.meta))
    }
}

impl<'a> IntoIterator for &'a FieldMetaMap {
    type Item = &'a NormalizedField;
    type IntoIter = std::slice::Iter<'a, NormalizedField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_meta_defaults() {
        let meta = FieldMeta::default();
        assert_eq!(meta.data_type, DataType::String);
        assert!(meta.is_column);
        assert!(meta.is_nullable);
        assert!(!meta.is_unique);
        assert!(!meta.has_default);
        assert!(meta.default_value.is_none());
        assert!(meta.file_category.is_none());
        assert!(meta.file_types.is_none());
        assert!(meta.enum_values.is_empty());
    }

    #[test]
    fn test_data_type_literals() {
        assert_eq!(DataType::from_literal("INT"), Some(DataType::Integer));
        assert_eq!(DataType::from_literal("double"), Some(DataType::Float));
        assert_eq!(DataType::from_literal("id"), Some(DataType::ForeignId));
        assert_eq!(DataType::from_literal("timestamp"), Some(DataType::Timestamp));
        assert_eq!(DataType::from_literal("varchar"), None);
        for ty in DataType::ALL {
            assert_eq!(DataType::from_literal(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn test_data_type_serializes_as_tag() {
        let json = serde_json::to_string(&DataType::ForeignId).unwrap();
        assert_eq!(json, "\"foreignId\"");
    }

    #[test]
    fn test_field_meta_map_keeps_order_and_replaces_in_place() {
        let mut map = FieldMetaMap::new();
        map.insert("b", FieldMeta::default());
        map.insert("a", FieldMeta::default());
        let replaced = map.insert(
            "b",
            FieldMeta {
                data_type: DataType::Integer,
                ..FieldMeta::default()
            },
        );
        assert!(replaced.is_some());
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(map.get("b").unwrap().data_type, DataType::Integer);
        assert_eq!(map.len(), 2);
    }
}
