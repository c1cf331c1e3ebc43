//! Schema inference.
//!
//! Turns a raw schema (field keys with optional `*`/`^`/`!` markers, mapped to
//! sample values, type tags or translation mappings) into a [`FieldMetaMap`]
//! describing every field's type, nullability, uniqueness, default, enum
//! values, file category, translatability and relation.
//!
//! ```
//! use crudsmith::schema::{default_schema, normalize, DataType, DefaultResolver};
//!
//! let fields = normalize(&default_schema(), &mut DefaultResolver);
//! assert_eq!(fields.get("country_id").unwrap().data_type, DataType::ForeignId);
//! assert!(fields.get("name").unwrap().is_translatable);
//! ```

mod key;
mod load;
mod meta;
mod modifiers;
mod normalize;
mod patterns;
mod resolver;
mod value;

pub use load::{load_raw_schema, parse_raw_schema};
pub use meta::{
    DataType, FieldMeta, FieldMetaMap, FileCategory, NormalizedField, RawSchema, RawValue,
    Relation, RelationKind,
};
pub use normalize::{default_schema, describe_field, normalize, normalize_field};
pub use patterns::{category_extensions, enum_values, is_enum_literal};
pub use resolver::{DefaultResolver, TerminalResolver, TypeResolver};
