use super::fields::{php_literal, php_string};
use crate::schema::{DataType, FieldMeta};

/// PHP literal for a sample value of a field, used by the seeder.
///
/// Declared defaults win; otherwise the value follows the field's kind and
/// data type.
pub fn seed_value(column: &str, meta: &FieldMeta) -> String {
    if meta.is_translatable {
        return format!("['en' => 'Sample {column}', 'ar' => 'عينة {column}']");
    }
    if let Some(first) = meta.enum_values.first().filter(|_| meta.is_enum) {
        return php_string(first);
    }
    if meta.is_relation {
        return "1".to_string();
    }
    if meta.is_file {
        let ext = meta
            .file_types
            .as_ref()
            .and_then(|types| types.first())
            .map(String::as_str)
            .unwrap_or("bin");
        return php_string(&format!("uploads/sample-{column}.{ext}"));
    }
    if let (true, Some(default)) = (meta.has_default, &meta.default_value) {
        return php_literal(default);
    }

    match meta.data_type {
        DataType::String => php_string(&format!("example {column}")),
        DataType::Text => "'Lorem ipsum dolor sit amet.'".to_string(),
        DataType::Integer | DataType::ForeignId => "42".to_string(),
        DataType::Float => "3.14".to_string(),
        DataType::Boolean => "true".to_string(),
        DataType::Date => "now()->toDateString()".to_string(),
        DataType::Datetime | DataType::Timestamp => "now()".to_string(),
        DataType::Json | DataType::Array => "[]".to_string(),
        DataType::File => "'uploads/sample.bin'".to_string(),
    }
}
