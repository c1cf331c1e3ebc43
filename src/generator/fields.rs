//! Per-field line builders shared by the artifact templates.
//!
//! Each builder walks the normalized fields in schema order and produces the
//! PHP fragments one template needs, so templates stay free of type logic.

use super::context::CrudContext;
use crate::naming::{to_camel_case, to_studly_case};
use crate::schema::{DataType, FieldMeta, FieldMetaMap};
use serde_json::Value;

/// A `belongsTo` method on the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMethod {
    /// Method name (`country`)
    pub method: String,
    /// Related model class (`Country`)
    pub model: String,
    pub foreign_key: String,
}

/// One `'column' => [...]` validation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLine {
    pub column: String,
    pub rules: Vec<String>,
}

impl RuleLine {
    pub fn render(&self) -> String {
        format!("'{}' => [{}],", self.column, self.rules.join(", "))
    }
}

/// One case of a string-backed enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    pub name: String,
    pub value: String,
}

impl EnumCase {
    /// The backing value as a PHP string literal.
    pub fn literal(&self) -> String {
        php_string(&self.value)
    }
}

/// An enum field that gets its own enum class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumField {
    pub column: String,
    /// Class name (`StatusEnum`)
    pub class: String,
    pub cases: Vec<EnumCase>,
}

/// Quote a string as a single-quoted PHP literal.
pub fn php_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// PHP literal for a JSON value.
pub fn php_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => php_string(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(php_literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let pairs: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{} => {}", php_string(k), php_literal(v)))
                .collect();
            format!("[{}]", pairs.join(", "))
        }
    }
}

/// Enum class name for a field (`status` → `StatusEnum`).
pub fn enum_class(column: &str) -> String {
    format!("{}Enum", to_studly_case(column))
}

/// Columns writable through mass assignment, plus `created_by`.
pub fn fillable(fields: &FieldMetaMap) -> Vec<String> {
    fields
        .iter()
        .filter(|(_, meta)| meta.is_column)
        .map(|(key, _)| key.to_string())
        .chain(std::iter::once("created_by".to_string()))
        .collect()
}

pub fn translatable(fields: &FieldMetaMap) -> Vec<String> {
    fields
        .iter()
        .filter(|(_, meta)| meta.is_translatable)
        .map(|(key, _)| key.to_string())
        .collect()
}

/// Eloquent cast for a field, if its type needs one.
fn cast_for(meta: &FieldMeta) -> Option<&'static str> {
    if meta.is_translatable || meta.is_file || meta.is_enum || meta.is_relation {
        return None;
    }
    match meta.data_type {
        DataType::Boolean => Some("boolean"),
        DataType::Integer => Some("integer"),
        DataType::Float => Some("float"),
        DataType::Date => Some("date"),
        DataType::Datetime | DataType::Timestamp => Some("datetime"),
        DataType::Json | DataType::Array => Some("array"),
        _ => None,
    }
}

/// `(column, cast)` pairs for the model's `casts()`.
pub fn casts(fields: &FieldMetaMap) -> Vec<(String, String)> {
    fields
        .iter()
        .filter_map(|(key, meta)| cast_for(meta).map(|cast| (key.to_string(), cast.to_string())))
        .collect()
}

pub fn relations(fields: &FieldMetaMap) -> Vec<RelationMethod> {
    fields
        .iter()
        .filter_map(|(_, meta)| meta.relation.as_ref())
        .map(|relation| RelationMethod {
            method: to_camel_case(&relation.model),
            model: relation.model.clone(),
            foreign_key: relation.foreign_key.clone(),
        })
        .collect()
}

pub fn file_columns(fields: &FieldMetaMap) -> Vec<String> {
    fields
        .iter()
        .filter(|(_, meta)| meta.is_file)
        .map(|(key, _)| key.to_string())
        .collect()
}

pub fn enum_fields(fields: &FieldMetaMap) -> Vec<EnumField> {
    fields
        .iter()
        .filter(|(_, meta)| meta.is_enum && !meta.enum_values.is_empty())
        .map(|(key, meta)| EnumField {
            column: key.to_string(),
            class: enum_class(key),
            cases: enum_cases(&meta.enum_values),
        })
        .collect()
}

/// Cases for enum values; names are StudlyCase and never start with a digit.
pub fn enum_cases(values: &[String]) -> Vec<EnumCase> {
    values
        .iter()
        .map(|value| {
            let mut name = to_studly_case(value);
            if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
                name = format!("Value{name}");
            }
            EnumCase {
                name,
                value: value.clone(),
            }
        })
        .collect()
}

fn type_rule(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Integer | DataType::ForeignId => "integer",
        DataType::Boolean => "boolean",
        DataType::Float => "numeric",
        DataType::Date | DataType::Datetime | DataType::Timestamp => "date",
        DataType::Json | DataType::Array => "array",
        _ => "string",
    }
}

/// Validation rules for the form request, one entry per field.
pub fn validation_rules(ctx: &CrudContext) -> Vec<RuleLine> {
    ctx.fields
        .iter()
        .map(|(column, meta)| RuleLine {
            column: column.to_string(),
            rules: rules_for(ctx, column, meta),
        })
        .collect()
}

fn rules_for(ctx: &CrudContext, column: &str, meta: &FieldMeta) -> Vec<String> {
    let presence = if meta.is_nullable { "'nullable'" } else { "'required'" };

    if meta.is_translatable {
        let rule = if meta.is_nullable {
            "TranslatableNullable"
        } else {
            "TranslatableRequired"
        };
        return vec![
            presence.to_string(),
            "'array'".to_string(),
            format!("new {rule}('{column}', ['string'], '{column}')"),
        ];
    }

    let mut rules = vec![presence.to_string()];
    if meta.is_file {
        rules.push("'file'".to_string());
        if let Some(types) = meta.file_types.as_ref().filter(|t| !t.is_empty()) {
            rules.push(format!("'mimes:{}'", types.join(",")));
        }
    } else if let Some(relation) = &meta.relation {
        rules.push(format!("'exists:{},id'", relation.table));
    } else if meta.is_enum {
        rules.push(format!("'in:{}'", meta.enum_values.join(",")));
    } else {
        rules.push(format!("'{}'", type_rule(meta.data_type)));
    }

    if meta.is_unique {
        rules.push(format!(
            "Rule::unique('{}', '{column}')->ignore($this->route('{}'))",
            ctx.table,
            ctx.route_parameter()
        ));
    }
    rules
}

/// `toArray()` entries for the API resource.
pub fn resource_lines(fields: &FieldMetaMap) -> Vec<String> {
    let mut lines = vec!["'id' => $this->id,".to_string()];
    for (column, meta) in fields.iter() {
        if meta.is_translatable {
            lines.push(format!("'{column}' => $this->getTranslations('{column}'),"));
            lines.push(format!("'translation_{column}' => $this->{column},"));
        } else if meta.is_enum && !meta.enum_values.is_empty() {
            lines.push(format!("'{column}' => $this->{column},"));
            lines.push(format!(
                "'display_{column}' => {}::resolve($this->{column}),",
                enum_class(column)
            ));
        } else if let Some(relation) = &meta.relation {
            let method = to_camel_case(&relation.model);
            lines.push(format!(
                "'{column}' => $this->whenLoaded('{method}', fn () => $this->{method}, ['id' => $this->{column}]),"
            ));
        } else {
            lines.push(format!("'{column}' => $this->{column},"));
        }
    }
    lines.push(
        "'creator' => $this->whenLoaded('creator', fn () => ['id' => $this->creator->id, 'name' => $this->creator->name], ['id' => $this->created_by]),"
            .to_string(),
    );
    lines.push("'created_at' => $this->created_at,".to_string());
    lines.push("'updated_at' => $this->updated_at,".to_string());
    lines
}

/// Blueprint column builder for one field, without modifiers.
fn column_builder(column: &str, meta: &FieldMeta) -> String {
    if meta.is_translatable {
        return format!("$table->json('{column}')");
    }
    if meta.is_file {
        return format!("$table->string('{column}')");
    }
    if meta.is_enum && !meta.enum_values.is_empty() {
        let values: Vec<String> = meta.enum_values.iter().map(|v| php_string(v)).collect();
        return format!("$table->enum('{column}', [{}])", values.join(", "));
    }
    if meta.is_relation {
        return format!("$table->foreignId('{column}')");
    }
    let method = match meta.data_type {
        DataType::String => "string",
        DataType::Text => "text",
        DataType::Integer => "integer",
        DataType::Float => "double",
        DataType::Boolean => "boolean",
        DataType::Date => "date",
        DataType::Datetime => "dateTime",
        DataType::Timestamp => "timestamp",
        DataType::Json | DataType::Array => "json",
        DataType::File => "string",
        DataType::ForeignId => "unsignedBigInteger",
    };
    format!("$table->{method}('{column}')")
}

/// Migration column statements (`$table->string('phone')->unique();`).
pub fn migration_columns(fields: &FieldMetaMap) -> Vec<String> {
    fields
        .iter()
        .filter(|(_, meta)| meta.is_column)
        .map(|(column, meta)| {
            let mut line = column_builder(column, meta);
            if meta.is_nullable {
                line.push_str("->nullable()");
            }
            if meta.is_unique {
                line.push_str("->unique()");
            }
            if let (true, Some(default)) = (meta.has_default, &meta.default_value) {
                if !meta.is_translatable {
                    line.push_str(&format!("->default({})", php_literal(default)));
                }
            }
            if let Some(relation) = &meta.relation {
                line.push_str(&format!("->constrained('{}')", relation.table));
            }
            line.push(';');
            line
        })
        .collect()
}
