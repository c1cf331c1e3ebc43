use super::meta::RawSchema;
use anyhow::{bail, Context};
use serde_json::Value;
use std::path::Path;

/// Read a raw schema document (`.json`, `.yaml` or `.yml`).
///
/// The document must be a top-level mapping; key order is preserved.
pub fn load_raw_schema(path: &Path) -> anyhow::Result<RawSchema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    parse_raw_schema(&content, is_yaml)
        .with_context(|| format!("Failed to parse schema file {}", path.display()))
}

/// Parse schema text as YAML or JSON.
pub fn parse_raw_schema(content: &str, yaml: bool) -> anyhow::Result<RawSchema> {
    let value: Value = if yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("schema must be an object"),
    }
}
