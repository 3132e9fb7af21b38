//! Output schema handling.
//!
//! A schema is an ordered JSON object mapping output field names to either
//! `"{placeholder}"` templates (substituted from the record) or literal
//! values (copied through). The default schema mirrors the record's core
//! fields; the retention switches extend it with `images`/`infobox_data`.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Ordered output field → template mapping.
pub type Schema = IndexMap<String, Value>;

/// The built-in schema: title, url, content, and sections pass through.
#[must_use]
pub fn default_schema() -> Schema {
    [
        ("title", "{title}"),
        ("url", "{url}"),
        ("content", "{content}"),
        ("sections", "{sections}"),
    ]
    .into_iter()
    .map(|(key, template)| (key.to_string(), Value::String(template.to_string())))
    .collect()
}

/// Load a custom schema from a JSON file. The root must be an object.
pub fn load_schema(path: &Path) -> Result<Schema> {
    info!(path = %path.display(), "loading custom schema");
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(Error::Schema(format!(
            "schema root must be a JSON object, got {}",
            value_kind(&other)
        ))),
    }
}

/// Resolve the schema actually used for output.
///
/// A custom schema wins as-is (with a warning if a retention switch is on
/// but its placeholder is absent); otherwise the default schema is extended
/// according to the switches.
pub fn effective_schema(
    custom_path: Option<&Path>,
    keep_images: bool,
    keep_infobox: bool,
) -> Result<Schema> {
    if let Some(path) = custom_path {
        let schema = load_schema(path)?;
        warn_missing_placeholder(&schema, keep_images, "{images}", "--keep-images");
        warn_missing_placeholder(&schema, keep_infobox, "{infobox_data}", "--keep-infobox");
        return Ok(schema);
    }

    let mut schema = default_schema();
    if keep_images {
        schema.insert("images".to_string(), Value::String("{images}".to_string()));
    }
    if keep_infobox {
        schema.insert(
            "infobox_data".to_string(),
            Value::String("{infobox_data}".to_string()),
        );
    }
    debug!(fields = schema.len(), "using default schema");
    Ok(schema)
}

fn warn_missing_placeholder(schema: &Schema, enabled: bool, placeholder: &str, flag: &str) {
    if !enabled {
        return;
    }
    let present = schema
        .values()
        .any(|value| matches!(value, Value::String(s) if s == placeholder));
    if !present {
        warn!("custom schema used with {flag}, but no value is {placeholder}");
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_has_core_fields_in_order() {
        let schema = default_schema();
        let keys: Vec<&String> = schema.keys().collect();
        assert_eq!(keys, ["title", "url", "content", "sections"]);
    }

    #[test]
    fn retention_switches_extend_the_default_schema() {
        let schema = effective_schema(None, true, true).expect("schema");
        assert_eq!(
            schema.get("images"),
            Some(&Value::String("{images}".into()))
        );
        assert_eq!(
            schema.get("infobox_data"),
            Some(&Value::String("{infobox_data}".into()))
        );

        let bare = effective_schema(None, false, false).expect("schema");
        assert!(!bare.contains_key("images"));
        assert!(!bare.contains_key("infobox_data"));
    }

    #[test]
    fn non_object_schema_is_rejected() {
        let dir = std::env::temp_dir();
        let path = dir.join("wikiharvest_schema_list.json");
        fs::write(&path, "[1, 2, 3]").expect("write temp schema");
        let err = load_schema(&path).expect_err("array root must fail");
        assert!(matches!(err, Error::Schema(_)));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn custom_schema_round_trips() {
        let dir = std::env::temp_dir();
        let path = dir.join("wikiharvest_schema_custom.json");
        fs::write(
            &path,
            r#"{"name": "{title}", "body": "{content}", "source": "wikipedia"}"#,
        )
        .expect("write temp schema");
        let schema = effective_schema(Some(&path), false, false).expect("schema");
        assert_eq!(schema.get("name"), Some(&Value::String("{title}".into())));
        assert_eq!(
            schema.get("source"),
            Some(&Value::String("wikipedia".into()))
        );
        let _ = fs::remove_file(&path);
    }
}
