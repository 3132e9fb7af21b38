//! Schema-driven JSON serialization of article records.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;
use crate::result::ArticleRecord;
use crate::schema::Schema;

/// Applies an output schema to records and writes them as a JSON array.
#[derive(Debug, Clone)]
pub struct ArticleSerializer {
    schema: Schema,
}

impl ArticleSerializer {
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Map one record through the schema. `"{placeholder}"` values are
    /// substituted from the record (unknown placeholders become null with a
    /// warning); anything else is passed through verbatim.
    pub fn apply_schema(&self, record: &ArticleRecord) -> Result<IndexMap<String, Value>> {
        let source = serde_json::to_value(record)?;
        let mut output = IndexMap::with_capacity(self.schema.len());

        for (field, template) in &self.schema {
            let value = match template {
                Value::String(text) if is_placeholder(text) => {
                    let key = &text[1..text.len() - 1];
                    source.get(key).cloned().unwrap_or_else(|| {
                        warn!(
                            field = %field,
                            placeholder = key,
                            title = %record.title,
                            "placeholder not found in record; emitting null"
                        );
                        Value::Null
                    })
                }
                literal => literal.clone(),
            };
            output.insert(field.clone(), value);
        }

        Ok(output)
    }

    /// Write all records to `path` as pretty-printed JSON, creating parent
    /// directories as needed. An empty batch still produces a valid file
    /// holding an empty list.
    pub fn write_articles(&self, records: &[ArticleRecord], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mapped = records
            .iter()
            .map(|record| self.apply_schema(record))
            .collect::<Result<Vec<_>>>()?;

        if mapped.is_empty() {
            warn!("no records to serialize; writing an empty list");
        }

        let file = fs::File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &mapped)?;
        info!(count = mapped.len(), path = %path.display(), "articles written");
        Ok(())
    }
}

fn is_placeholder(text: &str) -> bool {
    text.len() > 2 && text.starts_with('{') && text.ends_with('}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{default_schema, effective_schema};

    fn sample_record() -> ArticleRecord {
        ArticleRecord {
            title: "Jane Doe".into(),
            url: "https://en.wikipedia.org/wiki/Jane_Doe".into(),
            content: "## History\nBorn 1990.".into(),
            sections: vec!["History".into()],
            images: None,
            infobox_data: None,
        }
    }

    #[test]
    fn default_schema_maps_core_fields() {
        let serializer = ArticleSerializer::new(default_schema());
        let output = serializer.apply_schema(&sample_record()).expect("mapped");
        assert_eq!(output["title"], Value::String("Jane Doe".into()));
        assert_eq!(output["sections"], serde_json::json!(["History"]));
        assert!(!output.contains_key("images"));
    }

    #[test]
    fn retention_schema_surfaces_null_extras() {
        let schema = effective_schema(None, true, true).expect("schema");
        let serializer = ArticleSerializer::new(schema);
        let output = serializer.apply_schema(&sample_record()).expect("mapped");
        assert_eq!(output["images"], Value::Null);
        assert_eq!(output["infobox_data"], Value::Null);
    }

    #[test]
    fn literal_schema_values_pass_through() {
        let mut schema = default_schema();
        schema.insert("source".into(), Value::String("wikipedia".into()));
        schema.insert("version".into(), serde_json::json!(2));
        let serializer = ArticleSerializer::new(schema);
        let output = serializer.apply_schema(&sample_record()).expect("mapped");
        assert_eq!(output["source"], Value::String("wikipedia".into()));
        assert_eq!(output["version"], serde_json::json!(2));
    }

    #[test]
    fn unknown_placeholder_becomes_null() {
        let mut schema = default_schema();
        schema.insert("extra".into(), Value::String("{nonexistent}".into()));
        let serializer = ArticleSerializer::new(schema);
        let output = serializer.apply_schema(&sample_record()).expect("mapped");
        assert_eq!(output["extra"], Value::Null);
    }

    #[test]
    fn write_articles_emits_valid_json() {
        let serializer = ArticleSerializer::new(default_schema());
        let path = std::env::temp_dir().join("wikiharvest_serializer_test.json");
        serializer
            .write_articles(&[sample_record()], &path)
            .expect("written");
        let raw = fs::read_to_string(&path).expect("readable output");
        let parsed: Vec<IndexMap<String, Value>> =
            serde_json::from_str(&raw).expect("valid JSON");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["title"], Value::String("Jane Doe".into()));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn empty_batch_writes_empty_list() {
        let serializer = ArticleSerializer::new(default_schema());
        let path = std::env::temp_dir().join("wikiharvest_serializer_empty.json");
        serializer.write_articles(&[], &path).expect("written");
        let raw = fs::read_to_string(&path).expect("readable output");
        assert_eq!(raw.trim(), "[]");
        let _ = fs::remove_file(&path);
    }
}
