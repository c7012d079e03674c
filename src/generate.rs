//! Record generation to JSON Lines.

use model_factory::{FactoryError, ModelFactory};
use schema_core::{ModelSchema, Value};
use std::collections::HashMap;
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Errors that can occur while generating records.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Building a record failed.
    #[error("Factory error: {0}")]
    Factory(#[from] FactoryError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metrics from a generate run.
#[derive(Debug, Clone, Default)]
pub struct GenerateMetrics {
    /// Number of records written.
    pub records_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl GenerateMetrics {
    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Build `count` records and write them to `output`, one JSON object per line.
///
/// Every record receives the same caller values. The first failing build
/// stops the run; records already written stay written.
pub fn write_records<W: Write>(
    factory: &mut ModelFactory,
    count: u64,
    overrides: &HashMap<String, Value>,
    output: W,
) -> Result<GenerateMetrics, GenerateError> {
    let start_time = Instant::now();
    let mut metrics = GenerateMetrics::default();
    let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, output);

    for _ in 0..count {
        let record = factory.build(overrides.clone())?;
        serde_json::to_writer(&mut writer, &record.to_json())?;
        writeln!(writer)?;
        metrics.records_written += 1;

        if metrics.records_written % 10000 == 0 {
            debug!("Written {} records", metrics.records_written);
        }
    }
    writer.flush()?;

    metrics.total_duration = start_time.elapsed();
    info!(
        "Generated {} records in {:?} ({:.2} records/sec)",
        metrics.records_written,
        metrics.total_duration,
        metrics.records_per_second()
    );
    Ok(metrics)
}

/// Human-readable listing of a schema's models and map types.
pub fn describe_schema(schema: &ModelSchema) -> String {
    let mut out = String::new();
    for (heading, names) in [("Models", schema.model_names()), ("Maps", schema.map_names())] {
        if names.is_empty() {
            continue;
        }
        out.push_str(heading);
        out.push_str(":\n");
        for name in names {
            let Some(definition) = schema.get_model(name) else {
                continue;
            };
            out.push_str(&format!("  {name}\n"));
            for attribute in &definition.attributes {
                let mut line = format!("    {}: {}", attribute.name, attribute.attribute_type);
                if attribute.nullable {
                    line.push_str(" (nullable)");
                }
                if attribute.has_default() {
                    line.push_str(" (default)");
                }
                out.push_str(&line);
                out.push('\n');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_factory::FactoryConfig;
    use std::sync::Arc;

    const SCHEMA_YAML: &str = r#"
maps:
  - name: Address
    attributes:
      - { name: street, type: unicode }
models:
  - name: Person
    attributes:
      - { name: name, type: unicode }
      - { name: nickname, type: unicode, nullable: true }
      - { name: age, type: number, default: 30 }
      - { name: home, type: { type: map, of: Address } }
"#;

    fn factory(seed: u64) -> ModelFactory {
        let schema = Arc::new(ModelSchema::from_yaml(SCHEMA_YAML).unwrap());
        ModelFactory::new(schema, FactoryConfig::for_model("Person").with_seed(seed))
    }

    #[test]
    fn test_write_records_jsonl() {
        let mut factory = factory(42);
        let mut overrides = HashMap::new();
        overrides.insert("name".to_string(), Value::string("Alice"));

        let mut buffer = Vec::new();
        let metrics = write_records(&mut factory, 3, &overrides, &mut buffer).unwrap();
        assert_eq!(metrics.records_written, 3);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let json: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(json["name"], "Alice");
            assert!(json["home"].is_object());
        }
    }

    #[test]
    fn test_write_records_stops_on_error() {
        let schema = Arc::new(ModelSchema::from_yaml(SCHEMA_YAML).unwrap());
        let mut factory = ModelFactory::new(schema, FactoryConfig::for_model("Ghost"));

        let mut buffer = Vec::new();
        let result = write_records(&mut factory, 2, &HashMap::new(), &mut buffer);
        assert!(matches!(
            result,
            Err(GenerateError::Factory(FactoryError::ModelNotFound(_)))
        ));
    }

    #[test]
    fn test_describe_schema() {
        let schema = ModelSchema::from_yaml(SCHEMA_YAML).unwrap();
        let listing = describe_schema(&schema);

        assert!(listing.starts_with("Models:\n  Person\n"));
        assert!(listing.contains("    nickname: unicode (nullable)\n"));
        assert!(listing.contains("    age: number (default)\n"));
        assert!(listing.contains("Maps:\n  Address\n"));
    }
}
