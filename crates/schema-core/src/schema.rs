//! Schema definitions for fixture-factory.
//!
//! A schema is a catalog of **models** (top-level records) and **map types**
//! (nested sub-schemas used by `map` and `list` attributes). Both are
//! described by a `ModelDefinition`: an ordered list of attribute
//! declarations. The catalog is loaded from YAML:
//!
//! ```yaml
//! version: 1
//! maps:
//!   - name: ComplexMap
//!     attributes:
//!       - name: name
//!         type: unicode
//! models:
//!   - name: MapModel
//!     attributes:
//!       - name: map_of
//!         type: { type: map, of: ComplexMap }
//!       - name: val
//!         type: number
//!         default: 1001
//! ```
//!
//! `ModelDefinition::instantiate` is the record constructor: it assigns the
//! supplied values, converts them to the declared attribute kinds and applies
//! schema defaults to attributes that were left out.

use crate::types::AttributeType;
use crate::values::{Record, Value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Model or map type not found in schema
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Attribute not declared on the model
    #[error("Attribute '{attribute}' not found in model '{model}'")]
    AttributeNotFound { model: String, attribute: String },

    /// Two models, or two attributes of one model, share a name
    #[error("Duplicate definition: {0}")]
    Duplicate(String),

    /// Attribute refers to a map type that is not declared
    #[error("Attribute '{attribute}' of model '{model}' refers to unknown map type '{target}'")]
    UnknownMapType {
        model: String,
        attribute: String,
        target: String,
    },

    /// Attribute declaration is not valid for its kind
    #[error("Invalid attribute '{attribute}' in model '{model}': {reason}")]
    InvalidAttribute {
        model: String,
        attribute: String,
        reason: String,
    },
}

// ============================================================================
// Definitions
// ============================================================================

/// A single attribute declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeDefinition {
    /// Attribute name
    pub name: String,

    /// Declared kind
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,

    /// Whether the attribute accepts null
    #[serde(default)]
    pub nullable: bool,

    /// Value applied at construction when the attribute is not supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_yaml::Value>,

    /// Value applied to newly created records when the attribute is not supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_for_new: Option<serde_yaml::Value>,
}

impl AttributeDefinition {
    /// Create a new non-nullable attribute without defaults.
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            nullable: false,
            default: None,
            default_for_new: None,
        }
    }

    /// Create a new nullable attribute without defaults.
    pub fn nullable(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            nullable: true,
            ..Self::new(name, attribute_type)
        }
    }

    /// Set the static default.
    pub fn with_default(mut self, default: serde_yaml::Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the default applied on creation.
    pub fn with_default_for_new(mut self, default: serde_yaml::Value) -> Self {
        self.default_for_new = Some(default);
        self
    }

    /// Whether the schema supplies a value when this attribute is left out.
    pub fn has_default(&self) -> bool {
        let present = |v: &Option<serde_yaml::Value>| matches!(v, Some(d) if !d.is_null());
        present(&self.default) || present(&self.default_for_new)
    }

    /// The value the schema applies when this attribute is left out.
    pub fn default_value(&self) -> Option<Value> {
        self.default
            .as_ref()
            .filter(|d| !d.is_null())
            .or(self.default_for_new.as_ref().filter(|d| !d.is_null()))
            .map(Value::from_yaml)
    }
}

/// A model or map type: an ordered list of attribute declarations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDefinition {
    /// Model name
    pub name: String,

    /// Attribute declarations in declaration order
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}

impl ModelDefinition {
    /// Create a new model definition.
    pub fn new(name: impl Into<String>, attributes: Vec<AttributeDefinition>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Get an attribute by name.
    pub fn get_attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Whether the model declares the attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Get all attribute names in declaration order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Construct a record of this model.
    ///
    /// Supplied values are converted to their declared attribute kinds; maps
    /// supplied for nested map attributes become nested records. Attributes
    /// that are not supplied receive the schema default, if any, and are
    /// otherwise left unassigned.
    pub fn instantiate(
        &self,
        schema: &ModelSchema,
        mut values: HashMap<String, Value>,
    ) -> Result<Record, SchemaError> {
        if let Some(unknown) = values.keys().find(|k| !self.has_attribute(k)) {
            return Err(SchemaError::AttributeNotFound {
                model: self.name.clone(),
                attribute: unknown.clone(),
            });
        }

        let mut attributes = BTreeMap::new();
        for attribute in &self.attributes {
            let value = match values.remove(&attribute.name) {
                Some(value) => value,
                None => match attribute.default_value() {
                    Some(default) => default,
                    None => continue,
                },
            };
            let value = coerce(schema, &attribute.attribute_type, value)?;
            attributes.insert(attribute.name.clone(), value);
        }

        Ok(Record::new(self.name.clone(), attributes))
    }
}

/// Convert an untyped value to the representation of the declared kind.
///
/// Values that do not match the expected shape are kept as they are.
fn coerce(
    schema: &ModelSchema,
    attribute_type: &AttributeType,
    value: Value,
) -> Result<Value, SchemaError> {
    let coerced = match (attribute_type, value) {
        (AttributeType::Map { of: Some(of) }, Value::Map(map)) => {
            Value::Record(schema.instantiate(of, map.into_iter().collect())?)
        }
        (AttributeType::List { of: Some(of) }, Value::List(items)) => Value::List(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Map(map) => schema
                        .instantiate(of, map.into_iter().collect())
                        .map(Value::Record),
                    other => Ok(other),
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        (AttributeType::UnicodeSet, Value::List(items)) => {
            match items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<BTreeSet<_>>>()
            {
                Some(set) => Value::StringSet(set),
                None => Value::List(items),
            }
        }
        (AttributeType::NumberSet, Value::List(items)) => {
            match items.iter().map(Value::as_i64).collect::<Option<BTreeSet<_>>>() {
                Some(set) => Value::NumberSet(set),
                None => Value::List(items),
            }
        }
        (AttributeType::BinarySet, Value::List(items)) => {
            match items
                .iter()
                .map(|v| match v {
                    Value::Bytes(b) => Some(b.clone()),
                    Value::String(s) => Some(s.as_bytes().to_vec()),
                    _ => None,
                })
                .collect::<Option<BTreeSet<_>>>()
            {
                Some(set) => Value::BinarySet(set),
                None => Value::List(items),
            }
        }
        (AttributeType::Binary, Value::String(s)) => Value::Bytes(s.into_bytes()),
        (AttributeType::UtcDateTime | AttributeType::Ttl, Value::String(s)) => {
            match DateTime::parse_from_rfc3339(&s) {
                Ok(dt) => Value::DateTime(dt.with_timezone(&Utc)),
                Err(_) => Value::String(s),
            }
        }
        (AttributeType::Json, Value::String(s)) => match serde_json::from_str(&s) {
            Ok(json) => Value::from_json(&json),
            Err(_) => Value::String(s),
        },
        (_, other) => other,
    };
    Ok(coerced)
}

fn default_version() -> u32 {
    1
}

/// Schema catalog of models and map types.
///
/// The schema is loaded from a YAML file and validated on load: names are
/// unique and every nested reference resolves to a declared map type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Map types usable as nested sub-schemas
    #[serde(default)]
    pub maps: Vec<ModelDefinition>,

    /// Top-level models
    #[serde(default)]
    pub models: Vec<ModelDefinition>,

    /// Cached name lookup (not serialized)
    #[serde(skip)]
    lookup: HashMap<String, (DefinitionKind, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefinitionKind {
    Model,
    Map,
}

impl ModelSchema {
    /// Create a schema from models and map types, validating it.
    pub fn new(
        models: Vec<ModelDefinition>,
        maps: Vec<ModelDefinition>,
    ) -> Result<Self, SchemaError> {
        let mut schema = Self {
            version: default_version(),
            maps,
            models,
            lookup: HashMap::new(),
        };
        schema.build_lookup()?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: ModelSchema = serde_yaml::from_str(yaml)?;
        schema.build_lookup()?;
        schema.validate()?;
        Ok(schema)
    }

    fn build_lookup(&mut self) -> Result<(), SchemaError> {
        self.lookup.clear();
        let entries = self
            .models
            .iter()
            .enumerate()
            .map(|(idx, m)| (m.name.clone(), (DefinitionKind::Model, idx)))
            .chain(
                self.maps
                    .iter()
                    .enumerate()
                    .map(|(idx, m)| (m.name.clone(), (DefinitionKind::Map, idx))),
            );
        for (name, entry) in entries {
            if self.lookup.insert(name.clone(), entry).is_some() {
                return Err(SchemaError::Duplicate(name));
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for model in self.models.iter().chain(self.maps.iter()) {
            let mut seen = HashSet::new();
            for attribute in &model.attributes {
                if !seen.insert(attribute.name.as_str()) {
                    return Err(SchemaError::Duplicate(format!(
                        "{}.{}",
                        model.name, attribute.name
                    )));
                }

                if let Some(target) = attribute.attribute_type.nested_type() {
                    if !self.is_map_type(target) {
                        return Err(SchemaError::UnknownMapType {
                            model: model.name.clone(),
                            attribute: attribute.name.clone(),
                            target: target.to_string(),
                        });
                    }
                }

                if attribute.attribute_type == AttributeType::Null && !attribute.nullable {
                    return Err(SchemaError::InvalidAttribute {
                        model: model.name.clone(),
                        attribute: attribute.name.clone(),
                        reason: "null attributes must be nullable".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Get a model or map type by name.
    pub fn get_model(&self, name: &str) -> Option<&ModelDefinition> {
        match self.lookup.get(name)? {
            (DefinitionKind::Model, idx) => self.models.get(*idx),
            (DefinitionKind::Map, idx) => self.maps.get(*idx),
        }
    }

    /// Whether the name refers to a declared map type.
    pub fn is_map_type(&self, name: &str) -> bool {
        matches!(self.lookup.get(name), Some((DefinitionKind::Map, _)))
    }

    /// Get the declaration of an attribute of a model.
    pub fn get_attribute(
        &self,
        model: &str,
        attribute: &str,
    ) -> Result<&AttributeDefinition, SchemaError> {
        let definition = self
            .get_model(model)
            .ok_or_else(|| SchemaError::ModelNotFound(model.to_string()))?;

        definition
            .get_attribute(attribute)
            .ok_or_else(|| SchemaError::AttributeNotFound {
                model: model.to_string(),
                attribute: attribute.to_string(),
            })
    }

    /// Construct a record of the named model or map type.
    pub fn instantiate(
        &self,
        model: &str,
        values: HashMap<String, Value>,
    ) -> Result<Record, SchemaError> {
        self.get_model(model)
            .ok_or_else(|| SchemaError::ModelNotFound(model.to_string()))?
            .instantiate(self, values)
    }

    /// Get all top-level model names.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    /// Get all map type names.
    pub fn map_names(&self) -> Vec<&str> {
        self.maps.iter().map(|m| m.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE_SCHEMA: &str = r#"
version: 1

maps:
  - name: ComplexMap
    attributes:
      - name: name
        type: unicode
      - name: email
        type: unicode
      - name: birthday
        type: utc_date_time

models:
  - name: MapModel
    attributes:
      - name: map
        type: map
      - name: map_of
        type:
          type: map
          of: ComplexMap
      - name: list_of
        type:
          type: list
          of: ComplexMap
      - name: tags
        type: unicode_set
      - name: val
        type: number
        default: 1001
      - name: created
        type: utc_date_time
        nullable: true
        default_for_new: "2024-01-01T00:00:00Z"
"#;

    fn sample() -> ModelSchema {
        ModelSchema::from_yaml(SAMPLE_SCHEMA).unwrap()
    }

    #[test]
    fn test_parse_schema() {
        let schema = sample();

        assert_eq!(schema.version, 1);
        assert_eq!(schema.model_names(), vec!["MapModel"]);
        assert_eq!(schema.map_names(), vec!["ComplexMap"]);
        assert!(schema.is_map_type("ComplexMap"));
        assert!(!schema.is_map_type("MapModel"));

        let model = schema.get_model("MapModel").unwrap();
        assert_eq!(
            model.attribute_names(),
            vec!["map", "map_of", "list_of", "tags", "val", "created"]
        );
    }

    #[test]
    fn test_get_attribute() {
        let schema = sample();

        let val = schema.get_attribute("MapModel", "val").unwrap();
        assert_eq!(val.attribute_type, AttributeType::Number);
        assert!(val.has_default());
        assert_eq!(val.default_value(), Some(Value::Integer(1001)));

        let created = schema.get_attribute("MapModel", "created").unwrap();
        assert!(created.nullable);
        assert!(created.has_default());

        assert!(matches!(
            schema.get_attribute("Nope", "val"),
            Err(SchemaError::ModelNotFound(_))
        ));
        assert!(matches!(
            schema.get_attribute("MapModel", "nope"),
            Err(SchemaError::AttributeNotFound { .. })
        ));
    }

    #[test]
    fn test_unknown_map_type_rejected() {
        let yaml = r#"
models:
  - name: Broken
    attributes:
      - name: items
        type: { type: list, of: Missing }
"#;
        let result = ModelSchema::from_yaml(yaml);
        assert!(matches!(result, Err(SchemaError::UnknownMapType { .. })));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let yaml = r#"
maps:
  - name: Thing
models:
  - name: Thing
"#;
        assert!(matches!(
            ModelSchema::from_yaml(yaml),
            Err(SchemaError::Duplicate(_))
        ));

        let yaml = r#"
models:
  - name: Thing
    attributes:
      - { name: a, type: unicode }
      - { name: a, type: number }
"#;
        assert!(matches!(
            ModelSchema::from_yaml(yaml),
            Err(SchemaError::Duplicate(_))
        ));
    }

    #[test]
    fn test_null_attribute_must_be_nullable() {
        let yaml = r#"
models:
  - name: NullModel
    attributes:
      - { name: "null", type: "null" }
"#;
        assert!(matches!(
            ModelSchema::from_yaml(yaml),
            Err(SchemaError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_instantiate_applies_defaults() {
        let schema = sample();
        let record = schema.instantiate("MapModel", HashMap::new()).unwrap();

        assert_eq!(record.get("val"), Some(&Value::Integer(1001)));
        assert_eq!(
            record.get("created"),
            Some(&Value::DateTime(
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            ))
        );
        assert!(!record.contains("map_of"));
    }

    #[test]
    fn test_instantiate_coerces_nested_maps() {
        let schema = sample();
        let mut values = HashMap::new();
        values.insert(
            "map_of".to_string(),
            Value::map([
                ("name", Value::string("given name")),
                ("birthday", Value::string("1990-01-01T12:00:00Z")),
            ]),
        );
        values.insert(
            "list_of".to_string(),
            Value::List(vec![Value::map([("email", Value::string("a@b.c"))])]),
        );
        values.insert(
            "tags".to_string(),
            Value::List(vec![Value::string("x"), Value::string("y")]),
        );

        let record = schema.instantiate("MapModel", values).unwrap();

        let nested = record.get("map_of").and_then(Value::as_record).unwrap();
        assert_eq!(nested.model, "ComplexMap");
        assert_eq!(nested.get("name"), Some(&Value::string("given name")));
        assert_eq!(
            nested.get("birthday"),
            Some(&Value::DateTime(
                Utc.with_ymd_and_hms(1990, 1, 1, 12, 0, 0).unwrap()
            ))
        );

        let items = record.get("list_of").and_then(Value::as_list).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].as_record().is_some());

        assert_eq!(record.get("tags").and_then(Value::collection_len), Some(2));
        assert!(matches!(record.get("tags"), Some(Value::StringSet(_))));
    }

    #[test]
    fn test_instantiate_rejects_unknown_attribute() {
        let schema = sample();
        let mut values = HashMap::new();
        values.insert("dne".to_string(), Value::string("x"));

        let result = schema.instantiate("MapModel", values);
        assert!(matches!(result, Err(SchemaError::AttributeNotFound { .. })));
    }

    #[test]
    fn test_programmatic_schema() {
        let schema = ModelSchema::new(
            vec![ModelDefinition::new(
                "Simple",
                vec![
                    AttributeDefinition::new("id", AttributeType::Unicode),
                    AttributeDefinition::nullable("note", AttributeType::Unicode)
                        .with_default(serde_yaml::Value::String("n/a".to_string())),
                ],
            )],
            vec![],
        )
        .unwrap();

        let record = schema.instantiate("Simple", HashMap::new()).unwrap();
        assert_eq!(record.get("note"), Some(&Value::string("n/a")));
        assert!(!record.contains("id"));
    }
}
