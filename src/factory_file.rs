//! Factory files.
//!
//! A factory file configures a factory from YAML: the model, seed, policy
//! flags, reference time and per-field directives.
//!
//! ```yaml
//! model: UserModel
//! seed: 42
//! allow_nulls: false
//! reference_time: "2024-06-15T12:00:00Z"
//! fields:
//!   id:
//!     type: sequence
//!     start: 1
//!     pattern: "user-{index}"
//!   token:
//!     type: uuid_v4
//!   role:
//!     type: one_of
//!     values: [admin, member]
//!   name:
//!     type: value
//!     value: Alice
//!   email:
//!     type: required
//!   password:
//!     type: ignored
//! ```
//!
//! Directives that draw random values get their own stream, derived from the
//! file's seed, so they do not disturb the factory's stream.

use chrono::{DateTime, Utc};
use model_factory::generators::pattern::render_pattern;
use model_factory::generators::uuid::generate_uuid_v4;
use model_factory::{FactoryConfig, FieldOverride};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use schema_core::{ModelSchema, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Errors loading or applying a factory file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the factory file
    #[error("Failed to read factory file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The named model is not in the schema
    #[error("Model not found in schema: {0}")]
    UnknownModel(String),

    /// A directive names a field the model does not declare
    #[error("Directive for '{field}' does not match any attribute of model '{model}'")]
    UnknownField { model: String, field: String },

    /// A `one_of` directive without choices
    #[error("Directive for '{0}' has no values to choose from")]
    EmptyChoices(String),
}

/// Per-field directive as written in a factory file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldDirective {
    /// Static value
    Value { value: serde_yaml::Value },

    /// Caller must supply the field
    Required,

    /// Field is never passed to the constructor
    Ignored,

    /// Counter starting at `start`, optionally rendered through a pattern
    Sequence {
        #[serde(default)]
        start: i64,
        #[serde(default)]
        pattern: Option<String>,
    },

    /// Random UUID v4 string
    UuidV4,

    /// Random pick from a pool of values
    OneOf { values: Vec<serde_yaml::Value> },
}

/// Factory configuration loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactoryFile {
    /// Model to build
    #[serde(default)]
    pub model: Option<String>,

    /// Random seed
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub allow_nulls: Option<bool>,

    #[serde(default)]
    pub allow_empty: Option<bool>,

    #[serde(default)]
    pub raise_unsupported: Option<bool>,

    /// Reference "now" (RFC 3339)
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,

    /// Directives by field name
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDirective>,
}

impl FactoryFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Check the directives against `model` in `schema`.
    pub fn validate(&self, schema: &ModelSchema, model: &str) -> Result<(), ConfigError> {
        let definition = schema
            .get_model(model)
            .ok_or_else(|| ConfigError::UnknownModel(model.to_string()))?;

        for (field, directive) in &self.fields {
            if !definition.has_attribute(field) {
                return Err(ConfigError::UnknownField {
                    model: model.to_string(),
                    field: field.clone(),
                });
            }
            if matches!(directive, FieldDirective::OneOf { values } if values.is_empty()) {
                return Err(ConfigError::EmptyChoices(field.clone()));
            }
        }
        Ok(())
    }

    /// Build the factory configuration described by this file.
    pub fn to_config(&self) -> Result<FactoryConfig, ConfigError> {
        self.to_config_with_seed(self.seed)
    }

    /// Like [`to_config`](Self::to_config), with `seed` replacing the file's
    /// seed for the factory and for the directive streams.
    pub fn to_config_with_seed(&self, seed: Option<u64>) -> Result<FactoryConfig, ConfigError> {
        let mut config = FactoryConfig {
            model: self.model.clone(),
            seed,
            reference_time: self.reference_time,
            ..FactoryConfig::default()
        };
        if let Some(allow_nulls) = self.allow_nulls {
            config.allow_nulls = allow_nulls;
        }
        if let Some(allow_empty) = self.allow_empty {
            config.allow_empty = allow_empty;
        }
        if let Some(raise_unsupported) = self.raise_unsupported {
            config.raise_unsupported = raise_unsupported;
        }

        let mut seeds = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        for (field, directive) in &self.fields {
            let directive = into_override(field, directive, seeds.random())?;
            config.overrides.insert(field.clone(), directive);
        }
        Ok(config)
    }
}

fn into_override(
    field: &str,
    directive: &FieldDirective,
    seed: u64,
) -> Result<FieldOverride, ConfigError> {
    let directive = match directive {
        FieldDirective::Value { value } => FieldOverride::Value(Value::from_yaml(value)),
        FieldDirective::Required => FieldOverride::Required,
        FieldDirective::Ignored => FieldOverride::Ignored,
        FieldDirective::Sequence { start, pattern } => {
            let next = AtomicI64::new(*start);
            let pattern = pattern.clone();
            let rng = Mutex::new(StdRng::seed_from_u64(seed));
            FieldOverride::callable(move || {
                let index = next.fetch_add(1, Ordering::Relaxed);
                match &pattern {
                    Some(pattern) => {
                        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                        Value::String(render_pattern(pattern, &mut *rng, index))
                    }
                    None => Value::Integer(index),
                }
            })
        }
        FieldDirective::UuidV4 => {
            let rng = Mutex::new(StdRng::seed_from_u64(seed));
            FieldOverride::callable(move || {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                Value::String(generate_uuid_v4(&mut *rng).to_string())
            })
        }
        FieldDirective::OneOf { values } => {
            if values.is_empty() {
                return Err(ConfigError::EmptyChoices(field.to_string()));
            }
            let choices: Vec<Value> = values.iter().map(Value::from_yaml).collect();
            let rng = Mutex::new(StdRng::seed_from_u64(seed));
            FieldOverride::callable(move || {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                choices.choose(&mut *rng).cloned().unwrap_or(Value::Null)
            })
        }
    };
    Ok(directive)
}
