//! Factory configuration and the factory entry point.

use crate::builder::RecordBuilder;
use crate::error::FactoryError;
use crate::fields::FieldOverride;
use crate::generators::Faker;
use chrono::{DateTime, Utc};
use schema_core::{ModelSchema, Record, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Settings for building records of one model.
///
/// Nested models get a configuration derived from their parent's: the seed,
/// the three policy flags and the reference time carry over, the override
/// table does not.
#[derive(Debug, Clone)]
pub struct FactoryConfig {
    /// Model to build; `None` until a factory is bound to a model
    pub model: Option<String>,
    /// Seed of the random stream; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Whether nullable fields may be set to null
    pub allow_nulls: bool,
    /// Whether synthesized sets and lists may be empty
    pub allow_empty: bool,
    /// Whether unsupported attribute kinds abort the build
    pub raise_unsupported: bool,
    /// Per-field directives, by field name
    pub overrides: HashMap<String, FieldOverride>,
    /// "Now" for timestamps and expiries; `None` uses the wall clock
    pub reference_time: Option<DateTime<Utc>>,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            model: None,
            seed: None,
            allow_nulls: true,
            allow_empty: true,
            raise_unsupported: false,
            overrides: HashMap::new(),
            reference_time: None,
        }
    }
}

impl FactoryConfig {
    /// Default configuration bound to `model`.
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_allow_nulls(mut self, allow_nulls: bool) -> Self {
        self.allow_nulls = allow_nulls;
        self
    }

    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    pub fn with_raise_unsupported(mut self, raise_unsupported: bool) -> Self {
        self.raise_unsupported = raise_unsupported;
        self
    }

    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    /// Attach a directive to a field, replacing any earlier one.
    pub fn with_override(mut self, field: impl Into<String>, directive: FieldOverride) -> Self {
        self.overrides.insert(field.into(), directive);
        self
    }

    /// Configuration for a nested model, inheriting seed and policy.
    pub fn derive(&self, model: &str) -> Self {
        debug!(parent = ?self.model, model, "Deriving nested factory");
        Self {
            model: Some(model.to_string()),
            seed: self.seed,
            allow_nulls: self.allow_nulls,
            allow_empty: self.allow_empty,
            raise_unsupported: self.raise_unsupported,
            overrides: HashMap::new(),
            reference_time: self.reference_time,
        }
    }

    /// Replace the settings that `policy` specifies.
    pub fn apply(mut self, policy: &PolicyOverrides) -> Self {
        if let Some(seed) = policy.seed {
            self.seed = Some(seed);
        }
        if let Some(allow_nulls) = policy.allow_nulls {
            self.allow_nulls = allow_nulls;
        }
        if let Some(allow_empty) = policy.allow_empty {
            self.allow_empty = allow_empty;
        }
        if let Some(raise_unsupported) = policy.raise_unsupported {
            self.raise_unsupported = raise_unsupported;
        }
        self
    }

    /// Smallest size of a synthesized collection.
    pub fn lower_bound(&self) -> usize {
        if self.allow_empty {
            0
        } else {
            1
        }
    }

    pub fn override_for(&self, field: &str) -> Option<&FieldOverride> {
        self.overrides.get(field)
    }

    pub fn is_ignored(&self, field: &str) -> bool {
        matches!(self.override_for(field), Some(FieldOverride::Ignored))
    }
}

/// Optional replacements for a base configuration's seed and policy flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyOverrides {
    pub seed: Option<u64>,
    pub allow_nulls: Option<bool>,
    pub allow_empty: Option<bool>,
    pub raise_unsupported: Option<bool>,
}

/// Builds records of one model of a schema.
///
/// The factory owns its random stream. Records built by one factory with a
/// fixed seed and reference time are reproducible; nested records draw from
/// the same stream as their parent.
pub struct ModelFactory {
    schema: Arc<ModelSchema>,
    config: FactoryConfig,
    faker: Faker,
}

impl ModelFactory {
    pub fn new(schema: Arc<ModelSchema>, config: FactoryConfig) -> Self {
        let now = config.reference_time.unwrap_or_else(Utc::now);
        let faker = Faker::new(config.seed, now);
        Self {
            schema,
            config,
            faker,
        }
    }

    /// Factory for `model` built from `base` (or the defaults) with `policy`
    /// applied. Directives on `base` carry over.
    pub fn create_factory(
        schema: Arc<ModelSchema>,
        model: &str,
        base: Option<&FactoryConfig>,
        policy: PolicyOverrides,
    ) -> Self {
        let mut config = base.cloned().unwrap_or_default().apply(&policy);
        config.model = Some(model.to_string());
        debug!(model, ?policy, "Created factory");
        Self::new(schema, config)
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Restart the random stream from `seed`.
    pub fn set_random_seed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.faker.reseed(seed);
    }

    /// Build one record, with `overrides` taking precedence over synthesis.
    pub fn build(&mut self, overrides: HashMap<String, Value>) -> Result<Record, FactoryError> {
        RecordBuilder::new(&self.schema, &mut self.faker).build(&self.config, overrides)
    }

    /// Build one record without caller values.
    pub fn build_default(&mut self) -> Result<Record, FactoryError> {
        self.build(HashMap::new())
    }

    /// Build `count` records, each seeded with the same caller values.
    pub fn build_batch(
        &mut self,
        count: usize,
        overrides: &HashMap<String, Value>,
    ) -> Result<Vec<Record>, FactoryError> {
        (0..count).map(|_| self.build(overrides.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn schema() -> Arc<ModelSchema> {
        Arc::new(
            ModelSchema::from_yaml(
                r#"
maps:
  - name: Inner
    attributes:
      - { name: word, type: unicode }
models:
  - name: Outer
    attributes:
      - { name: id, type: unicode }
      - { name: tags, type: unicode_set }
      - { name: inner, type: { type: map, of: Inner } }
"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_default_policy() {
        let config = FactoryConfig::default();
        assert!(config.allow_nulls);
        assert!(config.allow_empty);
        assert!(!config.raise_unsupported);
        assert_eq!(config.lower_bound(), 0);
        assert_eq!(config.with_allow_empty(false).lower_bound(), 1);
    }

    #[test]
    fn test_derive_copies_policy_not_overrides() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let config = FactoryConfig::for_model("Outer")
            .with_seed(9)
            .with_allow_nulls(false)
            .with_raise_unsupported(true)
            .with_reference_time(now)
            .with_override("id", FieldOverride::Required);

        let derived = config.derive("Inner");
        assert_eq!(derived.model.as_deref(), Some("Inner"));
        assert_eq!(derived.seed, Some(9));
        assert!(!derived.allow_nulls);
        assert!(derived.allow_empty);
        assert!(derived.raise_unsupported);
        assert_eq!(derived.reference_time, Some(now));
        assert!(derived.overrides.is_empty());
    }

    #[test]
    fn test_create_factory_applies_policy() {
        let base = FactoryConfig::default()
            .with_seed(1)
            .with_override("id", FieldOverride::value("fixed"));
        let policy = PolicyOverrides {
            seed: Some(5),
            allow_empty: Some(false),
            ..PolicyOverrides::default()
        };

        let mut factory = ModelFactory::create_factory(schema(), "Outer", Some(&base), policy);
        assert_eq!(factory.config().seed, Some(5));
        assert!(!factory.config().allow_empty);
        assert!(factory.config().allow_nulls);

        let record = factory.build_default().unwrap();
        assert_eq!(record.get("id"), Some(&Value::string("fixed")));
        assert!(record.get("tags").and_then(Value::collection_len).unwrap() >= 1);
    }

    #[test]
    fn test_same_seed_same_records() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let config = FactoryConfig::for_model("Outer")
            .with_seed(42)
            .with_reference_time(now);

        let mut first = ModelFactory::new(schema(), config.clone());
        let mut second = ModelFactory::new(schema(), config);

        assert_eq!(
            first.build_batch(5, &HashMap::new()).unwrap(),
            second.build_batch(5, &HashMap::new()).unwrap()
        );
    }

    #[test]
    fn test_set_random_seed_restarts_stream() {
        let mut factory = ModelFactory::new(schema(), FactoryConfig::for_model("Outer"));

        factory.set_random_seed(7);
        let first = factory.build_default().unwrap();
        factory.set_random_seed(7);
        let second = factory.build_default().unwrap();

        assert_eq!(first, second);
        assert_eq!(factory.config().seed, Some(7));
    }

    #[test]
    fn test_unbound_factory_errors() {
        let mut factory = ModelFactory::new(schema(), FactoryConfig::default());
        assert!(matches!(
            factory.build_default(),
            Err(FactoryError::ModelNotConfigured)
        ));
    }
}
