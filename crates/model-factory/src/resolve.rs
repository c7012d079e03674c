//! Per-field resolution.
//!
//! For one attribute, [`RecordBuilder::resolve_field`] decides whether the
//! field is left to the schema default, nulled, taken from the caller or a
//! directive, or synthesized. The first matching rule wins:
//!
//! 1. `Ignored` directive: omitted.
//! 2. Schema default present and the omission draw succeeds: omitted.
//! 3. Caller value: used, threading maps into nested builds.
//! 4. Factory directive: value, callable, deferred, or required.
//! 5. Nullable attribute and the null draw succeeds: null.
//! 6. Synthesized from the attribute category.

use crate::builder::RecordBuilder;
use crate::classify::{classify, Category};
use crate::error::FactoryError;
use crate::factory::FactoryConfig;
use crate::fields::FieldOverride;
use schema_core::{AttributeDefinition, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Chance that a field with a schema default is left out.
pub const DEFAULT_OMIT_PROBABILITY: f64 = 0.25;

/// Chance that a nullable field is set to null.
pub const NULL_PROBABILITY: f64 = 0.25;

/// Disposition of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Not passed to the constructor by the factory.
    Omitted,
    /// Passed as null.
    SetNull,
    /// Passed with this value.
    SetValue(Value),
    /// The field is required and the caller did not supply it.
    RequiresCallerInput,
}

impl RecordBuilder<'_> {
    /// Resolve one attribute of `model`.
    ///
    /// `supplied` is the caller's value for the attribute, if any. When the
    /// outcome is [`Resolution::Omitted`] the caller value, if present, is
    /// still handed to the constructor unchanged.
    pub fn resolve_field(
        &mut self,
        config: &FactoryConfig,
        model: &str,
        attribute: &AttributeDefinition,
        supplied: Option<&Value>,
    ) -> Result<Resolution, FactoryError> {
        let directive = config.override_for(&attribute.name);
        if matches!(directive, Some(FieldOverride::Ignored)) {
            return Ok(Resolution::Omitted);
        }

        if attribute.has_default() && self.faker.chance(DEFAULT_OMIT_PROBABILITY) {
            return Ok(Resolution::Omitted);
        }

        let category = classify(&attribute.attribute_type, self.schema);

        if let Some(value) = supplied {
            return self
                .thread_caller_value(config, &category, value)
                .map(Resolution::SetValue);
        }

        if let Some(directive) = directive {
            if matches!(directive, FieldOverride::Required) {
                return Ok(Resolution::RequiresCallerInput);
            }
            if let Some(value) = directive.produce() {
                return Ok(Resolution::SetValue(value));
            }
        }

        if config.allow_nulls
            && attribute.nullable
            && category.is_nullable_kind()
            && self.faker.chance(NULL_PROBABILITY)
        {
            return Ok(Resolution::SetNull);
        }

        self.synthesize(config, model, attribute, &category)
    }

    /// Produce a fresh value for the attribute's category.
    fn synthesize(
        &mut self,
        config: &FactoryConfig,
        model: &str,
        attribute: &AttributeDefinition,
        category: &Category,
    ) -> Result<Resolution, FactoryError> {
        let lower_bound = config.lower_bound();
        let value = match category {
            Category::Text => self.faker.text(),
            Category::Number => self.faker.number(),
            Category::Boolean => self.faker.boolean(),
            Category::Binary => self.faker.binary(),
            Category::TextSet => self.faker.text_set(lower_bound),
            Category::NumberSet => self.faker.number_set(lower_bound),
            Category::BinarySet => self.faker.binary_set(lower_bound),
            Category::Json => self.faker.json_document(),
            Category::Timestamp => self.faker.date_time(),
            Category::Version => self.faker.version(),
            Category::Ttl => self.faker.expiry(),
            Category::RawMap => self.faker.raw_map(),
            Category::RawList => self.faker.word_list(lower_bound),
            Category::NullOnly => return Ok(null_or_omitted(config, attribute)),
            Category::Nested(target) => {
                let derived = config.derive(target);
                Value::Record(self.build(&derived, HashMap::new())?)
            }
            Category::NestedList(target) => {
                let derived = config.derive(target);
                let count = self.faker.collection_len(lower_bound);
                let items = (0..count)
                    .map(|_| self.build(&derived, HashMap::new()).map(Value::Record))
                    .collect::<Result<Vec<_>, _>>()?;
                Value::List(items)
            }
            Category::Unsupported(kind) => {
                if config.raise_unsupported {
                    return Err(FactoryError::UnsupportedAttribute {
                        model: model.to_string(),
                        field: attribute.name.clone(),
                        kind: kind.clone(),
                    });
                }
                debug!(
                    model,
                    field = %attribute.name,
                    kind = %kind,
                    "Skipping unsupported attribute"
                );
                return Ok(null_or_omitted(config, attribute));
            }
        };
        Ok(Resolution::SetValue(value))
    }

    /// Use a caller value, building nested records from supplied maps.
    fn thread_caller_value(
        &mut self,
        config: &FactoryConfig,
        category: &Category,
        value: &Value,
    ) -> Result<Value, FactoryError> {
        match (category, value) {
            (Category::Nested(target), Value::Map(map)) => {
                let derived = config.derive(target);
                Ok(Value::Record(self.build(&derived, seed_overrides(map))?))
            }
            (Category::NestedList(target), Value::List(items)) => {
                let derived = config.derive(target);
                items
                    .iter()
                    .map(|item| match item {
                        Value::Map(map) => self
                            .build(&derived, seed_overrides(map))
                            .map(Value::Record),
                        other => Ok(other.clone()),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List)
            }
            _ => Ok(value.clone()),
        }
    }
}

/// Null when the policy and the attribute both allow it, otherwise omitted.
fn null_or_omitted(config: &FactoryConfig, attribute: &AttributeDefinition) -> Resolution {
    if config.allow_nulls && attribute.nullable {
        Resolution::SetNull
    } else {
        Resolution::Omitted
    }
}

fn seed_overrides(map: &BTreeMap<String, Value>) -> HashMap<String, Value> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}
