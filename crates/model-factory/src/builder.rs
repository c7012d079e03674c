//! Record assembly.

use crate::error::FactoryError;
use crate::factory::FactoryConfig;
use crate::generators::Faker;
use crate::resolve::Resolution;
use schema_core::{ModelSchema, Record, Value};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Walks a model's attributes and hands the resolved set to the schema
/// constructor.
///
/// Nested builds reuse the same builder, so every value of a record tree is
/// drawn from one random stream.
pub struct RecordBuilder<'a> {
    pub(crate) schema: &'a ModelSchema,
    pub(crate) faker: &'a mut Faker,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(schema: &'a ModelSchema, faker: &'a mut Faker) -> Self {
        Self { schema, faker }
    }

    /// Build one record of `config.model`.
    ///
    /// Caller values for attributes the model does not declare, or that the
    /// configuration ignores, are dropped. A missing required field aborts
    /// the build before the constructor runs.
    pub fn build(
        &mut self,
        config: &FactoryConfig,
        overrides: HashMap<String, Value>,
    ) -> Result<Record, FactoryError> {
        let model = config
            .model
            .as_deref()
            .ok_or(FactoryError::ModelNotConfigured)?;
        let schema = self.schema;
        let definition = schema
            .get_model(model)
            .ok_or_else(|| FactoryError::ModelNotFound(model.to_string()))?;

        let mut attributes: HashMap<String, Value> = overrides
            .into_iter()
            .filter(|(name, _)| {
                if !definition.has_attribute(name) {
                    debug!(model, field = %name, "Dropping argument not declared on model");
                    return false;
                }
                if config.is_ignored(name) {
                    debug!(model, field = %name, "Dropping argument for ignored field");
                    return false;
                }
                true
            })
            .collect();

        for attribute in &definition.attributes {
            let supplied = attributes.remove(&attribute.name);
            let resolution =
                self.resolve_field(config, model, attribute, supplied.as_ref())?;
            trace!(model, field = %attribute.name, ?resolution, "Resolved field");

            match resolution {
                Resolution::Omitted => {
                    if let Some(value) = supplied {
                        attributes.insert(attribute.name.clone(), value);
                    }
                }
                Resolution::SetNull => {
                    attributes.insert(attribute.name.clone(), Value::Null);
                }
                Resolution::SetValue(value) => {
                    attributes.insert(attribute.name.clone(), value);
                }
                Resolution::RequiresCallerInput => {
                    return Err(FactoryError::RequiredArgumentMissing {
                        model: model.to_string(),
                        field: attribute.name.clone(),
                    });
                }
            }
        }

        Ok(definition.instantiate(schema, attributes)?)
    }
}
