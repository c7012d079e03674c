//! Error types for record factories.

use thiserror::Error;

/// Errors that abort a build.
///
/// No partial record is ever returned: every variant is raised before the
/// model constructor runs.
#[derive(Error, Debug)]
pub enum FactoryError {
    /// The factory configuration names no model.
    #[error("Factory has no model configured")]
    ModelNotConfigured,

    /// The configured model is not part of the schema.
    #[error("Model not found in schema: {0}")]
    ModelNotFound(String),

    /// A field marked required was not supplied by the caller.
    #[error("Required argument '{field}' for model '{model}' was not in the build arguments")]
    RequiredArgumentMissing { model: String, field: String },

    /// The attribute kind cannot be synthesized and the factory is strict.
    #[error("Attribute '{field}' of model '{model}' has unsupported type '{kind}'")]
    UnsupportedAttribute {
        model: String,
        field: String,
        kind: String,
    },

    /// The schema rejected the assembled attributes.
    #[error("Schema error: {0}")]
    Schema(#[from] schema_core::SchemaError),
}
