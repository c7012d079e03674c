//! Record factories for fixture-factory.
//!
//! This crate builds fully-populated records of a [`schema_core`] model with
//! plausible random values. Each attribute is resolved independently: it can
//! be left to the schema default, nulled, taken from the caller, taken from a
//! per-field directive, or synthesized from its declared kind. Nested map
//! attributes recurse into their map type.
//!
//! # Architecture
//!
//! ```text
//! ModelSchema (YAML)      FactoryConfig
//!        │                     │
//!        └────────┬────────────┘
//!                 ▼
//!        ┌─────────────────┐
//!        │  ModelFactory   │
//!        │                 │
//!        │  - config       │
//!        │  - faker (rng)  │
//!        └────────┬────────┘
//!                 │  per attribute: classify → resolve → synthesize
//!                 ▼
//!   ModelDefinition::instantiate → Record
//! ```
//!
//! # Example
//!
//! ```rust
//! use model_factory::{FactoryConfig, FieldOverride, ModelFactory};
//! use schema_core::{ModelSchema, Value};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let schema = Arc::new(ModelSchema::from_yaml(r#"
//! models:
//!   - name: User
//!     attributes:
//!       - name: id
//!         type: unicode
//!       - name: name
//!         type: unicode
//!       - name: logins
//!         type: number_set
//! "#).unwrap());
//!
//! let config = FactoryConfig::for_model("User")
//!     .with_seed(42)
//!     .with_override("id", FieldOverride::value("user-1"));
//! let mut factory = ModelFactory::new(schema, config);
//!
//! let mut overrides = HashMap::new();
//! overrides.insert("name".to_string(), Value::string("Alice"));
//! let user = factory.build(overrides).unwrap();
//!
//! assert_eq!(user.get("id"), Some(&Value::string("user-1")));
//! assert_eq!(user.get("name"), Some(&Value::string("Alice")));
//! ```

pub mod builder;
pub mod classify;
pub mod error;
pub mod factory;
pub mod fields;
pub mod generators;
pub mod resolve;

// Re-exports for convenience
pub use builder::RecordBuilder;
pub use classify::{classify, Category};
pub use error::FactoryError;
pub use factory::{FactoryConfig, ModelFactory, PolicyOverrides};
pub use fields::{BoundArgs, Deferred, FieldOverride, ValueFn};
pub use generators::Faker;
pub use resolve::Resolution;
