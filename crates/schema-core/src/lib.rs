//! Core schema types for fixture-factory.
//!
//! This crate provides the attribute schema that record factories introspect
//! and the record types they produce:
//!
//! - [`AttributeType`] - Closed catalog of attribute kinds
//! - [`ModelSchema`] - Models and map types loaded from YAML
//! - [`Value`] - A single attribute value
//! - [`Record`] - A constructed model or map instance
//!
//! # Architecture
//!
//! ```text
//! schema-core (this crate)
//!    │
//!    └─── model-factory   (walks ModelSchema, produces Records)
//!            │
//!            └─── fixture-factory CLI
//! ```
//!
//! # Example
//!
//! ```rust
//! use schema_core::{ModelSchema, Value};
//! use std::collections::HashMap;
//!
//! let schema = ModelSchema::from_yaml(r#"
//! models:
//!   - name: User
//!     attributes:
//!       - name: name
//!         type: unicode
//!       - name: active
//!         type: boolean
//!         default: true
//! "#).unwrap();
//!
//! let mut values = HashMap::new();
//! values.insert("name".to_string(), Value::string("Alice"));
//! let record = schema.instantiate("User", values).unwrap();
//! assert_eq!(record.get("active"), Some(&Value::Bool(true)));
//! ```

pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{AttributeDefinition, ModelDefinition, ModelSchema, SchemaError};
pub use types::AttributeType;
pub use values::{Record, Value};
