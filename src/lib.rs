//! fixture-factory library
//!
//! Command-line plumbing around the `model-factory` crate: argument
//! definitions, factory files, and JSON Lines output.
//!
//! # CLI Usage
//!
//! ```bash
//! # List the models of a schema
//! fixture-factory models --schema models.yaml
//!
//! # Ten reproducible UserModel records, never null
//! fixture-factory generate --schema models.yaml --model UserModel \
//!   --count 10 --seed 42 --no-nulls
//!
//! # Per-field directives from a factory file, one caller value
//! fixture-factory generate --schema models.yaml --factory user_factory.yaml \
//!   --set 'map_of={"name": "given name"}' --output users.jsonl
//! ```

pub mod args;
pub mod factory_file;
pub mod generate;

pub use args::{GenerateArgs, ModelsArgs};
pub use factory_file::{ConfigError, FactoryFile, FieldDirective};
pub use generate::{describe_schema, write_records, GenerateError, GenerateMetrics};
