//! Attribute classification.
//!
//! [`classify`] maps a declared attribute kind to the [`Category`] the
//! resolver dispatches on. The mapping is total: kinds the factory cannot
//! synthesize become [`Category::Unsupported`].

use schema_core::{AttributeType, ModelSchema};

/// Semantic category of an attribute, as seen by the factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Text,
    Number,
    Boolean,
    Binary,
    TextSet,
    NumberSet,
    BinarySet,
    /// Structured JSON document
    Json,
    Timestamp,
    /// Version counter; never nulled
    Version,
    /// Expiry timestamp
    Ttl,
    /// Attribute that only holds null
    NullOnly,
    /// Map without a declared type: random dictionary
    RawMap,
    /// Map of a declared map type: recursive build
    Nested(String),
    /// List of a declared map type: recursive build per element
    NestedList(String),
    /// List without a declared element type: random words
    RawList,
    /// Cannot be synthesized; carries the kind name for diagnostics
    Unsupported(String),
}

impl Category {
    /// Whether a null draw may apply to this category.
    pub fn is_nullable_kind(&self) -> bool {
        !matches!(self, Self::Version)
    }
}

/// Classify an attribute kind.
///
/// Nested references that do not resolve to a map type in `schema` are
/// unsupported rather than an error, so a partially-declared schema can still
/// be used with a lenient factory.
pub fn classify(attribute_type: &AttributeType, schema: &ModelSchema) -> Category {
    match attribute_type {
        AttributeType::Unicode => Category::Text,
        AttributeType::UnicodeSet => Category::TextSet,
        AttributeType::Number => Category::Number,
        AttributeType::NumberSet => Category::NumberSet,
        AttributeType::Binary => Category::Binary,
        AttributeType::BinarySet => Category::BinarySet,
        AttributeType::Boolean => Category::Boolean,
        AttributeType::Json => Category::Json,
        AttributeType::Version => Category::Version,
        AttributeType::Ttl => Category::Ttl,
        AttributeType::UtcDateTime => Category::Timestamp,
        AttributeType::Null => Category::NullOnly,
        AttributeType::Map { of: None } | AttributeType::DynamicMap => Category::RawMap,
        AttributeType::Map { of: Some(of) } => nested(of, schema, Category::Nested),
        AttributeType::List { of: None } => Category::RawList,
        AttributeType::List { of: Some(of) } => nested(of, schema, Category::NestedList),
        AttributeType::Discriminator | AttributeType::Custom { .. } => {
            Category::Unsupported(attribute_type.to_string())
        }
    }
}

fn nested(of: &str, schema: &ModelSchema, category: fn(String) -> Category) -> Category {
    if schema.get_model(of).is_some() {
        category(of.to_string())
    } else {
        Category::Unsupported(format!("unresolved map type {of}"))
    }
}
