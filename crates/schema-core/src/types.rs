//! Attribute types for fixture-factory schemas.
//!
//! This module defines `AttributeType`, the closed set of attribute kinds a
//! model or map type can declare. The kinds mirror the attribute catalog of
//! DynamoDB-style ORMs: scalars, sets, maps, lists, and the handful of
//! special-purpose attributes (version counters, TTLs, discriminators).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Declared kind of a single attribute.
///
/// # YAML Format
///
/// Simple kinds are written as strings:
/// ```yaml
/// type: unicode
/// type: number_set
/// type: map
/// ```
///
/// Kinds with parameters use the object format:
/// ```yaml
/// type:
///   type: map
///   of: ComplexMap
/// type:
///   type: list
///   of: ComplexMap
/// type:
///   type: custom
///   name: GeoPoint
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeType {
    /// Unicode string
    Unicode,

    /// Set of unicode strings
    UnicodeSet,

    /// Number (integer)
    Number,

    /// Set of numbers
    NumberSet,

    /// Binary blob
    Binary,

    /// Set of binary blobs
    BinarySet,

    /// Boolean
    Boolean,

    /// JSON document stored as a string attribute
    Json,

    /// Optimistic-locking version counter (never null)
    Version,

    /// Expiry timestamp
    Ttl,

    /// UTC date/time
    UtcDateTime,

    /// Attribute that can only hold null
    Null,

    /// Map attribute. `of` names a declared map type; `None` is a raw map.
    Map {
        /// Nested map type name
        of: Option<String>,
    },

    /// Map with arbitrary, undeclared keys
    DynamicMap,

    /// List attribute. `of` names a declared map type; `None` is a raw list.
    List {
        /// Element map type name
        of: Option<String>,
    },

    /// Polymorphic discriminator
    Discriminator,

    /// Application-defined attribute kind
    Custom {
        /// Custom kind name
        name: String,
    },
}

impl AttributeType {
    /// Raw map attribute.
    pub fn map() -> Self {
        Self::Map { of: None }
    }

    /// Map attribute of the given declared map type.
    pub fn map_of(name: impl Into<String>) -> Self {
        Self::Map {
            of: Some(name.into()),
        }
    }

    /// Raw list attribute.
    pub fn list() -> Self {
        Self::List { of: None }
    }

    /// List attribute whose elements are the given declared map type.
    pub fn list_of(name: impl Into<String>) -> Self {
        Self::List {
            of: Some(name.into()),
        }
    }

    /// Name of the declared map type this attribute refers to, if any.
    pub fn nested_type(&self) -> Option<&str> {
        match self {
            Self::Map { of } | Self::List { of } => of.as_deref(),
            _ => None,
        }
    }

    /// Short, YAML-compatible name of the kind.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Unicode => "unicode",
            Self::UnicodeSet => "unicode_set",
            Self::Number => "number",
            Self::NumberSet => "number_set",
            Self::Binary => "binary",
            Self::BinarySet => "binary_set",
            Self::Boolean => "boolean",
            Self::Json => "json",
            Self::Version => "version",
            Self::Ttl => "ttl",
            Self::UtcDateTime => "utc_date_time",
            Self::Null => "null",
            Self::Map { .. } => "map",
            Self::DynamicMap => "dynamic_map",
            Self::List { .. } => "list",
            Self::Discriminator => "discriminator",
            Self::Custom { name } => name.as_str(),
        }
    }

    fn from_simple_name(name: &str) -> Option<Self> {
        let attribute_type = match name {
            "unicode" | "string" => Self::Unicode,
            "unicode_set" | "string_set" => Self::UnicodeSet,
            "number" => Self::Number,
            "number_set" => Self::NumberSet,
            "binary" => Self::Binary,
            "binary_set" => Self::BinarySet,
            "boolean" | "bool" => Self::Boolean,
            "json" => Self::Json,
            "version" => Self::Version,
            "ttl" => Self::Ttl,
            "utc_date_time" | "utc_datetime" | "datetime" => Self::UtcDateTime,
            "null" => Self::Null,
            "map" => Self::map(),
            "dynamic_map" => Self::DynamicMap,
            "list" => Self::list(),
            "discriminator" => Self::Discriminator,
            _ => return None,
        };
        Some(attribute_type)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map { of: Some(of) } => write!(f, "map<{of}>"),
            Self::List { of: Some(of) } => write!(f, "list<{of}>"),
            Self::Custom { name } => write!(f, "custom<{name}>"),
            other => f.write_str(other.kind_name()),
        }
    }
}

// Supports both the simple string format ("unicode") and the object format
// ({"type": "list", "of": "ComplexMap"}).

impl Serialize for AttributeType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Map { of: Some(of) } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "map")?;
                map.serialize_entry("of", of)?;
                map.end()
            }
            Self::List { of: Some(of) } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "list")?;
                map.serialize_entry("of", of)?;
                map.end()
            }
            Self::Custom { name } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "custom")?;
                map.serialize_entry("name", name)?;
                map.end()
            }
            simple => serializer.serialize_str(simple.kind_name()),
        }
    }
}

impl<'de> Deserialize<'de> for AttributeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct AttributeTypeVisitor;

        impl<'de> Visitor<'de> for AttributeTypeVisitor {
            type Value = AttributeType;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or map representing an attribute type")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                AttributeType::from_simple_name(value)
                    .ok_or_else(|| E::custom(format!("unknown attribute type: {value}")))
            }

            // A bare `type: null` arrives as YAML null rather than a string
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(AttributeType::Null)
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                match type_name.as_str() {
                    "map" => Ok(AttributeType::Map {
                        of: get_field(&fields, "of"),
                    }),
                    "list" => Ok(AttributeType::List {
                        of: get_field(&fields, "of"),
                    }),
                    "custom" => {
                        let name = get_field_required(&fields, "name")?;
                        Ok(AttributeType::Custom { name })
                    }
                    other => AttributeType::from_simple_name(other)
                        .ok_or_else(|| M::Error::custom(format!("unknown attribute type: {other}"))),
                }
            }
        }

        deserializer.deserialize_any(AttributeTypeVisitor)
    }
}

fn get_field<T: for<'de> Deserialize<'de>>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &str,
) -> Option<T> {
    fields
        .get(key)
        .and_then(|v| serde_yaml::from_value(v.clone()).ok())
}

fn get_field_required<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<T, E> {
    let value = fields.get(key).ok_or_else(|| E::missing_field(key))?;
    serde_yaml::from_value(value.clone())
        .map_err(|e| E::custom(format!("invalid field '{key}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_type_parsing() {
        let parsed: AttributeType = serde_yaml::from_str("unicode").unwrap();
        assert_eq!(parsed, AttributeType::Unicode);

        let parsed: AttributeType = serde_yaml::from_str("number_set").unwrap();
        assert_eq!(parsed, AttributeType::NumberSet);

        let parsed: AttributeType = serde_yaml::from_str("map").unwrap();
        assert_eq!(parsed, AttributeType::map());
    }

    #[test]
    fn test_nested_type_parsing() {
        let parsed: AttributeType = serde_yaml::from_str("{ type: list, of: ComplexMap }").unwrap();
        assert_eq!(parsed, AttributeType::list_of("ComplexMap"));
        assert_eq!(parsed.nested_type(), Some("ComplexMap"));

        let parsed: AttributeType = serde_yaml::from_str("{ type: map }").unwrap();
        assert_eq!(parsed, AttributeType::map());
        assert_eq!(parsed.nested_type(), None);
    }

    #[test]
    fn test_custom_type_requires_name() {
        let parsed: AttributeType = serde_yaml::from_str("{ type: custom, name: GeoPoint }").unwrap();
        assert_eq!(
            parsed,
            AttributeType::Custom {
                name: "GeoPoint".to_string()
            }
        );

        let result: Result<AttributeType, _> = serde_yaml::from_str("{ type: custom }");
        assert!(result.is_err());
    }

    #[test]
    fn test_bare_null_type() {
        let parsed: AttributeType = serde_yaml::from_str("null").unwrap();
        assert_eq!(parsed, AttributeType::Null);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<AttributeType, _> = serde_yaml::from_str("decimal128");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_object_format_for_nested() {
        let yaml = serde_yaml::to_string(&AttributeType::map_of("ComplexMap")).unwrap();
        assert!(yaml.contains("of: ComplexMap"));

        let yaml = serde_yaml::to_string(&AttributeType::Ttl).unwrap();
        assert_eq!(yaml.trim(), "ttl");
    }

    #[test]
    fn test_display() {
        assert_eq!(AttributeType::list_of("Item").to_string(), "list<Item>");
        assert_eq!(AttributeType::UtcDateTime.to_string(), "utc_date_time");
    }
}
