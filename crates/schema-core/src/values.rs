//! Value and record representations.
//!
//! `Value` is the in-memory form of a single attribute value; `Record` is a
//! constructed model or map instance. Both convert to JSON for output, and
//! `Value` can be read back from YAML (schema defaults, factory files) and
//! JSON (command-line overrides).

use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::json;
use serde_yaml::Value as YamlValue;
use std::collections::{BTreeMap, BTreeSet};

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value
    Null,

    /// Boolean value
    Bool(bool),

    /// Integer value
    Integer(i64),

    /// Floating point value
    Float(f64),

    /// String value
    String(String),

    /// Binary data
    Bytes(Vec<u8>),

    /// UTC date/time
    DateTime(DateTime<Utc>),

    /// Set of strings
    StringSet(BTreeSet<String>),

    /// Set of integers
    NumberSet(BTreeSet<i64>),

    /// Set of binary blobs
    BinarySet(BTreeSet<Vec<u8>>),

    /// Ordered list of values
    List(Vec<Value>),

    /// Untyped string-keyed map
    Map(BTreeMap<String, Value>),

    /// Constructed instance of a declared map type
    Record(Record),
}

impl Value {
    /// Create a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create a map value from `(key, value)` pairs.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a byte slice.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get this value as a DateTime.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Try to get this value as a list.
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as an untyped map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get this value as a nested record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Number of elements for sets, lists and maps.
    pub fn collection_len(&self) -> Option<usize> {
        match self {
            Self::StringSet(s) => Some(s.len()),
            Self::NumberSet(s) => Some(s.len()),
            Self::BinarySet(s) => Some(s.len()),
            Self::List(items) => Some(items.len()),
            Self::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Convert a YAML value into an untyped `Value`.
    ///
    /// Type-directed conversion (strings to date/times, sequences to sets)
    /// happens later, when the value is assigned to a declared attribute.
    pub fn from_yaml(yaml: &YamlValue) -> Self {
        match yaml {
            YamlValue::Null => Self::Null,
            YamlValue::Bool(b) => Self::Bool(*b),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    Self::String(n.to_string())
                }
            }
            YamlValue::String(s) => Self::String(s.clone()),
            YamlValue::Sequence(items) => Self::List(items.iter().map(Self::from_yaml).collect()),
            YamlValue::Mapping(map) => Self::Map(
                map.iter()
                    .filter_map(|(k, v)| {
                        let key = match k {
                            YamlValue::String(s) => s.clone(),
                            YamlValue::Number(n) => n.to_string(),
                            YamlValue::Bool(b) => b.to_string(),
                            _ => return None,
                        };
                        Some((key, Self::from_yaml(v)))
                    })
                    .collect(),
            ),
            YamlValue::Tagged(tagged) => Self::from_yaml(&tagged.value),
        }
    }

    /// Convert a JSON value into an untyped `Value`.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    Self::String(n.to_string())
                }
            }
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Array(items) => {
                Self::List(items.iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(map) => Self::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert this value to JSON.
    ///
    /// Binary data is base64 encoded and date/times use RFC 3339.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => json!(*b),
            Self::Integer(i) => json!(*i),
            Self::Float(f) => json!(*f),
            Self::String(s) => json!(s),
            Self::Bytes(b) => json!(encode_bytes(b)),
            Self::DateTime(dt) => json!(dt.to_rfc3339()),
            Self::StringSet(set) => json!(set.iter().collect::<Vec<_>>()),
            Self::NumberSet(set) => json!(set.iter().collect::<Vec<_>>()),
            Self::BinarySet(set) => {
                json!(set.iter().map(|b| encode_bytes(b)).collect::<Vec<_>>())
            }
            Self::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Self::Record(record) => record.to_json(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

fn encode_bytes(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// A constructed model or map instance.
///
/// Only attributes that were assigned (explicitly or through a schema
/// default) are present.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Name of the model or map type this record instantiates
    pub model: String,

    /// Assigned attribute values (attribute name -> value)
    pub attributes: BTreeMap<String, Value>,
}

impl Record {
    /// Create a new record.
    pub fn new(model: impl Into<String>, attributes: BTreeMap<String, Value>) -> Self {
        Self {
            model: model.into(),
            attributes,
        }
    }

    /// Get an attribute value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Whether the attribute was assigned.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Names of all assigned attributes.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    /// Number of assigned attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether no attribute was assigned.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Convert the record to a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Integer(42).as_i64(), Some(42));
        assert_eq!(Value::string("test").as_str(), Some("test"));
        assert_eq!(Value::Bytes(vec![1, 2]).as_bytes(), Some(&[1u8, 2][..]));

        assert_eq!(Value::Bool(true).as_i64(), None);
        assert!(Value::Null.is_null());
    }

    #[test]
    fn test_collection_len() {
        let set: BTreeSet<i64> = [1, 2, 3].into_iter().collect();
        assert_eq!(Value::NumberSet(set).collection_len(), Some(3));
        assert_eq!(Value::List(vec![]).collection_len(), Some(0));
        assert_eq!(Value::Integer(1).collection_len(), None);
    }

    #[test]
    fn test_from_yaml_nested() {
        let yaml: YamlValue =
            serde_yaml::from_str("{ name: test, tags: [a, b], score: 1.5, count: 3 }").unwrap();
        let value = Value::from_yaml(&yaml);
        let map = value.as_map().unwrap();

        assert_eq!(map.get("name"), Some(&Value::string("test")));
        assert_eq!(map.get("count"), Some(&Value::Integer(3)));
        assert_eq!(map.get("score"), Some(&Value::Float(1.5)));
        assert_eq!(
            map.get("tags"),
            Some(&Value::List(vec![Value::string("a"), Value::string("b")]))
        );
    }

    #[test]
    fn test_from_json() {
        let json: serde_json::Value = serde_json::from_str(r#"{"a": null, "b": [1, true]}"#).unwrap();
        let value = Value::from_json(&json);
        let map = value.as_map().unwrap();

        assert_eq!(map.get("a"), Some(&Value::Null));
        assert_eq!(
            map.get("b"),
            Some(&Value::List(vec![Value::Integer(1), Value::Bool(true)]))
        );
    }

    #[test]
    fn test_to_json_encodings() {
        let dt = Utc.with_ymd_and_hms(1990, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(
            Value::DateTime(dt).to_json(),
            json!("1990-01-01T12:00:00+00:00")
        );
        assert_eq!(Value::Bytes(b"hi".to_vec()).to_json(), json!("aGk="));

        let set: BTreeSet<String> = ["b".to_string(), "a".to_string()].into_iter().collect();
        assert_eq!(Value::StringSet(set).to_json(), json!(["a", "b"]));
    }

    #[test]
    fn test_record_to_json() {
        let mut attributes = BTreeMap::new();
        attributes.insert("name".to_string(), Value::string("Alice"));
        attributes.insert(
            "inner".to_string(),
            Value::Record(Record::new(
                "Inner",
                [("n".to_string(), Value::Integer(1))].into_iter().collect(),
            )),
        );
        let record = Record::new("Outer", attributes);

        assert_eq!(record.len(), 2);
        assert!(record.contains("inner"));
        assert_eq!(
            record.to_json(),
            json!({"name": "Alice", "inner": {"n": 1}})
        );
    }
}
