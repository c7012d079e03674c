//! Dictionary value generators.

use super::{numeric, text, timestamp};
use chrono::{DateTime, Utc};
use rand::Rng;
use schema_core::Value;
use std::collections::BTreeMap;

/// Maximum number of entries in a generated dictionary.
pub const MAX_ENTRIES: usize = 10;

/// Which value shapes a dictionary may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictFlavor {
    /// JSON documents: strings, numbers and human-looking text fields.
    Structured,
    /// Raw maps: additionally booleans and word lists.
    Raw,
}

#[derive(Debug, Clone, Copy)]
enum EntryKind {
    Text,
    Int,
    Float,
    Email,
    Address,
    Job,
    PhoneNumber,
    Name,
    Iso8601,
    Bool,
    Words,
}

const STRUCTURED_KINDS: &[EntryKind] = &[
    EntryKind::Text,
    EntryKind::Int,
    EntryKind::Float,
    EntryKind::Email,
    EntryKind::Address,
    EntryKind::Job,
    EntryKind::PhoneNumber,
    EntryKind::Name,
    EntryKind::Iso8601,
];

const RAW_KINDS: &[EntryKind] = &[
    EntryKind::Text,
    EntryKind::Int,
    EntryKind::Float,
    EntryKind::Bool,
    EntryKind::Words,
    EntryKind::Name,
    EntryKind::Iso8601,
];

/// Generate a dictionary with 1..=`MAX_ENTRIES` entries keyed by words.
pub fn generate_dict<R: Rng>(
    rng: &mut R,
    flavor: DictFlavor,
    now: DateTime<Utc>,
) -> BTreeMap<String, Value> {
    let kinds = match flavor {
        DictFlavor::Structured => STRUCTURED_KINDS,
        DictFlavor::Raw => RAW_KINDS,
    };
    let count = rng.random_range(1..=MAX_ENTRIES);

    let mut dict = BTreeMap::new();
    for _ in 0..count {
        let key = text::word(rng);
        let kind = kinds[rng.random_range(0..kinds.len())];
        dict.insert(key, generate_entry(rng, kind, now));
    }
    dict
}

fn generate_entry<R: Rng>(rng: &mut R, kind: EntryKind, now: DateTime<Utc>) -> Value {
    match kind {
        EntryKind::Text => Value::String(text::sentence(rng)),
        EntryKind::Int => Value::Integer(numeric::generate_int(rng)),
        EntryKind::Float => Value::Float(numeric::generate_float(rng, -1000.0, 1000.0)),
        EntryKind::Email => Value::String(text::email(rng)),
        EntryKind::Address => Value::String(text::address(rng)),
        EntryKind::Job => Value::String(text::job(rng)),
        EntryKind::PhoneNumber => Value::String(text::phone_number(rng)),
        EntryKind::Name => Value::String(text::name(rng)),
        EntryKind::Iso8601 => {
            Value::String(timestamp::generate_date_time(rng, now).to_rfc3339())
        }
        EntryKind::Bool => Value::Bool(rng.random_bool(0.5)),
        EntryKind::Words => {
            let count = rng.random_range(1..=5);
            Value::List(text::words(rng, count).into_iter().map(Value::String).collect())
        }
    }
}
