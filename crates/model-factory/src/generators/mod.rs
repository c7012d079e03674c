//! Value generators for the scalar and collection attribute categories.
//!
//! [`Faker`] owns the seeded random stream. Every synthesized value, every
//! probability draw and every collection size made during a build comes from
//! this one stream, so a fixed seed and reference time reproduce the same
//! records.

pub mod dictionary;
pub mod numeric;
pub mod pattern;
pub mod text;
pub mod timestamp;
pub mod uuid;

use chrono::{DateTime, Utc};
use dictionary::DictFlavor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema_core::Value;
use std::collections::BTreeSet;

/// Largest size of a synthesized set or list.
pub const MAX_COLLECTION_LEN: usize = 5;

/// Seeded generator of plausible attribute values.
pub struct Faker {
    rng: StdRng,
    now: DateTime<Utc>,
}

impl Faker {
    /// Create a generator. Without a seed the stream is seeded from the OS.
    pub fn new(seed: Option<u64>, now: DateTime<Utc>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, now }
    }

    /// Create a seeded generator anchored at the current time.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed), Utc::now())
    }

    /// Restart the random stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Reference time used for timestamps and expiries.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Draw `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    /// Draw a collection size in `lower_bound..=MAX_COLLECTION_LEN`.
    pub fn collection_len(&mut self, lower_bound: usize) -> usize {
        self.rng
            .random_range(lower_bound.min(MAX_COLLECTION_LEN)..=MAX_COLLECTION_LEN)
    }

    pub fn text(&mut self) -> Value {
        Value::String(text::sentence(&mut self.rng))
    }

    pub fn text_set(&mut self, lower_bound: usize) -> Value {
        let count = self.collection_len(lower_bound);
        let mut set = BTreeSet::new();
        while set.len() < count {
            set.insert(text::sentence(&mut self.rng));
        }
        Value::StringSet(set)
    }

    pub fn number(&mut self) -> Value {
        Value::Integer(numeric::generate_int(&mut self.rng))
    }

    pub fn number_set(&mut self, lower_bound: usize) -> Value {
        let count = self.collection_len(lower_bound);
        Value::NumberSet(numeric::generate_int_set(&mut self.rng, count))
    }

    pub fn boolean(&mut self) -> Value {
        Value::Bool(self.rng.random_bool(0.5))
    }

    pub fn binary(&mut self) -> Value {
        Value::Bytes(text::sentence(&mut self.rng).into_bytes())
    }

    pub fn binary_set(&mut self, lower_bound: usize) -> Value {
        let count = self.collection_len(lower_bound);
        let mut set = BTreeSet::new();
        while set.len() < count {
            set.insert(text::sentence(&mut self.rng).into_bytes());
        }
        Value::BinarySet(set)
    }

    /// Dictionary restricted to JSON-friendly text and number values.
    pub fn json_document(&mut self) -> Value {
        Value::Map(dictionary::generate_dict(
            &mut self.rng,
            DictFlavor::Structured,
            self.now,
        ))
    }

    /// Dictionary for raw (undeclared) maps.
    pub fn raw_map(&mut self) -> Value {
        Value::Map(dictionary::generate_dict(
            &mut self.rng,
            DictFlavor::Raw,
            self.now,
        ))
    }

    pub fn version(&mut self) -> Value {
        Value::Integer(numeric::generate_version(&mut self.rng))
    }

    /// Timestamp strictly after the reference time.
    pub fn expiry(&mut self) -> Value {
        Value::DateTime(timestamp::generate_expiry(&mut self.rng, self.now))
    }

    /// Timestamp between the Unix epoch and the reference time.
    pub fn date_time(&mut self) -> Value {
        Value::DateTime(timestamp::generate_date_time(&mut self.rng, self.now))
    }

    /// List of `lower_bound..=MAX_COLLECTION_LEN` words.
    pub fn word_list(&mut self, lower_bound: usize) -> Value {
        let count = self.collection_len(lower_bound);
        Value::List(
            text::words(&mut self.rng, count)
                .into_iter()
                .map(Value::String)
                .collect(),
        )
    }
}
