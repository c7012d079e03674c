//! Numeric value generators.

use rand::Rng;
use std::collections::BTreeSet;

/// Upper bound (inclusive) for plain integer attributes.
pub const MAX_INT: i64 = 9999;

/// Inclusive range of optimistic-locking version counters.
pub const VERSION_RANGE: (i64, i64) = (1, 5);

/// Generate a random integer in `0..=MAX_INT`.
pub fn generate_int<R: Rng>(rng: &mut R) -> i64 {
    generate_int_range(rng, 0, MAX_INT)
}

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    rng.random_range(min..=max)
}

/// Generate a random float with two decimal places in the given range.
pub fn generate_float<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    let value: f64 = rng.random_range(min..=max);
    (value * 100.0).round() / 100.0
}

/// Generate a version counter.
pub fn generate_version<R: Rng>(rng: &mut R) -> i64 {
    generate_int_range(rng, VERSION_RANGE.0, VERSION_RANGE.1)
}

/// Generate a set of `count` distinct integers.
///
/// Integers are drawn until the set reaches `count` elements; the integer
/// domain is large enough that this terminates quickly.
pub fn generate_int_set<R: Rng>(rng: &mut R, count: usize) -> BTreeSet<i64> {
    let mut set = BTreeSet::new();
    while set.len() < count {
        set.insert(generate_int(rng));
    }
    set
}
