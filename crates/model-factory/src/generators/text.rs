//! Word-pool text generators.
//!
//! All text is assembled from fixed pools so that output depends only on the
//! RNG state.

use rand::seq::IndexedRandom;
use rand::Rng;

/// Lorem-style word pool used for sentences and word lists.
pub const WORDS: &[&str] = &[
    "alias", "amet", "anchor", "animal", "answer", "autumn", "balance", "basket", "beyond",
    "bright", "cable", "candle", "carbon", "center", "change", "circle", "clever", "coffee",
    "common", "copper", "corner", "cotton", "credit", "custom", "danger", "decade", "desert",
    "detail", "dinner", "dolor", "effort", "energy", "engine", "entire", "estate", "exact",
    "factor", "family", "figure", "finger", "forest", "format", "friend", "future", "garden",
    "gentle", "global", "golden", "ground", "growth", "harbor", "health", "hidden", "history",
    "honest", "impact", "income", "island", "jacket", "jungle", "kernel", "ladder", "leader",
    "letter", "lorem", "marble", "market", "matter", "method", "middle", "minute", "mirror",
    "moment", "motion", "narrow", "nature", "number", "object", "office", "orange", "option",
    "palace", "pepper", "people", "period", "planet", "pocket", "policy", "public", "purple",
    "quiet", "rabbit", "reason", "record", "region", "report", "result", "river", "safety",
    "saddle", "season", "second", "signal", "silver", "simple", "source", "spirit", "spring",
    "street", "stream", "summer", "system", "talent", "theory", "ticket", "timber", "travel",
    "valley", "velvet", "vessel", "vision", "window", "winter", "wonder", "yellow",
];

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Carmen", "Daniel", "Elena", "Farid", "Grace", "Hiro", "Ingrid", "Jonas",
    "Kavya", "Liam", "Maya", "Nadia", "Oscar", "Priya", "Quinn", "Rosa", "Samir", "Tara",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Baptiste", "Chen", "Dubois", "Evans", "Fischer", "Garcia", "Haddad", "Ito",
    "Johnson", "Kowalski", "Lopez", "Moreau", "Nakamura", "Okafor", "Patel", "Rossi", "Silva",
];

const JOBS: &[&str] = &[
    "Accountant", "Architect", "Biologist", "Carpenter", "Data engineer", "Editor",
    "Electrician", "Geologist", "Librarian", "Nurse", "Pharmacist", "Pilot", "Surveyor",
    "Teacher", "Translator", "Veterinarian",
];

const STREET_SUFFIXES: &[&str] = &["Street", "Avenue", "Road", "Lane", "Way", "Court"];

const CITIES: &[&str] = &[
    "Ashford", "Brookfield", "Clearwater", "Dunmore", "Eastwood", "Fairview", "Greenville",
    "Hillsboro", "Kingston", "Lakeside", "Milton", "Riverside",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test"];

fn pick<R: Rng>(rng: &mut R, pool: &'static [&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// A single lowercase word.
pub fn word<R: Rng>(rng: &mut R) -> String {
    pick(rng, WORDS).to_string()
}

/// `count` lowercase words.
pub fn words<R: Rng>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count).map(|_| word(rng)).collect()
}

/// A capitalised sentence of 3 to 9 words ending in a period.
pub fn sentence<R: Rng>(rng: &mut R) -> String {
    let count = rng.random_range(3..=9);
    let mut text = words(rng, count).join(" ");
    if let Some(first) = text.get(0..1) {
        let upper = first.to_uppercase();
        text.replace_range(0..1, &upper);
    }
    text.push('.');
    text
}

/// A full person name.
pub fn name<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

/// An email address on a reserved domain.
pub fn email<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}.{}{}@{}",
        pick(rng, FIRST_NAMES).to_lowercase(),
        pick(rng, LAST_NAMES).to_lowercase(),
        rng.random_range(1..100),
        pick(rng, DOMAINS)
    )
}

/// A street address.
pub fn address<R: Rng>(rng: &mut R) -> String {
    let mut street = word(rng);
    if let Some(first) = street.get(0..1) {
        let upper = first.to_uppercase();
        street.replace_range(0..1, &upper);
    }
    format!(
        "{} {} {}, {}",
        rng.random_range(1..1000),
        street,
        pick(rng, STREET_SUFFIXES),
        pick(rng, CITIES)
    )
}

/// A job title.
pub fn job<R: Rng>(rng: &mut R) -> String {
    pick(rng, JOBS).to_string()
}

/// A phone number in `+1-555-XXX-XXXX` form.
pub fn phone_number<R: Rng>(rng: &mut R) -> String {
    format!(
        "+1-555-{:03}-{:04}",
        rng.random_range(0..1000),
        rng.random_range(0..10000)
    )
}
