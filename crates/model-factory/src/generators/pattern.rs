//! Pattern-based string generator.
//!
//! Supports placeholders:
//! - `{index}` - sequence index
//! - `{uuid}` - UUID v4 drawn from the RNG
//! - `{rand:N}` - random N-digit number

use super::uuid::generate_uuid_v4;
use rand::Rng;

/// Render a pattern, substituting every supported placeholder.
pub fn render_pattern<R: Rng>(pattern: &str, rng: &mut R, index: i64) -> String {
    let mut result = pattern.replace("{index}", &index.to_string());

    while result.contains("{uuid}") {
        result = result.replacen("{uuid}", &generate_uuid_v4(rng).to_string(), 1);
    }

    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("{rand:") {
        let start = search_from + offset;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let end = start + len;
        match result[start + 6..end].parse::<usize>() {
            Ok(digits) => {
                let random_num = generate_random_digits(rng, digits);
                result = format!("{}{}{}", &result[..start], random_num, &result[end + 1..]);
                search_from = start + random_num.len();
            }
            // Leave malformed placeholders untouched
            Err(_) => search_from = end + 1,
        }
    }

    result
}

/// Generate a random number with exactly N digits.
fn generate_random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    (0..digits)
        .map(|i| {
            // No leading zero
            let low = if i == 0 { 1 } else { 0 };
            char::from(b'0' + rng.random_range(low..10u8))
        })
        .collect()
}
