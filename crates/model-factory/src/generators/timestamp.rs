//! Timestamp value generators.
//!
//! Both generators are anchored to an explicit reference time instead of the
//! wall clock so that output is reproducible for a fixed seed.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rand::Rng;

/// Window used for expiry timestamps when the reference time is at the very
/// end of its year.
const FALLBACK_TTL_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

/// Generate an arbitrary timestamp between the Unix epoch and `now`.
pub fn generate_date_time<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    let end = now.timestamp().max(0);
    let ts = rng.random_range(0..=end);
    DateTime::from_timestamp(ts, 0).unwrap_or(now)
}

/// Generate a timestamp strictly after `now`, within the current year when
/// the year has at least one second left.
pub fn generate_expiry<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    let start = now.timestamp() + 1;
    let end = end_of_year(now)
        .map(|dt| dt.timestamp())
        .filter(|end| *end >= start)
        .unwrap_or(start + FALLBACK_TTL_WINDOW_SECS);

    let ts = rng.random_range(start..=end);
    DateTime::from_timestamp(ts, 0).unwrap_or(now + chrono::Duration::seconds(1))
}

fn end_of_year(now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(now.year(), 12, 31, 23, 59, 59).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_date_time_in_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let dt = generate_date_time(&mut rng, reference());
            assert!(dt <= reference());
            assert!(dt.timestamp() >= 0);
        }
    }

    #[test]
    fn test_generate_expiry_after_now() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let dt = generate_expiry(&mut rng, reference());
            assert!(dt > reference());
            assert_eq!(dt.year(), 2024);
        }
    }

    #[test]
    fn test_generate_expiry_at_year_end() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();

        let dt = generate_expiry(&mut rng, now);
        assert!(dt > now);
    }

    #[test]
    fn test_deterministic_generation() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        assert_eq!(
            generate_date_time(&mut rng1, reference()),
            generate_date_time(&mut rng2, reference())
        );
    }
}
