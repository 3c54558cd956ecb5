//! Human-friendly scan ages.

use chrono::{DateTime, Utc};

/// Describes how long ago a scan ran.
///
/// Recent scans read as "Just now", "5h ago", or "Yesterday"; older ones show
/// their calendar date. Timestamps in the future count as "Just now".
#[must_use]
pub fn relative_age(scanned_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = now.signed_duration_since(scanned_at).num_hours();
    match hours {
        ..1 => "Just now".to_owned(),
        1..24 => format!("{hours}h ago"),
        24..48 => "Yesterday".to_owned(),
        _ => scanned_at.format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::relative_age;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0)
            .single()
            .expect("fixture timestamp should be valid")
    }

    #[rstest]
    #[case::seconds(Duration::seconds(30), "Just now")]
    #[case::almost_an_hour(Duration::minutes(59), "Just now")]
    #[case::one_hour(Duration::minutes(60), "1h ago")]
    #[case::hours(Duration::hours(5), "5h ago")]
    #[case::end_of_day(Duration::minutes(23 * 60 + 59), "23h ago")]
    #[case::yesterday(Duration::hours(30), "Yesterday")]
    #[case::older(Duration::hours(48), "2025-03-08")]
    #[case::future(Duration::hours(-3), "Just now")]
    fn describes_age(now: DateTime<Utc>, #[case] age: Duration, #[case] expected: &str) {
        assert_eq!(relative_age(now - age, now), expected);
    }
}
