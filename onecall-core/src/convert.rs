use chrono::{DateTime, Utc};

/// Convert seconds since the Unix epoch into a UTC timestamp.
///
/// Every `u64` maps to a value: counts past the last instant chrono can
/// represent saturate to [`DateTime::<Utc>::MAX_UTC`].
pub fn epoch_to_utc(secs: u64) -> DateTime<Utc> {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Convert a 0-100 percentage into a 0.0-1.0 fraction. No clamping.
pub fn percent_to_fraction(pct: f64) -> f64 {
    pct / 100.0
}
