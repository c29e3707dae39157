// Date utility functions
// Normalizes every accepted date representation into one canonical instant

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical instant used by all countdown and listing logic.
pub type Instant = DateTime<Utc>;

/// Errors raised while normalizing an incoming date value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("date value is empty")]
    Empty,
    #[error("unrecognised date format: {0:?}")]
    Unparseable(String),
    #[error("timestamp out of range: {seconds}s {nanoseconds}ns")]
    OutOfRange { seconds: i64, nanoseconds: i64 },
}

/// Backend timestamp wrapper as exported by the hosted document store.
///
/// Accepts both `{"seconds", "nanoseconds"}` and the underscored
/// `{"_seconds", "_nanoseconds"}` spelling found in JSON exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTimestamp {
    #[serde(alias = "_seconds")]
    pub seconds: i64,
    #[serde(alias = "_nanoseconds", default)]
    pub nanoseconds: i64,
}

/// Any date representation accepted at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInstant {
    /// An already-typed date/time value
    Native(DateTime<FixedOffset>),
    Timestamp(StoreTimestamp),
    /// Epoch milliseconds
    Millis(i64),
    Text(String),
}

impl From<DateTime<Utc>> for RawInstant {
    fn from(value: DateTime<Utc>) -> Self {
        RawInstant::Native(value.fixed_offset())
    }
}

impl From<DateTime<Local>> for RawInstant {
    fn from(value: DateTime<Local>) -> Self {
        RawInstant::Native(value.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for RawInstant {
    fn from(value: DateTime<FixedOffset>) -> Self {
        RawInstant::Native(value)
    }
}

impl From<StoreTimestamp> for RawInstant {
    fn from(value: StoreTimestamp) -> Self {
        RawInstant::Timestamp(value)
    }
}

impl From<&str> for RawInstant {
    fn from(value: &str) -> Self {
        RawInstant::Text(value.to_string())
    }
}

impl From<String> for RawInstant {
    fn from(value: String) -> Self {
        RawInstant::Text(value)
    }
}

impl RawInstant {
    /// Convert to the canonical instant.
    pub fn normalize(&self) -> Result<Instant, DateError> {
        normalize(self)
    }
}

/// Convert any accepted representation into the canonical instant.
pub fn normalize(raw: &RawInstant) -> Result<Instant, DateError> {
    match raw {
        RawInstant::Native(value) => Ok(value.with_timezone(&Utc)),
        RawInstant::Timestamp(ts) => from_store_timestamp(ts),
        RawInstant::Millis(millis) => from_epoch_millis(*millis),
        RawInstant::Text(text) => parse_text(text),
    }
}

fn from_store_timestamp(ts: &StoreTimestamp) -> Result<Instant, DateError> {
    let out_of_range = || DateError::OutOfRange {
        seconds: ts.seconds,
        nanoseconds: ts.nanoseconds,
    };

    let nanos = u32::try_from(ts.nanoseconds)
        .ok()
        .filter(|n| *n < 1_000_000_000)
        .ok_or_else(out_of_range)?;

    DateTime::from_timestamp(ts.seconds, nanos).ok_or_else(out_of_range)
}

fn from_epoch_millis(millis: i64) -> Result<Instant, DateError> {
    DateTime::from_timestamp_millis(millis).ok_or(DateError::OutOfRange {
        seconds: millis.div_euclid(1_000),
        nanoseconds: millis.rem_euclid(1_000) * 1_000_000,
    })
}

/// Parse a textual date.
///
/// Supported shapes, tried in order: RFC 3339, all-digit epoch milliseconds,
/// a local date-time (`YYYY-MM-DDTHH:MM[:SS]` or with a space), and a bare
/// `YYYY-MM-DD` which is taken as midnight UTC.
pub fn parse_text(text: &str) -> Result<Instant, DateError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DateError::Empty);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        let millis: i64 = trimmed
            .parse()
            .map_err(|_| DateError::Unparseable(trimmed.to_string()))?;
        return from_epoch_millis(millis);
    }

    const LOCAL_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return local_to_utc(naive).ok_or_else(|| DateError::Unparseable(trimmed.to_string()));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    Err(DateError::Unparseable(trimmed.to_string()))
}

fn local_to_utc(naive: NaiveDateTime) -> Option<Instant> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        // Fall-back transitions: take the earlier reading of the wall clock.
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use pretty_assertions::assert_eq;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Instant {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_native_values_normalize_to_same_instant() {
        let instant = utc(2025, 8, 9, 19, 30, 0);
        let offset = instant.with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());

        assert_eq!(normalize(&instant.into()).unwrap(), instant);
        assert_eq!(normalize(&offset.into()).unwrap(), instant);
        assert_eq!(normalize(&instant.with_timezone(&Local).into()).unwrap(), instant);
    }

    #[test]
    fn test_store_timestamp() {
        let ts = StoreTimestamp {
            seconds: 1_700_000_000,
            nanoseconds: 500_000_000,
        };
        let instant = normalize(&ts.into()).unwrap();
        assert_eq!(instant.timestamp(), 1_700_000_000);
        assert_eq!(instant.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_store_timestamp_rejects_bad_nanos() {
        let ts = StoreTimestamp {
            seconds: 0,
            nanoseconds: 1_000_000_000,
        };
        assert!(matches!(
            normalize(&ts.into()),
            Err(DateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rfc3339_text() {
        let instant = parse_text("2025-08-09T21:30:00+02:00").unwrap();
        assert_eq!(instant, utc(2025, 8, 9, 19, 30, 0));

        let zulu = parse_text(" 2025-08-09T19:30:00Z ").unwrap();
        assert_eq!(zulu, utc(2025, 8, 9, 19, 30, 0));
    }

    #[test]
    fn test_epoch_millis_text_and_number() {
        let expected = utc(2023, 11, 14, 22, 13, 20);
        assert_eq!(parse_text("1700000000000").unwrap(), expected);
        assert_eq!(normalize(&RawInstant::Millis(1_700_000_000_000)).unwrap(), expected);
    }

    #[test]
    fn test_date_only_is_midnight_utc() {
        assert_eq!(parse_text("2025-12-24").unwrap(), utc(2025, 12, 24, 0, 0, 0));
    }

    #[test]
    fn test_local_datetime_text() {
        let parsed = parse_text("2025-12-24T18:45").unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.hour(), 18);
        assert_eq!(local.minute(), 45);

        assert_eq!(parse_text("2025-12-24 18:45:00").unwrap(), parsed);
    }

    #[test]
    fn test_empty_and_garbage_text() {
        assert_eq!(parse_text("   "), Err(DateError::Empty));
        assert_eq!(
            parse_text("next tuesday"),
            Err(DateError::Unparseable("next tuesday".to_string()))
        );
    }

    #[test]
    fn test_deserialize_each_representation() {
        let expected = utc(2023, 11, 14, 22, 13, 20);

        let wrapped: RawInstant =
            serde_json::from_str(r#"{"seconds":1700000000,"nanoseconds":0}"#).unwrap();
        assert_eq!(wrapped.normalize().unwrap(), expected);

        let exported: RawInstant =
            serde_json::from_str(r#"{"_seconds":1700000000,"_nanoseconds":0}"#).unwrap();
        assert_eq!(exported.normalize().unwrap(), expected);

        let millis: RawInstant = serde_json::from_str("1700000000000").unwrap();
        assert_eq!(millis.normalize().unwrap(), expected);

        let text: RawInstant = serde_json::from_str(r#""2023-11-14T22:13:20Z""#).unwrap();
        assert_eq!(text.normalize().unwrap(), expected);
    }
}
