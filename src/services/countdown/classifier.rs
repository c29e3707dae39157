//! Time-status classification for scheduled events.
//!
//! Maps the gap between an event and the current instant onto one of the
//! five [`StatusTier`] buckets. Days are counted with ceiling division, so
//! any partial day still ahead counts as a whole day.

use chrono::{DateTime, Utc};

use crate::models::status::{EventStatus, StatusTier};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Events further out than this many days collapse into [`StatusTier::Far`].
pub const FAR_AWAY_DAYS: i64 = 50;

/// Events this many days out or fewer are [`StatusTier::Soon`].
pub const SOON_DAYS: i64 = 3;

/// Whole days until `target`, rounded up.
///
/// Anything between one millisecond and one full day ahead yields `1`;
/// an event that started less than a day ago yields `0`.
pub fn days_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = target.signed_duration_since(now).num_milliseconds();
    ceil_div(millis, MILLIS_PER_DAY)
}

/// Classify `target` relative to `now`.
pub fn classify(target: DateTime<Utc>, now: DateTime<Utc>) -> EventStatus {
    classify_days(days_remaining(target, now))
}

/// Classify an already computed day count.
///
/// The `> 50` check only runs after the `<= 3` check, and exactly 50 days is
/// still a normal countdown.
pub fn classify_days(days: i64) -> EventStatus {
    if days < 0 {
        EventStatus::new("Event passed", StatusTier::Passed)
    } else if days == 0 {
        EventStatus::new("Happening today", StatusTier::Today)
    } else if days <= SOON_DAYS {
        EventStatus::new("Happening soon", StatusTier::Soon)
    } else if days > FAR_AWAY_DAYS {
        EventStatus::new("50+ days away", StatusTier::Far)
    } else {
        EventStatus::new(remaining_label(days), StatusTier::Normal)
    }
}

/// `"1 day remaining"`, `"7 days remaining"`.
pub fn remaining_label(days: i64) -> String {
    let unit = if days == 1 { "day" } else { "days" };
    format!("{} {} remaining", days, unit)
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator.div_euclid(denominator);
    if numerator.rem_euclid(denominator) == 0 {
        quotient
    } else {
        quotient + 1
    }
}
