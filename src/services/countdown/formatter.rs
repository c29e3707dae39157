//! Human-facing countdown and "time ago" strings.

use chrono::{DateTime, Utc};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_MONTH: i64 = 2_592_000;
const SECONDS_PER_YEAR: i64 = 31_536_000;

/// Countdowns with more whole days than this show the capped label instead.
pub const COUNTDOWN_CAP_DAYS: i64 = 50;

pub const COUNTDOWN_CAPPED_LABEL: &str = "50+ days";

pub const JUST_NOW_LABEL: &str = "just now";

/// Largest unit first; the first divisor that fits wins.
const ELAPSED_UNITS: [(i64, &str); 5] = [
    (SECONDS_PER_YEAR, "year"),
    (SECONDS_PER_MONTH, "month"),
    (SECONDS_PER_DAY, "day"),
    (SECONDS_PER_HOUR, "hour"),
    (SECONDS_PER_MINUTE, "minute"),
];

/// Format the milliseconds left before an event as `"{d}d {h}h {m}m {s}s"`.
///
/// Negative input is clamped to zero, so a past event shows
/// `"0d 0h 0m 0s"`. More than fifty whole days yields `"50+ days"`.
pub fn format_countdown(millis_remaining: i64) -> String {
    let total_seconds = millis_remaining.max(0) / 1_000;

    let days = total_seconds / SECONDS_PER_DAY;
    let hours = (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    if days > COUNTDOWN_CAP_DAYS {
        return COUNTDOWN_CAPPED_LABEL.to_string();
    }

    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}

/// Countdown from `now` to `target`.
pub fn countdown_until(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_countdown(target.signed_duration_since(now).num_milliseconds())
}

/// Format elapsed seconds as `"N unit(s) ago"` using the largest unit that
/// fits, or `"just now"` when nothing has elapsed.
pub fn format_elapsed(seconds_elapsed: i64) -> String {
    if seconds_elapsed <= 0 {
        return JUST_NOW_LABEL.to_string();
    }

    let (count, unit) = ELAPSED_UNITS
        .iter()
        .find(|(divisor, _)| seconds_elapsed >= *divisor)
        .map(|(divisor, unit)| (seconds_elapsed / divisor, *unit))
        .unwrap_or((seconds_elapsed, "second"));

    let plural = if count == 1 { "" } else { "s" };
    format!("{} {}{} ago", count, unit, plural)
}

/// Elapsed label for something that happened at `then`.
pub fn elapsed_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_elapsed(now.signed_duration_since(then).num_seconds())
}
