// Property-based tests for the status classifier and formatters

use chrono::{DateTime, Duration, TimeZone, Utc};
use ministry_events::models::status::StatusTier;
use ministry_events::services::countdown::{
    classify, days_remaining, format_countdown, format_elapsed, MILLIS_PER_DAY,
};
use proptest::prelude::*;

fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// Instant whose rounded-up day count is exactly `days`.
fn target_for(days: i64, sub_day_ms: i64) -> DateTime<Utc> {
    // sub_day_ms in [0, MILLIS_PER_DAY): stay inside the (days-1, days] window.
    reference_now() + Duration::milliseconds(days * MILLIS_PER_DAY - sub_day_ms)
}

proptest! {
    /// Property: a whole day or more in the past is always "passed"
    #[test]
    fn prop_past_events_are_passed(ms_ago in MILLIS_PER_DAY..(200 * 365 * MILLIS_PER_DAY)) {
        let target = reference_now() - Duration::milliseconds(ms_ago);
        let status = classify(target, reference_now());
        prop_assert_eq!(status.tier, StatusTier::Passed);
        prop_assert_eq!(status.label, "Event passed");
    }

    /// Property: a rounded-up day count of zero is "today"
    #[test]
    fn prop_zero_days_is_today(sub_day_ms in 0..MILLIS_PER_DAY) {
        let target = target_for(0, sub_day_ms);
        prop_assert_eq!(days_remaining(target, reference_now()), 0);
        prop_assert_eq!(classify(target, reference_now()).tier, StatusTier::Today);
    }

    /// Property: one to three days is "soon"
    #[test]
    fn prop_one_to_three_days_is_soon(days in 1i64..=3, sub_day_ms in 0..MILLIS_PER_DAY) {
        let status = classify(target_for(days, sub_day_ms), reference_now());
        prop_assert_eq!(status.tier, StatusTier::Soon);
        prop_assert_eq!(status.label, "Happening soon");
    }

    /// Property: four to fifty days is "normal" with the exact count
    #[test]
    fn prop_four_to_fifty_days_is_normal(days in 4i64..=50, sub_day_ms in 0..MILLIS_PER_DAY) {
        let status = classify(target_for(days, sub_day_ms), reference_now());
        prop_assert_eq!(status.tier, StatusTier::Normal);
        prop_assert_eq!(status.label, format!("{} days remaining", days));
    }

    /// Property: beyond fifty days is "far"
    #[test]
    fn prop_beyond_fifty_days_is_far(days in 51i64..100_000, sub_day_ms in 0..MILLIS_PER_DAY) {
        let status = classify(target_for(days, sub_day_ms), reference_now());
        prop_assert_eq!(status.tier, StatusTier::Far);
        prop_assert_eq!(status.label, "50+ days away");
    }

    /// Property: classification is a pure function of its inputs
    #[test]
    fn prop_classify_idempotent(offset_ms in -(400 * MILLIS_PER_DAY)..(400 * MILLIS_PER_DAY)) {
        let target = reference_now() + Duration::milliseconds(offset_ms);
        prop_assert_eq!(classify(target, reference_now()), classify(target, reference_now()));
    }

    /// Property: countdown strings always match the display grammar
    #[test]
    fn prop_countdown_grammar(millis in any::<i64>()) {
        let text = format_countdown(millis);
        let capped = text == "50+ days";
        let parts: Vec<&str> = text.split(' ').collect();
        let well_formed = parts.len() == 4
            && parts.iter().zip(["d", "h", "m", "s"]).all(|(part, unit)| {
                part.strip_suffix(unit)
                    .map_or(false, |n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
            });
        prop_assert!(capped || well_formed, "unexpected countdown {:?}", text);
    }

    /// Property: negative remaining time formats like zero
    #[test]
    fn prop_negative_countdown_clamps(millis in i64::MIN..0) {
        prop_assert_eq!(format_countdown(millis), "0d 0h 0m 0s");
    }

    /// Property: elapsed strings always match the display grammar
    #[test]
    fn prop_elapsed_grammar(seconds in 0i64..(1_000 * 31_536_000)) {
        let text = format_elapsed(seconds);
        if text != "just now" {
            let parts: Vec<&str> = text.split(' ').collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert!(parts[0].parse::<i64>().is_ok());
            let unit = parts[1].trim_end_matches('s');
            prop_assert!(["second", "minute", "hour", "day", "month", "year"].contains(&unit));
            prop_assert_eq!(parts[1].ends_with('s'), parts[0] != "1");
            prop_assert_eq!(parts[2], "ago");
        }
    }
}

#[test]
fn test_documented_examples() {
    assert_eq!(format_countdown(90_061_000), "1d 1h 1m 1s");
    assert_eq!(format_countdown(-5_000), "0d 0h 0m 0s");
    assert_eq!(format_countdown(51 * MILLIS_PER_DAY), "50+ days");
    assert_eq!(format_elapsed(3_600), "1 hour ago");
    assert_eq!(format_elapsed(3_599), "59 minutes ago");
    assert_eq!(format_elapsed(0), "just now");
}
