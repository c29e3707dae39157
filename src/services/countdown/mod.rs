//! Event countdown service.
//!
//! Pure functions turning an event instant and an explicit `now` into the
//! status badge and countdown strings shown next to each event.

mod classifier;
mod formatter;

pub use classifier::{
    classify, classify_days, days_remaining, remaining_label, FAR_AWAY_DAYS, MILLIS_PER_DAY,
    SOON_DAYS,
};
pub use formatter::{
    countdown_until, elapsed_since, format_countdown, format_elapsed, COUNTDOWN_CAPPED_LABEL,
    COUNTDOWN_CAP_DAYS, JUST_NOW_LABEL,
};
