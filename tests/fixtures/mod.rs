// Test fixtures - reusable test data
// Provides consistent instants and events across integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use ministry_events::models::event::ScheduledEvent;

/// Sample instants for testing
pub mod dates {
    use super::*;

    /// Sunday evening service, Mar 2 2025 18:00 UTC
    pub fn sunday_service() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 2, 18, 0, 0).unwrap()
    }

    /// Feb 29, 2024 at noon (leap year)
    pub fn leap_day_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
    }
}

/// Sample events for testing, positioned relative to a reference instant
pub mod events {
    use super::*;

    pub fn youth_night(now: DateTime<Utc>) -> ScheduledEvent {
        ScheduledEvent::builder()
            .title("Youth Night")
            .location("Fellowship Hall")
            .when(now + Duration::days(2) + Duration::hours(1))
            .build()
            .unwrap()
    }

    pub fn fall_retreat(now: DateTime<Utc>) -> ScheduledEvent {
        ScheduledEvent::builder()
            .title("Fall Retreat")
            .description("Weekend at Pine Lake")
            .when(now + Duration::days(30))
            .build()
            .unwrap()
    }

    pub fn summer_camp(now: DateTime<Utc>) -> ScheduledEvent {
        ScheduledEvent::new("Summer Camp", now + Duration::days(120)).unwrap()
    }

    pub fn easter_sunrise(now: DateTime<Utc>) -> ScheduledEvent {
        ScheduledEvent::new("Easter Sunrise Service", now - Duration::days(40)).unwrap()
    }
}
