// Event module
// Scheduled ministry event as stored and listed by the community hub

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::status::EventStatus;
use crate::services::countdown;

/// Years the event store can write as four-digit, sortable timestamps.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// A gathering, retreat or service with a single point in time.
///
/// `when` may lie in the past (the event already happened) or the future.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub when: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ScheduledEvent {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use ministry_events::models::event::ScheduledEvent;
    /// use chrono::{Duration, Utc};
    ///
    /// let event = ScheduledEvent::new("Youth Night", Utc::now() + Duration::days(3)).unwrap();
    /// assert!(event.id.is_none());
    /// ```
    pub fn new(title: impl Into<String>, when: DateTime<Utc>) -> Result<Self, String> {
        let event = Self {
            id: None,
            title: title.into(),
            description: None,
            location: None,
            when,
            created_at: None,
            updated_at: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> ScheduledEventBuilder {
        ScheduledEventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if !SUPPORTED_YEARS.contains(&self.when.year()) {
            return Err(format!(
                "Event year {} is outside the supported range 0-9999",
                self.when.year()
            ));
        }

        Ok(())
    }

    /// Signed time left until the event; negative once it has passed.
    pub fn time_until(&self, now: DateTime<Utc>) -> Duration {
        self.when.signed_duration_since(now)
    }

    /// Status badge for this event relative to `now`.
    pub fn status(&self, now: DateTime<Utc>) -> EventStatus {
        countdown::classify(self.when, now)
    }

    pub fn has_passed(&self, now: DateTime<Utc>) -> bool {
        self.when < now
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct ScheduledEventBuilder {
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    when: Option<DateTime<Utc>>,
}

impl ScheduledEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn when(mut self, when: DateTime<Utc>) -> Self {
        self.when = Some(when);
        self
    }

    /// Build the event
    pub fn build(self) -> Result<ScheduledEvent, String> {
        let title = self.title.ok_or("Event title is required")?;
        let when = self.when.ok_or("Event time is required")?;

        let event = ScheduledEvent {
            id: None,
            title,
            description: self.description,
            location: self.location,
            when,
            created_at: None,
            updated_at: None,
        };

        event.validate()?;
        Ok(event)
    }
}
