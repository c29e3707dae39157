use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::event::ScheduledEvent;
use crate::models::status::EventStatus;
use crate::services::countdown::{elapsed_since, format_countdown};
use crate::services::feed::EventChange;

/// Relative time shown beside the status badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum RelativeTime {
    /// `"{d}d {h}h {m}m {s}s"` or `"50+ days"` for upcoming events
    Countdown(String),
    /// `"N units ago"` or `"just now"` once the event has started
    Elapsed(String),
}

impl RelativeTime {
    pub fn text(&self) -> &str {
        match self {
            RelativeTime::Countdown(text) | RelativeTime::Elapsed(text) => text,
        }
    }
}

/// One rendered line of the live listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    pub id: Option<i64>,
    pub title: String,
    pub when: DateTime<Utc>,
    pub status: EventStatus,
    pub relative: RelativeTime,
}

impl ListingRow {
    pub fn for_event(event: &ScheduledEvent, now: DateTime<Utc>) -> Self {
        let remaining = event.time_until(now).num_milliseconds();
        let relative = if remaining >= 0 {
            RelativeTime::Countdown(format_countdown(remaining))
        } else {
            RelativeTime::Elapsed(elapsed_since(event.when, now))
        };

        Self {
            id: event.id,
            title: event.title.clone(),
            when: event.when,
            status: event.status(now),
            relative,
        }
    }
}

/// Receives freshly rendered rows.
#[cfg_attr(test, mockall::automock)]
pub trait RenderSink {
    fn render(&mut self, rows: &[ListingRow]);
}

impl<F> RenderSink for F
where
    F: FnMut(&[ListingRow]),
{
    fn render(&mut self, rows: &[ListingRow]) {
        self(rows)
    }
}

/// Local snapshot of the event collection, kept ordered by time then id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveListing {
    events: Vec<ScheduledEvent>,
}

impl LiveListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: impl IntoIterator<Item = ScheduledEvent>) -> Self {
        let mut listing = Self::new();
        for event in events {
            listing.upsert(event);
        }
        listing
    }

    pub fn events(&self) -> &[ScheduledEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Fold a change notification into the snapshot.
    ///
    /// Returns `false` when the change left the snapshot untouched, e.g. a
    /// removal for an id that was never listed.
    pub fn apply(&mut self, change: EventChange) -> bool {
        match change {
            EventChange::Upserted(event) => self.upsert(event),
            EventChange::Removed(id) => self.remove(id),
        }
    }

    /// Drop events whose time lies before `now`.
    pub fn retain_upcoming(&mut self, now: DateTime<Utc>) {
        self.events.retain(|event| !event.has_passed(now));
    }

    /// Rows for every listed event relative to `now`.
    pub fn render(&self, now: DateTime<Utc>) -> Vec<ListingRow> {
        self.events
            .iter()
            .map(|event| ListingRow::for_event(event, now))
            .collect()
    }

    pub fn render_into(&self, now: DateTime<Utc>, sink: &mut dyn RenderSink) {
        let rows = self.render(now);
        sink.render(&rows);
    }

    fn upsert(&mut self, event: ScheduledEvent) -> bool {
        if let Some(id) = event.id {
            if let Some(pos) = self.events.iter().position(|e| e.id == Some(id)) {
                if self.events[pos] == event {
                    return false;
                }
                self.events.remove(pos);
            }
        }

        let key = sort_key(&event);
        let pos = self.events.partition_point(|e| sort_key(e) <= key);
        self.events.insert(pos, event);
        true
    }

    fn remove(&mut self, id: i64) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != Some(id));
        self.events.len() != before
    }
}

fn sort_key(event: &ScheduledEvent) -> (DateTime<Utc>, Option<i64>) {
    (event.when, event.id)
}
