use super::shared::{map_event_row, to_db_timestamp, EVENT_COLUMNS};
use super::EventService;
use crate::models::event::ScheduledEvent;
use anyhow::Result;
use chrono::{DateTime, Utc};

impl<'a> EventService<'a> {
    /// List every event, soonest first.
    pub fn list_all(&self) -> Result<Vec<ScheduledEvent>> {
        let query = format!(
            "SELECT {} FROM events ORDER BY event_at ASC, id ASC",
            EVENT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&query)?;

        let events = stmt
            .query_map([], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    /// Events at or after `now`, soonest first.
    pub fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledEvent>> {
        let query = format!(
            "SELECT {} FROM events WHERE event_at >= ? ORDER BY event_at ASC, id ASC",
            EVENT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&query)?;

        let events = stmt
            .query_map([to_db_timestamp(now)], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    /// Events with `start <= when < end`.
    pub fn list_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ScheduledEvent>> {
        let query = format!(
            "SELECT {} FROM events
             WHERE event_at >= ? AND event_at < ?
             ORDER BY event_at ASC, id ASC",
            EVENT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&query)?;

        let events = stmt
            .query_map(
                [to_db_timestamp(start), to_db_timestamp(end)],
                map_event_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }
}
