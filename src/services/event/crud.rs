use super::shared::{map_event_row, to_db_timestamp, EVENT_COLUMNS};
use super::EventService;
use crate::models::event::ScheduledEvent;
use crate::services::feed::EventChange;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::{self, params};

impl<'a> EventService<'a> {
    /// Insert a new event and announce it on the change feed.
    pub fn create(&self, mut event: ScheduledEvent) -> Result<ScheduledEvent> {
        event.validate().map_err(|e| anyhow!(e))?;

        let now = Utc::now();
        self.conn
            .execute(
                "INSERT INTO events (
                    title, description, location, event_at, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    event.title,
                    event.description,
                    event.location,
                    to_db_timestamp(event.when),
                    to_db_timestamp(now),
                    to_db_timestamp(now),
                ],
            )
            .context("Failed to insert event")?;

        event.id = Some(self.conn.last_insert_rowid());
        event.created_at = Some(now);
        event.updated_at = Some(now);

        log::info!("Created event {:?} '{}'", event.id, event.title);
        self.notify(EventChange::Upserted(event.clone()));
        Ok(event)
    }

    /// Retrieve an event by ID.
    pub fn get(&self, id: i64) -> Result<Option<ScheduledEvent>> {
        let query = format!("SELECT {} FROM events WHERE id = ?", EVENT_COLUMNS);
        let result = self.conn.query_row(&query, [id], map_event_row);

        match result {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist edits to an existing event and return the stored state.
    pub fn update(&self, event: &ScheduledEvent) -> Result<ScheduledEvent> {
        let id = event
            .id
            .ok_or_else(|| anyhow!("Event ID is required for update"))?;
        event.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE events SET
                    title = ?, description = ?, location = ?, event_at = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    event.title,
                    event.description,
                    event.location,
                    to_db_timestamp(event.when),
                    to_db_timestamp(Utc::now()),
                    id,
                ],
            )
            .context("Failed to update event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        let stored = self
            .get(id)?
            .ok_or_else(|| anyhow!("Event with id {} vanished after update", id))?;

        log::info!("Updated event {} '{}'", id, stored.title);
        self.notify(EventChange::Upserted(stored.clone()));
        Ok(stored)
    }

    /// Delete an event by ID.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM events WHERE id = ?", [id])
            .context("Failed to delete event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        log::info!("Deleted event {}", id);
        self.notify(EventChange::Removed(id));
        Ok(())
    }

    fn notify(&self, change: EventChange) {
        if let Some(feed) = self.feed {
            feed.publish(change);
        }
    }
}
