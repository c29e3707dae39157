use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{self, Row};

use crate::models::event::ScheduledEvent;

pub(crate) const EVENT_COLUMNS: &str =
    "id, title, description, location, event_at, created_at, updated_at";

/// Fixed-width UTC text so that `ORDER BY event_at` is chronological.
/// Only holds for the years `ScheduledEvent::validate` accepts.
pub(crate) fn to_db_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let value: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn map_event_row(row: &Row<'_>) -> rusqlite::Result<ScheduledEvent> {
    Ok(ScheduledEvent {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        location: row.get(3)?,
        when: timestamp_column(row, 4)?,
        created_at: Some(timestamp_column(row, 5)?),
        updated_at: Some(timestamp_column(row, 6)?),
    })
}
