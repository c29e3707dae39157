//! Scheduled event service entry point.
//! Provides database-backed CRUD and ordered listings, publishing every
//! mutation to an optional change feed.

use rusqlite::Connection;

use crate::services::feed::ChangeFeed;

pub mod crud;
pub mod queries;
mod shared;

/// Service for managing scheduled events stored in SQLite.
pub struct EventService<'a> {
    pub(crate) conn: &'a Connection,
    pub(crate) feed: Option<&'a ChangeFeed>,
}

impl<'a> EventService<'a> {
    /// Create a new EventService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn, feed: None }
    }

    /// Publish creates, edits and deletes to `feed`.
    pub fn with_feed(mut self, feed: &'a ChangeFeed) -> Self {
        self.feed = Some(feed);
        self
    }
}
