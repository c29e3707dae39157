// Settings module
// User-editable configuration for the event hub

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATABASE_FILE: &str = "events.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding scheduled events; relative paths resolve against
    /// the data directory.
    pub database_path: PathBuf,
    /// Seconds between live listing repaints
    pub refresh_interval_secs: u64,
    /// Hide events that have already happened
    pub upcoming_only: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            refresh_interval_secs: 1,
            upcoming_only: false,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.refresh_interval_secs == 0 {
            return Err("Refresh interval must be at least 1 second".to_string());
        }

        if self.database_path.as_os_str().is_empty() {
            return Err("Database path cannot be empty".to_string());
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}
