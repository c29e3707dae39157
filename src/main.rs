// Ministry Events
// Command line entry point for managing and watching scheduled events

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};

use ministry_events::models::event::ScheduledEvent;
use ministry_events::models::settings::AppConfig;
use ministry_events::services::database::Database;
use ministry_events::services::event::EventService;
use ministry_events::services::feed::{diff_snapshots, ChangeFeed};
use ministry_events::services::listing::{
    spawn_live_listing, ListingConfig, ListingRow, LiveListing,
};
use ministry_events::services::settings::ConfigService;
use ministry_events::utils::date::parse_text;

#[derive(Parser, Debug)]
#[command(name = "ministry-events")]
#[command(about = "Countdowns and status badges for youth ministry events")]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Event database, overriding the config file
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Schedule a new event
    Add {
        #[arg(long)]
        title: String,
        /// RFC 3339, "YYYY-MM-DD HH:MM" (local time), "YYYY-MM-DD" or epoch millis
        #[arg(long)]
        when: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Change fields of an existing event; an empty description or location clears it
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        when: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Delete an event
    Remove { id: i64 },
    /// Print every event with its status once
    List {
        /// Hide events that have already happened
        #[arg(long)]
        upcoming: bool,
        /// Only events at or after this time (requires --until)
        #[arg(long, requires = "until")]
        from: Option<String>,
        /// Only events before this time (requires --from)
        #[arg(long, requires = "from")]
        until: Option<String>,
    },
    /// Keep repainting the listing until interrupted
    Watch,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_service = match &cli.config {
        Some(path) => ConfigService::new(path),
        None => ConfigService::at_default_location(),
    };
    let config = config_service.load()?;

    let db_path = match &cli.database {
        Some(path) => path.clone(),
        None => ConfigService::resolve_database_path(&config),
    };
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
    }
    let db_path = db_path
        .to_str()
        .ok_or_else(|| anyhow!("Database path is not valid UTF-8: {}", db_path.display()))?
        .to_string();

    log::info!("Using event database {}", db_path);
    let db = Database::new(&db_path)?;
    db.initialize_schema()?;

    match cli.command {
        Command::Add {
            title,
            when,
            description,
            location,
        } => {
            let mut builder = ScheduledEvent::builder()
                .title(title)
                .when(parse_text(&when)?);
            if let Some(description) = description.and_then(non_empty) {
                builder = builder.description(description);
            }
            if let Some(location) = location.and_then(non_empty) {
                builder = builder.location(location);
            }
            let event = builder.build().map_err(|e| anyhow!(e))?;

            let created = EventService::new(db.connection()).create(event)?;
            print_rows(&[ListingRow::for_event(&created, Utc::now())]);
        }
        Command::Edit {
            id,
            title,
            when,
            description,
            location,
        } => {
            let service = EventService::new(db.connection());
            let mut event = service
                .get(id)?
                .ok_or_else(|| anyhow!("Event with id {} not found", id))?;

            if let Some(title) = title {
                event.title = title;
            }
            if let Some(when) = when {
                event.when = parse_text(&when)?;
            }
            if let Some(description) = description {
                event.description = non_empty(description);
            }
            if let Some(location) = location {
                event.location = non_empty(location);
            }

            let stored = service.update(&event)?;
            print_rows(&[ListingRow::for_event(&stored, Utc::now())]);
        }
        Command::Remove { id } => {
            EventService::new(db.connection()).delete(id)?;
            println!("Removed event {}", id);
        }
        Command::List {
            upcoming,
            from,
            until,
        } => {
            let now = Utc::now();
            let upcoming = upcoming || config.upcoming_only;
            let service = EventService::new(db.connection());

            let events = match (from, until) {
                (Some(from), Some(until)) => {
                    service.list_range(parse_text(&from)?, parse_text(&until)?)?
                }
                _ if upcoming => service.list_upcoming(now)?,
                _ => service.list_all()?,
            };

            let mut listing = LiveListing::from_events(events);
            if upcoming {
                listing.retain_upcoming(now);
            }
            print_rows(&listing.render(now));
        }
        Command::Watch => watch(db, &config)?,
    }

    Ok(())
}

/// Live view: the listing task repaints every tick, while this loop re-reads
/// the database and publishes whatever other processes changed.
fn watch(db: Database, config: &AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        let feed = ChangeFeed::new();
        let mut snapshot = EventService::new(db.connection()).list_all()?;

        let listing_config = ListingConfig {
            refresh_interval: config.refresh_interval(),
            upcoming_only: config.upcoming_only,
        };
        let handle = spawn_live_listing(
            LiveListing::from_events(snapshot.clone()),
            feed.subscribe(),
            listing_config,
            |rows: &[ListingRow]| {
                // Clear screen and home the cursor before each frame.
                print!("\x1B[2J\x1B[H");
                print_rows(rows);
                std::io::stdout().flush().ok();
            },
        );

        let mut poll = tokio::time::interval(config.refresh_interval().max(Duration::from_secs(1)));
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                _ = poll.tick() => {
                    let current = EventService::new(db.connection()).list_all()?;
                    for change in diff_snapshots(&snapshot, &current) {
                        feed.publish(change);
                    }
                    snapshot = current;
                }
            }
        }

        handle.stop().await;
        Ok::<(), anyhow::Error>(())
    })
}

/// Blank command line values clear optional fields.
fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn print_rows(rows: &[ListingRow]) {
    if rows.is_empty() {
        println!("No events scheduled.");
        return;
    }

    for row in rows {
        let id = row.id.map(|id| id.to_string()).unwrap_or_default();
        println!(
            "{:>4}  [{:<6}] {:<32} {:<18} {:<20} {}",
            id,
            row.status.tier.color(),
            row.title,
            row.status.label,
            row.relative.text(),
            row.when.with_timezone(&Local).format("%a %d %b %Y %H:%M"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_clear_optional_fields() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("Fellowship Hall".to_string()), Some("Fellowship Hall".to_string()));
    }

    #[test]
    fn test_edit_accepts_empty_location() {
        let cli = Cli::try_parse_from(["ministry-events", "edit", "3", "--location", ""]).unwrap();
        match cli.command {
            Command::Edit { id, location, .. } => {
                assert_eq!(id, 3);
                assert_eq!(location.and_then(non_empty), None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_list_range_needs_both_bounds() {
        assert!(Cli::try_parse_from(["ministry-events", "list", "--from", "2025-01-01"]).is_err());
        assert!(Cli::try_parse_from([
            "ministry-events",
            "list",
            "--from",
            "2025-01-01",
            "--until",
            "2025-02-01",
        ])
        .is_ok());
    }
}
