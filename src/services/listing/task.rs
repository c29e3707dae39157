//! Background driver for the live listing.
//!
//! Two independent triggers cause a re-render: a repeating timer, which keeps
//! countdowns moving without new data, and change notifications from the
//! feed. Neither is ordered against the other; each simply recomputes the
//! rows from the current snapshot and the current clock.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::view::{LiveListing, RenderSink};
use crate::services::feed::{FeedMessage, Subscription};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Options for [`spawn_live_listing`].
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Period of the re-render timer
    pub refresh_interval: Duration,
    /// Hide events once their time has passed
    pub upcoming_only: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            upcoming_only: false,
        }
    }
}

/// Clock used by the listing task; swapped out in tests.
pub type Clock = fn() -> DateTime<Utc>;

/// Handle to a running listing task. Dropping it stops the task.
pub struct ListingHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<LiveListing>>,
}

impl ListingHandle {
    /// Stop the timer, unsubscribe from the feed and return the final snapshot.
    pub async fn stop(mut self) -> Option<LiveListing> {
        self.cancel.cancel();
        match self.task.take()?.await {
            Ok(listing) => Some(listing),
            Err(err) => {
                log::error!("Live listing task failed: {err}");
                None
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }
}

impl Drop for ListingHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Start re-rendering `listing` into `sink` on every tick and every change.
///
/// Must be called from within a tokio runtime.
pub fn spawn_live_listing<S>(
    listing: LiveListing,
    subscription: Subscription,
    config: ListingConfig,
    sink: S,
) -> ListingHandle
where
    S: RenderSink + Send + 'static,
{
    spawn_with_clock(listing, subscription, config, sink, Utc::now)
}

/// Same as [`spawn_live_listing`] with an explicit clock.
pub fn spawn_with_clock<S>(
    listing: LiveListing,
    subscription: Subscription,
    config: ListingConfig,
    sink: S,
    clock: Clock,
) -> ListingHandle
where
    S: RenderSink + Send + 'static,
{
    let cancel = CancellationToken::new();
    let driver = ListingDriver {
        listing,
        subscription,
        config,
        sink,
        clock,
        cancel: cancel.clone(),
    };

    ListingHandle {
        cancel,
        task: Some(tokio::spawn(driver.run())),
    }
}

struct ListingDriver<S> {
    listing: LiveListing,
    subscription: Subscription,
    config: ListingConfig,
    sink: S,
    clock: Clock,
    cancel: CancellationToken,
}

impl<S: RenderSink> ListingDriver<S> {
    async fn run(mut self) -> LiveListing {
        let period = self.config.refresh_interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut feed_open = true;

        log::info!(
            "Live listing started with {} event(s), refreshing every {:?}",
            self.listing.len(),
            period
        );

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    log::info!("Live listing stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.repaint();
                }
                message = self.subscription.next(), if feed_open => {
                    match message {
                        FeedMessage::Change(change) => {
                            log::debug!("Listing received change for event {:?}", change.event_id());
                            if self.listing.apply(change) {
                                self.repaint();
                            }
                        }
                        FeedMessage::Lagged(skipped) => {
                            log::warn!("Live listing missed {} change notification(s)", skipped);
                        }
                        FeedMessage::Closed => {
                            log::warn!("Change feed closed; listing continues on timer only");
                            feed_open = false;
                        }
                    }
                }
            }
        }

        self.listing
    }

    fn repaint(&mut self) {
        let now = (self.clock)();
        if self.config.upcoming_only {
            self.listing.retain_upcoming(now);
        }
        self.listing.render_into(now, &mut self.sink);
    }
}
