//! In-process change stream for scheduled events.
//!
//! Mutations made through [`EventService`](crate::services::event::EventService)
//! are pushed to every live [`Subscription`], which is how listing views learn
//! about remote edits without polling the store.

use std::collections::{HashMap, HashSet};

use tokio::sync::broadcast;

use crate::models::event::ScheduledEvent;

/// Subscribers that fall further behind than this skip ahead and log a warning.
pub const DEFAULT_FEED_CAPACITY: usize = 256;

/// A single store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventChange {
    /// The event was created or edited; carries the stored state.
    Upserted(ScheduledEvent),
    /// The event with this id was deleted.
    Removed(i64),
}

impl EventChange {
    pub fn event_id(&self) -> Option<i64> {
        match self {
            EventChange::Upserted(event) => event.id,
            EventChange::Removed(id) => Some(*id),
        }
    }
}

/// Outcome of waiting on a [`Subscription`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedMessage {
    Change(EventChange),
    /// This many notifications were dropped because the subscriber was slow.
    Lagged(u64),
    /// Every publisher is gone; no further changes will arrive.
    Closed,
}

/// Publisher side of the change stream. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<EventChange>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FEED_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Push a change to all current subscribers.
    ///
    /// Returns how many subscribers received it; zero is not an error.
    pub fn publish(&self, change: EventChange) -> usize {
        log::debug!("Publishing change for event {:?}", change.event_id());
        self.sender.send(change).unwrap_or(0)
    }

    /// Start listening. Only changes published after this call are seen.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Receiving side of the change stream. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<EventChange>,
}

impl Subscription {
    /// Wait for the next notification.
    pub async fn next(&mut self) -> FeedMessage {
        match self.receiver.recv().await {
            Ok(change) => FeedMessage::Change(change),
            Err(broadcast::error::RecvError::Lagged(skipped)) => FeedMessage::Lagged(skipped),
            Err(broadcast::error::RecvError::Closed) => FeedMessage::Closed,
        }
    }

    /// Non-blocking variant; `None` when nothing is queued.
    pub fn try_next(&mut self) -> Option<FeedMessage> {
        match self.receiver.try_recv() {
            Ok(change) => Some(FeedMessage::Change(change)),
            Err(broadcast::error::TryRecvError::Empty) => None,
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                Some(FeedMessage::Lagged(skipped))
            }
            Err(broadcast::error::TryRecvError::Closed) => Some(FeedMessage::Closed),
        }
    }
}

/// Changes that turn `previous` into `current`, for stores written by
/// another process where only full re-reads are available.
///
/// Events without an id are ignored; removals come after upserts.
pub fn diff_snapshots(previous: &[ScheduledEvent], current: &[ScheduledEvent]) -> Vec<EventChange> {
    let before: HashMap<i64, &ScheduledEvent> = previous
        .iter()
        .filter_map(|event| event.id.map(|id| (id, event)))
        .collect();

    let mut changes: Vec<EventChange> = current
        .iter()
        .filter(|event| match event.id {
            Some(id) => before.get(&id) != Some(event),
            None => false,
        })
        .cloned()
        .map(EventChange::Upserted)
        .collect();

    let still_present: HashSet<i64> = current.iter().filter_map(|event| event.id).collect();
    changes.extend(
        previous
            .iter()
            .filter_map(|event| event.id)
            .filter(|id| !still_present.contains(id))
            .map(EventChange::Removed),
    );

    changes
}
