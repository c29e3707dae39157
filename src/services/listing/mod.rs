//! Live event listing.
//!
//! [`LiveListing`] holds the local snapshot and renders status rows for an
//! explicit `now`; [`spawn_live_listing`] keeps it fresh from a timer and the
//! change feed until the returned handle is stopped or dropped.

mod task;
mod view;

pub use task::{
    spawn_live_listing, spawn_with_clock, Clock, ListingConfig, ListingHandle,
    DEFAULT_REFRESH_INTERVAL,
};
pub use view::{ListingRow, LiveListing, RelativeTime, RenderSink};
