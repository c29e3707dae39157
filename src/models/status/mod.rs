// Status module
// Discrete status buckets shown as badges next to scheduled events

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status bucket for an event, derived from the whole days left until it.
///
/// Variants are declared in their display order so the derived `Ord`
/// matches it: passed, today, soon, normal, far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum StatusTier {
    /// The event is already behind us
    Passed,
    /// Less than a full day left (rounded up to zero days)
    Today,
    /// One to three days left
    Soon,
    /// Four to fifty days left
    Normal,
    /// More than fifty days left
    Far,
}

impl StatusTier {
    /// All tiers in display order.
    pub const ALL: [StatusTier; 5] = [
        StatusTier::Passed,
        StatusTier::Today,
        StatusTier::Soon,
        StatusTier::Normal,
        StatusTier::Far,
    ];

    /// Badge colour code consumed by the rendering layer.
    pub fn color(self) -> &'static str {
        match self {
            StatusTier::Passed => "gray",
            StatusTier::Today => "red",
            StatusTier::Soon => "orange",
            StatusTier::Normal => "blue",
            StatusTier::Far => "green",
        }
    }

    /// Parse a badge colour code back into a tier.
    pub fn from_color(color: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.color() == color)
    }
}

impl fmt::Display for StatusTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color())
    }
}

impl From<StatusTier> for &'static str {
    fn from(tier: StatusTier) -> Self {
        tier.color()
    }
}

impl TryFrom<String> for StatusTier {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StatusTier::from_color(&value).ok_or_else(|| format!("Unknown status colour: {}", value))
    }
}

/// Label and tier pair produced by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStatus {
    pub label: String,
    pub tier: StatusTier,
}

impl EventStatus {
    pub fn new(label: impl Into<String>, tier: StatusTier) -> Self {
        Self {
            label: label.into(),
            tier,
        }
    }
}
