//! Raw feed rows — one record per sampled chat burst.

use serde::{Deserialize, Serialize};

/// One row from the profiles feed. Every field beyond the avatar id is
/// optional upstream; the aggregator applies the defaults (timestamp → now,
/// messages → at least 1, sample → empty).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRow {
    /// Avatar identifier. Rows without one are skipped during aggregation.
    #[serde(default)]
    pub avatar_uuid: Option<String>,
    /// Display name as seen in-world.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Unix epoch seconds when the burst was sampled.
    #[serde(default)]
    pub timestamp: Option<f64>,
    /// Number of messages in the burst.
    #[serde(default)]
    pub messages: Option<i64>,
    /// Concatenated text sample for the burst, possibly empty.
    #[serde(default)]
    pub context_sample: Option<String>,
}

impl RawRow {
    /// Convenience constructor used by tests and fixtures.
    pub fn new(uuid: &str, name: &str, timestamp: f64, messages: i64, sample: &str) -> Self {
        Self {
            avatar_uuid: Some(uuid.to_string()),
            display_name: Some(name.to_string()),
            timestamp: Some(timestamp),
            messages: Some(messages),
            context_sample: Some(sample.to_string()),
        }
    }
}
