//! Row aggregation — folds raw feed rows into one accumulator per avatar.
//!
//! The fold is commutative: mass, trait/style accumulators, and the recent
//! counter are all additive, so row order never changes the result. The only
//! order-sensitive field is the display name, which is seeded by the first
//! row carrying one and never overwritten.

use std::collections::BTreeMap;

use crate::category::{StyleCategory, TraitCategory};
use crate::decay::decay_weight;
use crate::hits::extract_hits;
use crate::lexicon::Lexicon;
use crate::row::RawRow;

/// Seconds within which a row counts toward recent activity.
const RECENT_WINDOW_SECS: f64 = 3600.0;

/// Per-avatar running totals for a single aggregation pass. Values only grow.
#[derive(Debug, Clone)]
pub struct AvatarAccumulator {
    pub avatar_uuid: String,
    pub display_name: String,
    /// Decay-weighted message count.
    pub weighted_message_mass: f64,
    pub trait_accum: BTreeMap<TraitCategory, f64>,
    pub style_accum: BTreeMap<StyleCategory, f64>,
    /// Unweighted messages from rows younger than an hour.
    pub recent_activity_count: i64,
}

impl AvatarAccumulator {
    fn new(avatar_uuid: &str, display_name: &str) -> Self {
        Self {
            avatar_uuid: avatar_uuid.to_string(),
            display_name: display_name.to_string(),
            weighted_message_mass: 0.0,
            trait_accum: BTreeMap::new(),
            style_accum: BTreeMap::new(),
            recent_activity_count: 0,
        }
    }
}

/// Fold `rows` into per-avatar accumulators. Rows missing an avatar id are
/// skipped. Keyed by uuid, so iteration order is deterministic.
pub fn aggregate(
    rows: &[RawRow],
    now: f64,
    lexicon: &Lexicon,
) -> BTreeMap<String, AvatarAccumulator> {
    let mut accumulators: BTreeMap<String, AvatarAccumulator> = BTreeMap::new();

    for row in rows {
        let Some(uuid) = row.avatar_uuid.as_deref().filter(|u| !u.is_empty()) else {
            continue;
        };

        let ts = row.timestamp.unwrap_or(now);
        let weight = decay_weight(ts, now);
        let msgs = row.messages.unwrap_or(1).max(1);

        let acc = accumulators.entry(uuid.to_string()).or_insert_with(|| {
            AvatarAccumulator::new(uuid, row.display_name.as_deref().unwrap_or("Unknown"))
        });

        acc.weighted_message_mass += msgs as f64 * weight;
        if now - ts < RECENT_WINDOW_SECS {
            acc.recent_activity_count += msgs;
        }

        let sample = row.context_sample.as_deref().unwrap_or("");
        let hits = extract_hits(sample, lexicon);
        for (category, count) in &hits.traits {
            *acc.trait_accum.entry(*category).or_insert(0.0) +=
                *count as f64 * lexicon.trait_weight(*category) * weight;
        }
        for (category, count) in &hits.styles {
            *acc.style_accum.entry(*category).or_insert(0.0) +=
                *count as f64 * lexicon.style_weight(*category) * weight;
        }
    }

    accumulators
}
