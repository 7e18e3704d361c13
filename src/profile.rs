//! Avatar profiles — the immutable output of one aggregation pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::AvatarAccumulator;
use crate::category::{StyleCategory, TraitCategory};
use crate::normalize::{NormalizationMode, NormalizedScores};

/// A category score as exposed to consumers. Simple normalization renders
/// truncated percent integers; damped normalization renders unit floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Percent(i64),
    Unit(f64),
}

impl Score {
    /// The score on the [0, 1]-ish unit scale regardless of representation.
    pub fn as_unit(&self) -> f64 {
        match self {
            Score::Percent(p) => *p as f64 / 100.0,
            Score::Unit(u) => *u,
        }
    }

    fn from_normalized(value: f64, mode: NormalizationMode) -> Self {
        match mode {
            NormalizationMode::Simple => Score::Percent((value * 100.0) as i64),
            NormalizationMode::Damped => Score::Unit(value),
        }
    }
}

/// One avatar's scored profile, immutable once built and shared read-only
/// out of the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarProfile {
    pub avatar_uuid: String,
    pub name: String,
    /// Log-scaled data-backing estimate, 0–100.
    pub confidence: u8,
    /// Unweighted messages seen within the last hour.
    pub recent: i64,
    pub traits: BTreeMap<TraitCategory, Score>,
    pub styles: BTreeMap<StyleCategory, Score>,
    pub summary: String,
}

impl AvatarProfile {
    /// Assemble a profile from an accumulator, its normalized scores, and a
    /// composed summary line.
    pub fn build(
        acc: &AvatarAccumulator,
        scores: &NormalizedScores,
        summary: String,
        mode: NormalizationMode,
    ) -> Self {
        let traits = scores
            .traits
            .iter()
            .map(|(c, v)| (*c, Score::from_normalized(*v, mode)))
            .collect();
        let styles = scores
            .styles
            .iter()
            .map(|(c, v)| (*c, Score::from_normalized(*v, mode)))
            .collect();
        Self {
            avatar_uuid: acc.avatar_uuid.clone(),
            name: acc.display_name.clone(),
            confidence: (scores.confidence * 100.0) as u8,
            recent: acc.recent_activity_count,
            traits,
            styles,
            summary,
        }
    }
}

/// Lookup by avatar uuid. Absence is a normal negative result.
pub fn find_by_uuid<'a>(profiles: &'a [AvatarProfile], uuid: &str) -> Option<&'a AvatarProfile> {
    profiles.iter().find(|p| p.avatar_uuid == uuid)
}

/// Case-insensitive lookup by display name.
pub fn find_by_name<'a>(profiles: &'a [AvatarProfile], name: &str) -> Option<&'a AvatarProfile> {
    profiles.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
