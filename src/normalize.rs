//! Score normalization — turns an accumulator into bounded profile scores.
//!
//! Confidence is a log-scaled proxy for how much weighted message mass backs
//! the profile. Two modes exist: `Simple` divides accumulators by mass with
//! no cap (the lite rendering), `Damped` additionally shrinks scores by a
//! confidence power so sparse data cannot produce confident-looking traits,
//! and caps everything at 1.0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::AvatarAccumulator;
use crate::category::{StyleCategory, TraitCategory};

/// Which normalization curve the engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMode {
    /// Plain mass-normalized scores, uncapped, rendered as percent integers.
    Simple,
    /// Confidence-damped scores capped to [0, 1], rendered as unit floats.
    Damped,
}

/// Style accumulators are scaled up by this divisor: style triggers fire far
/// less often per message than trait triggers.
const STYLE_MASS_FACTOR: f64 = 0.3;

/// Floor for the damping factor so low-confidence profiles keep a pulse.
const DAMP_FLOOR: f64 = 0.05;

/// Unit-scale normalized scores for one avatar. Trait and style values are
/// on the composer's [0, 1]-ish scale regardless of mode (Simple mode leaves
/// them uncapped).
#[derive(Debug, Clone)]
pub struct NormalizedScores {
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub traits: BTreeMap<TraitCategory, f64>,
    pub styles: BTreeMap<StyleCategory, f64>,
}

/// Log-scaled confidence for a weighted message mass, capped at 1.0.
pub fn confidence_for_mass(weighted_message_mass: f64) -> f64 {
    let m = weighted_message_mass.max(1.0);
    ((m + 1.0).ln() / 4.0).min(1.0)
}

/// Normalize one avatar's accumulator under the given mode.
pub fn normalize(acc: &AvatarAccumulator, mode: NormalizationMode) -> NormalizedScores {
    let m = acc.weighted_message_mass.max(1.0);
    let confidence = confidence_for_mass(acc.weighted_message_mass);

    let mut traits = BTreeMap::new();
    let mut styles = BTreeMap::new();

    match mode {
        NormalizationMode::Simple => {
            for (category, v) in &acc.trait_accum {
                traits.insert(*category, v / m);
            }
            for (category, v) in &acc.style_accum {
                styles.insert(*category, v / m);
            }
        }
        NormalizationMode::Damped => {
            let damp = confidence.powf(1.5).max(DAMP_FLOOR);
            for (category, v) in &acc.trait_accum {
                traits.insert(*category, ((v / m) * damp).min(1.0));
            }
            for (category, v) in &acc.style_accum {
                styles.insert(*category, ((v / (m * STYLE_MASS_FACTOR)) * damp).min(1.0));
            }
        }
    }

    NormalizedScores {
        confidence,
        traits,
        styles,
    }
}
