//! Summary composition — renders ranked scores into a one-line read.
//!
//! The grammar is rank-driven: the top trait supplies a primary phrase, the
//! runner-up a secondary clause, a third trait (if any) a tertiary clause,
//! and at most one style-conditioned modifier clause is appended. Phrase
//! cells carry variants; deterministic mode always takes the first variant,
//! randomized mode picks via an injectable seedable source so runs stay
//! reproducible under test.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::category::{StyleCategory, TraitCategory};
use crate::normalize::NormalizedScores;

/// Below this confidence no read is attempted.
const LOW_CONFIDENCE: f64 = 0.25;
/// Style modifier thresholds: minimum style score and minimum confidence.
const MODIFIER_MIN_STYLE: f64 = 0.2;
const MODIFIER_MIN_CONFIDENCE: f64 = 0.35;

const LOW_DATA_SENTINEL: &str = "Not enough chat history to read this one yet.";
const NO_PATTERN_SENTINEL: &str = "No clear social pattern yet.";
const SINGLE_TRAIT_SUFFIX: &str = "insufficient data on other aspects";

/// How phrase variants are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// Always the first variant of each phrase cell.
    Deterministic,
    /// Variant chosen by the injected random source.
    Randomized,
}

/// Injectable variant picker. Implementations must be seedable so randomized
/// summaries are reproducible.
pub trait RandomSource {
    /// Uniform-ish index in `[0, bound)`. `bound` is never 0.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Small seedable generator (splitmix64 step function).
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for SplitMix64 {
    fn next_index(&mut self, bound: usize) -> usize {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        (z % bound as u64) as usize
    }
}

// ---------------------------------------------------------------------------
// Phrase tables
// ---------------------------------------------------------------------------

fn primary_phrases(category: TraitCategory) -> &'static [&'static str] {
    match category {
        TraitCategory::Engaging => &["Warm and welcoming presence", "Quick to greet the room"],
        TraitCategory::Curious => &["Asks questions constantly", "Leads with curiosity"],
        TraitCategory::Humorous => &["Cracks jokes nonstop", "Brings the laughs"],
        TraitCategory::Supportive => &["Steady comfort for the room", "Checks in on people"],
        TraitCategory::Dominant => &["Takes charge of the conversation", "Sets the room's direction"],
        TraitCategory::Combative => &["Picks fights readily", "Runs hot in arguments"],
    }
}

fn secondary_phrases(category: TraitCategory) -> &'static [&'static str] {
    match category {
        TraitCategory::Engaging => &["keeps conversations alive"],
        TraitCategory::Curious => &["probes into everything", "full of questions"],
        TraitCategory::Humorous => &["lightens the mood often"],
        TraitCategory::Supportive => &["offers comfort freely"],
        TraitCategory::Dominant => &["steers where things go"],
        TraitCategory::Combative => &["pushes back hard"],
    }
}

fn tertiary_phrases(category: TraitCategory) -> &'static [&'static str] {
    match category {
        TraitCategory::Engaging => &["with a sociable streak"],
        TraitCategory::Curious => &["with a questioning streak"],
        TraitCategory::Humorous => &["with a playful streak"],
        TraitCategory::Supportive => &["with a caring streak"],
        TraitCategory::Dominant => &["with a commanding streak"],
        TraitCategory::Combative => &["with an abrasive streak"],
    }
}

/// Modifier clause for a (top trait, style) pair. Sparse on purpose: pairs
/// with no natural phrasing simply have no modifier.
fn modifier_phrases(
    top: TraitCategory,
    style: StyleCategory,
) -> Option<&'static [&'static str]> {
    use StyleCategory::*;
    use TraitCategory::*;
    let phrases: &'static [&'static str] = match (top, style) {
        (Engaging, Sexual) => &["and the warmth shades openly sexual"],
        (Engaging, Flirty) => &["with a flirty edge to the greetings"],
        (Engaging, Curse) => &["with casually salty language"],
        (Curious, Flirty) => &["and the questions tend to flirt"],
        (Curious, Curse) => &["asked with a foul mouth"],
        (Humorous, Sexual) => &["and the humor runs explicit"],
        (Humorous, Flirty) => &["and the jokes tend to flirt"],
        (Humorous, Curse) => &["and the jokes run profane"],
        (Supportive, Flirty) => &["with affection that borders on flirting"],
        (Dominant, Sexual) => &["with a commanding, overtly sexual charge"],
        (Dominant, Flirty) => &["and the control comes wrapped in flirtation"],
        (Dominant, Curse) => &["barked with plenty of profanity"],
        (Combative, Sexual) => &["with aggression that turns crude"],
        (Combative, Curse) => &["and the hostility comes fully uncensored"],
        _ => return None,
    };
    Some(phrases)
}

fn pick<'a>(
    variants: &'a [&'static str],
    mode: SummaryMode,
    rng: &mut dyn RandomSource,
) -> &'a str {
    match mode {
        SummaryMode::Deterministic => variants[0],
        SummaryMode::Randomized => variants[rng.next_index(variants.len())],
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Traits with score > 0, ranked descending, up to three. Stable on
/// declaration order for equal scores.
fn top_traits(scores: &NormalizedScores) -> Vec<(TraitCategory, f64)> {
    let mut ranked: Vec<(TraitCategory, f64)> = scores
        .traits
        .iter()
        .filter(|(_, v)| **v > 0.0)
        .map(|(c, v)| (*c, *v))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(3);
    ranked
}

/// Render one avatar's normalized scores into a summary line.
pub fn compose_summary(
    scores: &NormalizedScores,
    mode: SummaryMode,
    rng: &mut dyn RandomSource,
) -> String {
    if scores.confidence < LOW_CONFIDENCE {
        return LOW_DATA_SENTINEL.to_string();
    }

    let top = top_traits(scores);
    if top.is_empty() {
        return NO_PATTERN_SENTINEL.to_string();
    }

    let mut clauses: Vec<String> = Vec::new();
    clauses.push(pick(primary_phrases(top[0].0), mode, rng).to_string());
    if top.len() == 1 {
        clauses.push(SINGLE_TRAIT_SUFFIX.to_string());
    } else {
        clauses.push(pick(secondary_phrases(top[1].0), mode, rng).to_string());
        if let Some(&(third, _)) = top.get(2) {
            clauses.push(pick(tertiary_phrases(third), mode, rng).to_string());
        }
    }

    // Style modifier pass: first qualifying style with a phrase for the top
    // trait wins; at most one clause appended.
    if scores.confidence >= MODIFIER_MIN_CONFIDENCE {
        for style in StyleCategory::MODIFIER_PRIORITY {
            let score = scores.styles.get(&style).copied().unwrap_or(0.0);
            if score < MODIFIER_MIN_STYLE {
                continue;
            }
            if let Some(variants) = modifier_phrases(top[0].0, style) {
                clauses.push(pick(variants, mode, rng).to_string());
                break;
            }
        }
    }

    format!("{}.", clauses.join(", "))
}
