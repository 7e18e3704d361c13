//! Trait and style category model.
//!
//! Traits are sustained-personality signals; styles are tone/register signals
//! scored separately and used only to modify summaries. Declaration order
//! matters: it is the tie-break order when ranking traits for the summary,
//! and (for styles) the priority order of the modifier pass.

use serde::{Deserialize, Serialize};

/// A sustained-personality signal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitCategory {
    Engaging,
    Curious,
    Humorous,
    Supportive,
    Dominant,
    Combative,
}

impl TraitCategory {
    /// All trait categories, in declaration (tie-break) order.
    pub const ALL: [TraitCategory; 6] = [
        TraitCategory::Engaging,
        TraitCategory::Curious,
        TraitCategory::Humorous,
        TraitCategory::Supportive,
        TraitCategory::Dominant,
        TraitCategory::Combative,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TraitCategory::Engaging => "engaging",
            TraitCategory::Curious => "curious",
            TraitCategory::Humorous => "humorous",
            TraitCategory::Supportive => "supportive",
            TraitCategory::Dominant => "dominant",
            TraitCategory::Combative => "combative",
        }
    }
}

/// A tone/register signal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleCategory {
    Flirty,
    Sexual,
    Curse,
}

impl StyleCategory {
    /// All style categories, in declaration order.
    pub const ALL: [StyleCategory; 3] = [
        StyleCategory::Flirty,
        StyleCategory::Sexual,
        StyleCategory::Curse,
    ];

    /// Order in which styles are considered for the summary modifier pass.
    /// First style that clears its thresholds wins.
    pub const MODIFIER_PRIORITY: [StyleCategory; 3] = [
        StyleCategory::Sexual,
        StyleCategory::Flirty,
        StyleCategory::Curse,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StyleCategory::Flirty => "flirty",
            StyleCategory::Sexual => "sexual",
            StyleCategory::Curse => "curse",
        }
    }
}
