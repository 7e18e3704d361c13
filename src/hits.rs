//! Hit extraction — counts category trigger matches in a chat sample.
//!
//! Tokenization is word-boundary splitting on the case-folded text, nothing
//! smarter. A token suppressed by a negator within the 3 preceding tokens
//! contributes nothing to any category; an unsuppressed token may increment
//! several categories at once.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::category::{StyleCategory, TraitCategory};
use crate::lexicon::Lexicon;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("word regex"));

/// How many tokens back a negator reaches.
const NEGATION_WINDOW: usize = 3;

/// Per-category hit counts for a single text sample. Counts are never negative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryHits {
    pub traits: BTreeMap<TraitCategory, u32>,
    pub styles: BTreeMap<StyleCategory, u32>,
}

impl CategoryHits {
    pub fn is_empty(&self) -> bool {
        self.traits.is_empty() && self.styles.is_empty()
    }

    pub fn trait_count(&self, category: TraitCategory) -> u32 {
        self.traits.get(&category).copied().unwrap_or(0)
    }

    pub fn style_count(&self, category: StyleCategory) -> u32 {
        self.styles.get(&category).copied().unwrap_or(0)
    }
}

/// Count category trigger hits in `text`. Empty text yields zero hits.
pub fn extract_hits(text: &str, lexicon: &Lexicon) -> CategoryHits {
    let mut hits = CategoryHits::default();
    if text.is_empty() {
        return hits;
    }

    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = WORD_RE.find_iter(&lowered).map(|m| m.as_str()).collect();

    for (i, token) in tokens.iter().enumerate() {
        let window_start = i.saturating_sub(NEGATION_WINDOW);
        if tokens[window_start..i].iter().any(|t| lexicon.is_negator(t)) {
            continue;
        }

        for category in TraitCategory::ALL {
            if lexicon
                .trait_set(category)
                .is_some_and(|set| set.contains(*token))
            {
                *hits.traits.entry(category).or_insert(0) += 1;
            }
        }
        for category in StyleCategory::ALL {
            if lexicon
                .style_set(category)
                .is_some_and(|set| set.contains(*token))
            {
                *hits.styles.entry(category).or_insert(0) += 1;
            }
        }
    }

    hits
}
