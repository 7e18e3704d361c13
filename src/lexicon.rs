//! Keyword lexicon — trigger sets per category, negators, and weights.
//!
//! The default sets are tuned for in-world chat: heavy on greetings, slang
//! spellings, and emote-style tokens. Some entries are multi-word phrases or
//! bare emoji; word-boundary tokenization can never produce those as a single
//! token, so they are knowingly dead entries kept for parity with the tuned
//! tables rather than pruned (see DESIGN.md).

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::category::{StyleCategory, TraitCategory};

/// Trigger sets, negators, and per-category weights for hit extraction.
#[derive(Debug, Clone)]
pub struct Lexicon {
    trait_sets: HashMap<TraitCategory, HashSet<String>>,
    style_sets: HashMap<StyleCategory, HashSet<String>>,
    negators: HashSet<String>,
    trait_weights: HashMap<TraitCategory, f64>,
    style_weights: HashMap<StyleCategory, f64>,
}

impl Lexicon {
    /// Build a lexicon from raw per-category word lists. Weights default to 1.0.
    pub fn new(
        trait_sets: HashMap<TraitCategory, HashSet<String>>,
        style_sets: HashMap<StyleCategory, HashSet<String>>,
        negators: HashSet<String>,
    ) -> Self {
        Self {
            trait_sets,
            style_sets,
            negators,
            trait_weights: HashMap::new(),
            style_weights: HashMap::new(),
        }
    }

    /// Override the weight applied to hits in one trait category.
    pub fn with_trait_weight(mut self, category: TraitCategory, weight: f64) -> Self {
        self.trait_weights.insert(category, weight);
        self
    }

    /// Override the weight applied to hits in one style category.
    pub fn with_style_weight(mut self, category: StyleCategory, weight: f64) -> Self {
        self.style_weights.insert(category, weight);
        self
    }

    pub fn trait_set(&self, category: TraitCategory) -> Option<&HashSet<String>> {
        self.trait_sets.get(&category)
    }

    pub fn style_set(&self, category: StyleCategory) -> Option<&HashSet<String>> {
        self.style_sets.get(&category)
    }

    pub fn is_negator(&self, token: &str) -> bool {
        self.negators.contains(token)
    }

    /// Weight for a trait category, 1.0 unless overridden.
    pub fn trait_weight(&self, category: TraitCategory) -> f64 {
        self.trait_weights.get(&category).copied().unwrap_or(1.0)
    }

    /// Weight for a style category, 1.0 unless overridden.
    pub fn style_weight(&self, category: StyleCategory) -> f64 {
        self.style_weights.get(&category).copied().unwrap_or(1.0)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        DEFAULT_LEXICON.clone()
    }
}

fn word_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// The default tuned lexicon, built once.
pub static DEFAULT_LEXICON: Lazy<Lexicon> = Lazy::new(|| {
    let mut traits = HashMap::new();

    traits.insert(
        TraitCategory::Engaging,
        word_set(&[
            "hi", "hey", "heya", "hiya", "yo", "sup", "wb", "welcome",
            "hello", "ello", "hai", "haiii", "hii", "hiii",
            "o/", "\\o", "wave", "waves", "*waves*", "*wave*",
            "heyhey", "yo yo", "sup all", "hiya all",
        ]),
    );

    traits.insert(
        TraitCategory::Curious,
        word_set(&[
            "why", "how", "what", "where", "when", "who",
            "anyone", "anybody", "any1", "any1?",
            "curious", "wonder", "wondering",
            "?", "??", "???", "????",
            "huh", "eh", "hm", "hmm", "hmmm",
        ]),
    );

    traits.insert(
        TraitCategory::Humorous,
        word_set(&[
            "lol", "lmao", "lmfao", "rofl", "roflmao",
            "haha", "hehe", "heh", "bahaha",
            "😂", "🤣", "😆", "😜", "😹", "💀", "😭",
            "lawl", "lul", "lel", "ded", "im dead", "dead 💀",
        ]),
    );

    traits.insert(
        TraitCategory::Supportive,
        word_set(&[
            "sorry", "sry", "srry", "soz",
            "hope", "ok", "okay", "k", "kk", "mk",
            "there", "here", "np", "nps", "no worries",
            "hug", "hugs", "hugz", "*hug*", "*hugs*",
            "<3", "❤️", "💜", "💙", "💖",
            "u ok", "you ok", "all good", "its ok", "it's ok",
        ]),
    );

    traits.insert(
        TraitCategory::Dominant,
        word_set(&[
            "listen", "look", "stop", "wait", "now",
            "do it", "dont", "don't", "come here", "stay",
            "pay attention", "focus", "enough",
            "move", "sit", "stand", "follow", "watch", "hold up",
        ]),
    );

    traits.insert(
        TraitCategory::Combative,
        word_set(&[
            "idiot", "stupid", "dumb", "moron", "retard",
            "shut", "shut up", "stfu", "gtfo", "wtf", "tf",
            "screw you", "fuck off",
            "trash", "garbage", "bs", "bullshit", "smh",
        ]),
    );

    let mut styles = HashMap::new();

    styles.insert(
        StyleCategory::Flirty,
        word_set(&[
            "cute", "cutie", "qt", "hot", "handsome", "beautiful", "pretty",
            "sexy", "kiss", "kisses", "xoxo", "mwah", "😘", "😍", "😉", "😏",
            "flirt", "tease", "teasing",
            "hey you", "hey sexy", "hey cutie", "damn u cute", "babe", "baby", "sweety",
        ]),
    );

    styles.insert(
        StyleCategory::Sexual,
        word_set(&[
            "sex", "fuck", "fucking", "horny", "wet", "hard", "naked",
            "dick", "cock", "pussy", "boobs", "tits", "ass", "booty",
            "cum", "cumming", "breed", "breedable",
            "thrust", "ride", "mount", "spread", "bed", "moan", "mm", "mmm",
        ]),
    );

    styles.insert(
        StyleCategory::Curse,
        word_set(&[
            "fuck", "fucking", "shit", "damn", "bitch", "asshole",
            "crap", "hell", "pissed", "wtf", "ffs", "af", "asf",
            "omfg", "holy shit",
        ]),
    );

    let negators = word_set(&[
        "not", "no", "never", "dont", "don't", "cant", "can't",
        "isnt", "isn't", "wasnt", "wasn't",
        "aint", "ain't", "nah", "nope", "naw",
        "idk", "idc", "dont care", "doesnt matter",
    ]);

    Lexicon::new(traits, styles, negators)
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon_covers_every_category() {
        let lex = Lexicon::default();
        for t in TraitCategory::ALL {
            assert!(
                !lex.trait_set(t).unwrap().is_empty(),
                "empty trigger set for {:?}",
                t
            );
        }
        for s in StyleCategory::ALL {
            assert!(!lex.style_set(s).unwrap().is_empty());
        }
        assert!(lex.is_negator("not"));
        assert!(lex.is_negator("nah"));
        assert!(!lex.is_negator("yes"));
    }

    #[test]
    fn test_weights_default_to_one() {
        let lex = Lexicon::default();
        assert_eq!(lex.trait_weight(TraitCategory::Humorous), 1.0);
        assert_eq!(lex.style_weight(StyleCategory::Curse), 1.0);
    }

    #[test]
    fn test_weight_override() {
        let lex = Lexicon::default().with_trait_weight(TraitCategory::Combative, 1.5);
        assert_eq!(lex.trait_weight(TraitCategory::Combative), 1.5);
        assert_eq!(lex.trait_weight(TraitCategory::Engaging), 1.0);
    }

    #[test]
    fn test_a_token_can_live_in_several_sets() {
        // "fuck" counts for both sexual and curse; "wtf" for combative and curse.
        let lex = Lexicon::default();
        assert!(lex.style_set(StyleCategory::Sexual).unwrap().contains("fuck"));
        assert!(lex.style_set(StyleCategory::Curse).unwrap().contains("fuck"));
        assert!(lex.trait_set(TraitCategory::Combative).unwrap().contains("wtf"));
        assert!(lex.style_set(StyleCategory::Curse).unwrap().contains("wtf"));
    }
}
