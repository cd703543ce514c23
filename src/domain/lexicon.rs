//! @acp:module "Trend Lexicon"
//! @acp:summary "Qualitative trend classification of direction words"
//! @acp:domain grammar
//! @acp:layer logic

use std::sync::LazyLock;

use regex::Regex;

/// Characters allowed in variable labels and direction words
static PHRASE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N} _'-]+$").unwrap());

/// Reserved template keywords
pub const KEYWORDS: [&str; 3] = ["if", "then", "and"];

const INCREASE_WORDS: &[&str] = &[
    "increases",
    "increase",
    "rises",
    "rise",
    "grows",
    "grow",
    "expands",
    "goes up",
    "go up",
    "gets bigger",
    "gets larger",
    "gets higher",
    "becomes bigger",
    "becomes larger",
    "becomes higher",
    "is greater",
    "is higher",
];

const DECREASE_WORDS: &[&str] = &[
    "decreases",
    "decrease",
    "falls",
    "fall",
    "drops",
    "drop",
    "declines",
    "decline",
    "shrinks",
    "reduces",
    "diminishes",
    "goes down",
    "go down",
    "gets smaller",
    "gets lower",
    "becomes smaller",
    "becomes lower",
    "is smaller",
    "is lower",
];

const STEADY_WORDS: &[&str] = &[
    "remains the same",
    "stays the same",
    "remains constant",
    "stays constant",
    "remains unchanged",
    "is unchanged",
    "is constant",
    "is equal",
    "does not change",
    "doesn't change",
];

/// Qualitative movement expressed by a direction word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Increase,
    Decrease,
    /// Nothing changes
    Steady,
    /// Not in the lexicon
    Other,
}

impl Trend {
    /// Classify a direction word
    pub fn of(direction: &str) -> Self {
        let phrase = normalize_phrase(direction);
        let phrase = phrase.as_str();
        if INCREASE_WORDS.contains(&phrase) {
            Trend::Increase
        } else if DECREASE_WORDS.contains(&phrase) {
            Trend::Decrease
        } else if STEADY_WORDS.contains(&phrase) {
            Trend::Steady
        } else {
            Trend::Other
        }
    }

    /// The trend moving the other way, if there is one
    pub fn opposite(self) -> Option<Self> {
        match self {
            Trend::Increase => Some(Trend::Decrease),
            Trend::Decrease => Some(Trend::Increase),
            Trend::Steady | Trend::Other => None,
        }
    }

    /// Whether the direction describes a change
    pub fn is_change(self) -> bool {
        self != Trend::Steady
    }
}

/// Lowercase and collapse internal whitespace
pub fn normalize_phrase(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check that a label or direction word can be tokenized unambiguously
pub(crate) fn check_phrase(phrase: &str) -> Result<(), String> {
    if phrase.trim().is_empty() {
        return Err("must not be empty".to_string());
    }
    if !PHRASE_PATTERN.is_match(phrase) {
        return Err("may only contain letters, digits, spaces, '-', '_' and '''".to_string());
    }
    let normalized = normalize_phrase(phrase);
    if let Some(keyword) = normalized
        .split(' ')
        .find(|word| KEYWORDS.contains(word))
    {
        return Err(format!("must not contain the keyword '{}'", keyword));
    }
    Ok(())
}
