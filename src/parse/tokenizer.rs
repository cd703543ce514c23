//! @acp:module "Hypothesis Tokenizer"
//! @acp:summary "Longest-match tokenizer producing typed keyword, variable and direction tokens"
//! @acp:domain grammar
//! @acp:layer logic
//!
//! Labels and direction words may span several words ("light intensity",
//! "remains the same"). At every position the longest known phrase wins, so
//! a short label never matches inside a longer one.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{normalize_phrase, DomainModel};
use crate::error::{HypogramError, Result};
use crate::hypothesis::{AND, IF, THEN};

/// A single word of hypothesis text
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_'-]+").unwrap());

/// Anything that is neither part of a word nor whitespace
static INVALID_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_'\s-]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    If,
    Then,
    And,
    /// Index into [`DomainModel::variables`]
    Variable(usize),
    /// A direction word declared by at least one variable
    Direction,
    /// Unrecognized word
    Word,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Normalized (lowercased) text
    pub text: String,
    /// Index of the first word covered by this token
    pub position: usize,
}

#[derive(Debug, Clone)]
struct Phrase {
    words: Vec<String>,
    kind: TokenKind,
}

/// Known phrases of a domain, longest first
#[derive(Debug, Clone)]
pub struct Lexicon {
    phrases: Vec<Phrase>,
}

impl Lexicon {
    pub fn new(domain: &DomainModel) -> Self {
        let mut phrases = vec![
            Phrase::single(IF, TokenKind::If),
            Phrase::single(THEN, TokenKind::Then),
            Phrase::single(AND, TokenKind::And),
        ];

        for (index, variable) in domain.variables().iter().enumerate() {
            phrases.push(Phrase::new(&variable.label, TokenKind::Variable(index)));
        }

        let mut seen = HashSet::new();
        for variable in domain.variables() {
            for direction in &variable.directions {
                if seen.insert(normalize_phrase(direction)) {
                    phrases.push(Phrase::new(direction, TokenKind::Direction));
                }
            }
        }

        // Stable: equal lengths keep keyword, variable, direction order
        phrases.sort_by(|a, b| b.words.len().cmp(&a.words.len()));

        Self { phrases }
    }

    /// Split text into typed tokens; rejects punctuation
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        if let Some(found) = INVALID_CHAR.find(text) {
            return Err(HypogramError::grammar(
                text,
                format!("unexpected character '{}'", found.as_str()),
            ));
        }

        let lowered = text.to_lowercase();
        let words: Vec<&str> = WORD_PATTERN.find_iter(&lowered).map(|m| m.as_str()).collect();

        let mut tokens = Vec::new();
        let mut position = 0;
        while position < words.len() {
            let rest = &words[position..];
            match self.phrases.iter().find(|p| p.matches(rest)) {
                Some(phrase) => {
                    tokens.push(Token {
                        kind: phrase.kind,
                        text: phrase.words.join(" "),
                        position,
                    });
                    position += phrase.words.len();
                }
                None => {
                    tokens.push(Token {
                        kind: TokenKind::Word,
                        text: rest[0].to_string(),
                        position,
                    });
                    position += 1;
                }
            }
        }

        Ok(tokens)
    }
}

impl Phrase {
    fn new(text: &str, kind: TokenKind) -> Self {
        Self {
            words: normalize_phrase(text)
                .split(' ')
                .map(str::to_string)
                .collect(),
            kind,
        }
    }

    fn single(word: &str, kind: TokenKind) -> Self {
        Self {
            words: vec![word.to_string()],
            kind,
        }
    }

    fn matches(&self, words: &[&str]) -> bool {
        words.len() >= self.words.len()
            && self.words.iter().zip(words).all(|(a, b)| a == b)
    }
}
