//! @acp:module "Parser"
//! @acp:summary "Parses free-text hypotheses into structured form, validated against a domain"
//! @acp:domain grammar
//! @acp:layer service
//!
//! Parsing runs in two passes: the [`Lexicon`] turns text into typed tokens,
//! then the grammar below checks the `if ... then ...` template and resolves
//! each clause to a (variable, direction) pair. Parsing is all-or-nothing.

pub mod tokenizer;

pub use tokenizer::{Lexicon, Token, TokenKind};

use crate::domain::DomainModel;
use crate::error::{HypogramError, Result};
use crate::hypothesis::{Clause, Hypothesis};

/// Hypothesis parser bound to one domain
#[derive(Debug, Clone)]
pub struct Parser<'d> {
    domain: &'d DomainModel,
    lexicon: Lexicon,
}

impl<'d> Parser<'d> {
    pub fn new(domain: &'d DomainModel) -> Self {
        Self {
            domain,
            lexicon: Lexicon::new(domain),
        }
    }

    /// Parse `if <clause> (and <clause>)* then <clause> (and <clause>)*`
    pub fn parse(&self, text: &str) -> Result<Hypothesis> {
        let text = text.trim();
        if text.is_empty() {
            return Err(HypogramError::grammar(text, "hypothesis is empty"));
        }

        let tokens = self.lexicon.tokenize(text)?;

        if tokens.first().map(|t| t.kind) != Some(TokenKind::If) {
            return Err(HypogramError::grammar(text, "hypothesis must start with 'if'"));
        }
        if tokens[1..].iter().any(|t| t.kind == TokenKind::If) {
            return Err(HypogramError::grammar(text, "'if' may appear only once"));
        }

        let then_positions: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TokenKind::Then)
            .map(|(i, _)| i)
            .collect();
        let then = match then_positions.as_slice() {
            [] => return Err(HypogramError::grammar(text, "missing 'then'")),
            [single] => *single,
            _ => return Err(HypogramError::grammar(text, "'then' may appear only once")),
        };

        let antecedent = &tokens[1..then];
        let consequent = &tokens[then + 1..];
        if antecedent.is_empty() {
            return Err(HypogramError::grammar(text, "antecedent is empty"));
        }
        if consequent.is_empty() {
            return Err(HypogramError::grammar(text, "consequent is empty"));
        }

        let antecedent = self.parse_group(text, antecedent, "antecedent")?;
        let consequent = self.parse_group(text, consequent, "consequent")?;
        Hypothesis::new(antecedent, consequent)
    }

    fn parse_group(&self, text: &str, tokens: &[Token], group: &str) -> Result<Vec<Clause>> {
        tokens
            .split(|t| t.kind == TokenKind::And)
            .map(|segment| {
                if segment.is_empty() {
                    Err(HypogramError::grammar(
                        text,
                        format!("empty clause around 'and' in {}", group),
                    ))
                } else {
                    self.parse_clause(text, segment)
                }
            })
            .collect()
    }

    /// Resolve `<label> <direction>` (or `<direction> <label>`)
    fn parse_clause(&self, text: &str, segment: &[Token]) -> Result<Clause> {
        let is_word = |t: &Token| t.kind == TokenKind::Word;

        match segment {
            [Token {
                kind: TokenKind::Variable(index),
                ..
            }, direction @ Token {
                kind: TokenKind::Direction,
                ..
            }]
            | [direction @ Token {
                kind: TokenKind::Direction,
                ..
            }, Token {
                kind: TokenKind::Variable(index),
                ..
            }] => self.resolve(*index, &direction.text),

            [Token {
                kind: TokenKind::Variable(index),
                ..
            }, rest @ ..]
                if !rest.is_empty()
                    && rest
                        .iter()
                        .all(|t| matches!(t.kind, TokenKind::Word | TokenKind::Direction)) =>
            {
                self.resolve(*index, &join(rest))
            }

            [Token {
                kind: TokenKind::Variable(_),
                ..
            }] => Err(HypogramError::grammar(
                text,
                format!("clause '{}' has no direction", join(segment)),
            )),

            [words @ .., Token {
                kind: TokenKind::Direction,
                ..
            }]
            | [Token {
                kind: TokenKind::Direction,
                ..
            }, words @ ..]
                if !words.is_empty() && words.iter().all(is_word) =>
            {
                Err(HypogramError::UnknownVariable {
                    name: join(words),
                    context: text.to_string(),
                })
            }

            _ => Err(HypogramError::grammar(
                text,
                format!(
                    "clause '{}' does not match '<variable> <direction>'",
                    join(segment)
                ),
            )),
        }
    }

    fn resolve(&self, index: usize, direction: &str) -> Result<Clause> {
        let variable = &self.domain.variables()[index];
        match variable.resolve_direction(direction) {
            Some(declared) => Ok(Clause::new(variable.id.clone(), declared)),
            None => Err(HypogramError::InvalidDirection {
                variable: variable.id.clone(),
                direction: direction.to_string(),
                allowed: variable.directions.clone(),
            }),
        }
    }
}

/// Parse a hypothesis against a domain
pub fn parse(text: &str, domain: &DomainModel) -> Result<Hypothesis> {
    Parser::new(domain).parse(text)
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
