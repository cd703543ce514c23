#![forbid(unsafe_code)]

//! @acp:module "Hypogram Library"
//! @acp:summary "Qualitative-reasoning grammar for scientific hypotheses"
//! @acp:domain grammar
//! @acp:layer api
//! @acp:stability stable
//!
//! # Hypogram
//!
//! Generates, parses and scores hypotheses of the form
//! `if <variable> <direction> (and ...)* then <variable> <direction> (and ...)*`
//! against a domain of variables and qualitative relations.
//!
//! ## Features
//!
//! - **Domain Model**: validated, immutable variables and relations
//! - **Parser**: longest-match tokenizer plus strict template grammar
//! - **Generator**: seeded sampling with optional relation-grounded bias
//! - **Evaluator**: groundedness, complexity, specificity and coverage scores
//!
//! ## Example
//!
//! ```rust
//! use hypogram::{evaluate, parse, DomainModel};
//!
//! fn main() -> hypogram::Result<()> {
//!     let domain = DomainModel::from_json(r#"{
//!         "variables": [
//!             {"id": "temperature", "directions": ["increases", "decreases"]},
//!             {"id": "brightness", "directions": ["increases", "decreases"]}
//!         ],
//!         "relations": [{"cause": "temperature", "effect": "brightness", "polarity": "positive"}]
//!     }"#)?;
//!
//!     let hypothesis = parse("if temperature increases then brightness increases", &domain)?;
//!     let score = evaluate(&hypothesis, &domain)?;
//!     assert_eq!(score.groundedness, 1.0);
//!
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod evaluate;
pub mod generate;
pub mod hypothesis;
pub mod parse;

// Re-exports
pub use config::Config;
pub use domain::{DomainModel, DomainSpec, Polarity, Relation, Trend, Variable};
pub use error::{HypogramError, Result};
pub use evaluate::{diagnose, evaluate, Evaluator, EvaluatorConfig, Feedback, QualityScore, ScoreWeights};
pub use generate::{generate, generate_seeded, Generated, GeneratorOptions};
pub use hypothesis::{Clause, Hypothesis};
pub use parse::{parse, Parser};
