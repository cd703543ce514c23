//! @acp:module "Quality Evaluator"
//! @acp:summary "Multi-factor quality scoring of structured hypotheses"
//! @acp:domain grammar
//! @acp:layer service
//!
//! # Sub-scores
//!
//! Every sub-score lies in [0, 1]:
//!
//! - **Groundedness**: 1 when some antecedent/consequent pair matches a declared
//!   relation (cause in the antecedent) with consistent directions
//! - **Complexity**: distinct variables used, clamped at `complexity_cap`
//! - **Specificity**: share of consequent variables not also manipulated,
//!   scaled down when every relevant relation disagrees with the directions
//! - **Coverage**: share of domain relations whose cause and effect appear
//!   as an antecedent/consequent pair

pub mod feedback;
pub mod scoring;

pub use feedback::{diagnose, Feedback};
pub use scoring::{get_preset_weights, list_presets, preset_names, ScoreWeights};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::DomainModel;
use crate::error::{HypogramError, Result};
use crate::hypothesis::Hypothesis;

/// Scoring policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorConfig {
    pub weights: ScoreWeights,
    /// Distinct-variable count at which complexity saturates
    pub complexity_cap: usize,
    /// Fraction of specificity removed for polarity-inconsistent directions
    pub polarity_penalty: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            complexity_cap: 4,
            polarity_penalty: 0.5,
        }
    }
}

/// Named sub-scores and their weighted aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityScore {
    pub groundedness: f64,
    pub complexity: f64,
    pub specificity: f64,
    pub coverage: f64,
    pub aggregate: f64,
}

impl QualityScore {
    /// Sub-scores in display order
    pub fn sub_scores(&self) -> [(&'static str, f64); 4] {
        [
            ("groundedness", self.groundedness),
            ("complexity", self.complexity),
            ("specificity", self.specificity),
            ("coverage", self.coverage),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Score a hypothesis; fails only on variables the domain does not declare
    pub fn evaluate(&self, hypothesis: &Hypothesis, domain: &DomainModel) -> Result<QualityScore> {
        for clause in hypothesis.clauses() {
            if domain.lookup_variable(&clause.variable).is_err() {
                return Err(HypogramError::UnknownVariable {
                    name: clause.variable.clone(),
                    context: "evaluation".to_string(),
                });
            }
        }

        let groundedness = groundedness(hypothesis, domain);
        let complexity = self.complexity(hypothesis);
        let specificity = self.specificity(hypothesis, domain);
        let coverage = coverage(hypothesis, domain);
        let aggregate = self
            .config
            .weights
            .combine(groundedness, complexity, specificity, coverage);

        Ok(QualityScore {
            groundedness,
            complexity,
            specificity,
            coverage,
            aggregate,
        })
    }

    fn complexity(&self, hypothesis: &Hypothesis) -> f64 {
        let cap = self.config.complexity_cap.max(1);
        let distinct = hypothesis.variables().len().min(cap);
        distinct as f64 / cap as f64
    }

    fn specificity(&self, hypothesis: &Hypothesis, domain: &DomainModel) -> f64 {
        let manipulated: HashSet<&str> = hypothesis
            .antecedent()
            .iter()
            .map(|c| c.variable.as_str())
            .collect();
        let observed: HashSet<&str> = hypothesis
            .consequent()
            .iter()
            .map(|c| c.variable.as_str())
            .collect();
        let tautological = observed.intersection(&manipulated).count() as f64 / observed.len() as f64;
        let mut score = 1.0 - tautological;

        let mut relevant = hypothesis
            .cross_pairs()
            .filter(|(a, c)| a.variable != c.variable)
            .filter_map(|(a, c)| {
                domain
                    .relation(&a.variable, &c.variable)
                    .map(|r| r.is_consistent(&a.direction, &c.direction))
            })
            .peekable();
        if relevant.peek().is_some() && !relevant.any(|consistent| consistent) {
            score *= 1.0 - self.polarity_penalty();
        }

        score.clamp(0.0, 1.0)
    }

    /// Configured penalty within [0, 1]; non-finite values disable it
    fn polarity_penalty(&self) -> f64 {
        let penalty = self.config.polarity_penalty;
        if penalty.is_finite() {
            penalty.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

fn groundedness(hypothesis: &Hypothesis, domain: &DomainModel) -> f64 {
    let grounded = hypothesis.cross_pairs().any(|(a, c)| {
        domain
            .relation(&a.variable, &c.variable)
            .is_some_and(|r| r.is_consistent(&a.direction, &c.direction))
    });
    if grounded {
        1.0
    } else {
        0.0
    }
}

fn coverage(hypothesis: &Hypothesis, domain: &DomainModel) -> f64 {
    let relations = domain.relations();
    if relations.is_empty() {
        return 0.0;
    }
    let touched = relations
        .iter()
        .filter(|r| {
            hypothesis.antecedent().iter().any(|c| c.variable == r.cause)
                && hypothesis.consequent().iter().any(|c| c.variable == r.effect)
        })
        .count();
    touched as f64 / relations.len() as f64
}

/// Score a hypothesis with the default policy
pub fn evaluate(hypothesis: &Hypothesis, domain: &DomainModel) -> Result<QualityScore> {
    Evaluator::default().evaluate(hypothesis, domain)
}
