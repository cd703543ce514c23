//! @acp:module "Hypothesis"
//! @acp:summary "Structured conditional hypotheses and their canonical text form"
//! @acp:domain grammar
//! @acp:layer model
//!
//! Canonical text form:
//!
//! ```text
//! "if " <clause> (" and " <clause>)* " then " <clause> (" and " <clause>)*
//! <clause> ::= <variable-label> " " <direction-word>
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::DomainModel;
use crate::error::{HypogramError, Result};

/// Template keyword opening the antecedent
pub const IF: &str = "if";
/// Template keyword opening the consequent
pub const THEN: &str = "then";
/// Template keyword joining clauses within a group
pub const AND: &str = "and";

/// A single (variable, direction) assertion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    /// Variable id
    pub variable: String,
    /// Direction as declared on the variable
    pub direction: String,
}

impl Clause {
    pub fn new(variable: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            direction: direction.into(),
        }
    }

    /// Render as `<label> <direction>`
    pub fn render(&self, domain: &DomainModel) -> Result<String> {
        let variable = domain.lookup_variable(&self.variable)?;
        Ok(format!("{} {}", variable.label, self.direction))
    }
}

/// Antecedent and consequent clause groups, each non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Hypothesis {
    antecedent: Vec<Clause>,
    consequent: Vec<Clause>,
}

impl Hypothesis {
    pub fn new(antecedent: Vec<Clause>, consequent: Vec<Clause>) -> Result<Self> {
        if antecedent.is_empty() {
            return Err(HypogramError::grammar(
                "<structured hypothesis>",
                "antecedent must contain at least one clause",
            ));
        }
        if consequent.is_empty() {
            return Err(HypogramError::grammar(
                "<structured hypothesis>",
                "consequent must contain at least one clause",
            ));
        }
        Ok(Self {
            antecedent,
            consequent,
        })
    }

    pub fn antecedent(&self) -> &[Clause] {
        &self.antecedent
    }

    pub fn consequent(&self) -> &[Clause] {
        &self.consequent
    }

    /// All clauses, antecedent first
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.antecedent.iter().chain(self.consequent.iter())
    }

    /// Every (antecedent clause, consequent clause) combination
    pub fn cross_pairs(&self) -> impl Iterator<Item = (&Clause, &Clause)> {
        self.antecedent
            .iter()
            .flat_map(move |a| self.consequent.iter().map(move |c| (a, c)))
    }

    /// Distinct variable ids across both groups
    pub fn variables(&self) -> BTreeSet<&str> {
        self.clauses().map(|c| c.variable.as_str()).collect()
    }

    /// Check every clause against the domain
    pub fn validate(&self, domain: &DomainModel) -> Result<()> {
        for clause in self.clauses() {
            let variable = domain.lookup_variable(&clause.variable)?;
            if !variable.allows(&clause.direction) {
                return Err(HypogramError::InvalidDirection {
                    variable: variable.id.clone(),
                    direction: clause.direction.clone(),
                    allowed: variable.directions.clone(),
                });
            }
        }
        Ok(())
    }

    /// Render through the canonical template accepted by the parser
    pub fn render(&self, domain: &DomainModel) -> Result<String> {
        let join = |clauses: &[Clause]| -> Result<String> {
            let parts = clauses
                .iter()
                .map(|c| c.render(domain))
                .collect::<Result<Vec<_>>>()?;
            Ok(parts.join(&format!(" {} ", AND)))
        };
        Ok(format!(
            "{} {} {} {}",
            IF,
            join(&self.antecedent)?,
            THEN,
            join(&self.consequent)?
        ))
    }
}
