//! @acp:module "Hypothesis Feedback"
//! @acp:summary "Learner feedback on hypothesis structure (Kroeze et al., 2019)"
//! @acp:domain grammar
//! @acp:layer logic
//!
//! Criteria are checked in order and the first failing one is reported.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::Trend;
use crate::hypothesis::{Clause, Hypothesis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feedback {
    Appropriate,
    NotEnoughVariables,
    NothingChanges,
    ConfoundedManipulation,
    ObservingManipulated,
}

impl Feedback {
    /// Numeric label used in the inquiry-learning rubric
    pub fn code(&self) -> u8 {
        match self {
            Feedback::Appropriate => 0,
            Feedback::NotEnoughVariables => 1,
            Feedback::NothingChanges => 2,
            Feedback::ConfoundedManipulation => 4,
            Feedback::ObservingManipulated => 5,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Appropriate => "Appropriate hypothesis.",
            Feedback::NotEnoughVariables => {
                "Not enough variables, a hypothesis should always have at least two variables."
            }
            Feedback::NothingChanges => "You can only test a hypothesis if something changes.",
            Feedback::ConfoundedManipulation => {
                "You are changing other variables at the same time, and you can't be sure which one has an effect."
            }
            Feedback::ObservingManipulated => {
                "You are observing the same variables that you choose to change."
            }
        }
    }

    pub fn is_appropriate(&self) -> bool {
        *self == Feedback::Appropriate
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Diagnose the first structural problem of a hypothesis
pub fn diagnose(hypothesis: &Hypothesis) -> Feedback {
    if hypothesis.variables().len() < 2 {
        return Feedback::NotEnoughVariables;
    }

    let changes = |clauses: &[Clause]| clauses.iter().any(|c| Trend::of(&c.direction).is_change());
    if !changes(hypothesis.antecedent()) || !changes(hypothesis.consequent()) {
        return Feedback::NothingChanges;
    }

    let changed: HashSet<&str> = hypothesis
        .antecedent()
        .iter()
        .filter(|c| Trend::of(&c.direction).is_change())
        .map(|c| c.variable.as_str())
        .collect();
    if changed.len() > 1 {
        return Feedback::ConfoundedManipulation;
    }

    let manipulated: HashSet<&str> = hypothesis
        .antecedent()
        .iter()
        .map(|c| c.variable.as_str())
        .collect();
    if hypothesis
        .consequent()
        .iter()
        .any(|c| manipulated.contains(c.variable.as_str()))
    {
        return Feedback::ObservingManipulated;
    }

    Feedback::Appropriate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hypothesis(antecedent: &[(&str, &str)], consequent: &[(&str, &str)]) -> Hypothesis {
        let clauses = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(v, d)| Clause::new(*v, *d))
                .collect::<Vec<_>>()
        };
        Hypothesis::new(clauses(antecedent), clauses(consequent)).unwrap()
    }

    #[test]
    fn test_appropriate() {
        let h = hypothesis(&[("temperature", "increases")], &[("brightness", "increases")]);
        assert_eq!(diagnose(&h), Feedback::Appropriate);
        assert_eq!(diagnose(&h).code(), 0);
    }

    #[test]
    fn test_single_variable() {
        let h = hypothesis(&[("temperature", "increases")], &[("temperature", "decreases")]);
        assert_eq!(diagnose(&h), Feedback::NotEnoughVariables);
    }

    #[test]
    fn test_nothing_changes() {
        let h = hypothesis(
            &[("temperature", "remains the same")],
            &[("brightness", "increases")],
        );
        assert_eq!(diagnose(&h), Feedback::NothingChanges);
    }

    #[test]
    fn test_confounded_manipulation() {
        let h = hypothesis(
            &[("temperature", "increases"), ("radiation", "increases")],
            &[("brightness", "increases")],
        );
        assert_eq!(diagnose(&h), Feedback::ConfoundedManipulation);
    }

    #[test]
    fn test_controlled_variable_is_not_confounding() {
        let h = hypothesis(
            &[("temperature", "increases"), ("radiation", "remains the same")],
            &[("brightness", "increases")],
        );
        assert_eq!(diagnose(&h), Feedback::Appropriate);
    }

    #[test]
    fn test_observing_manipulated() {
        let h = hypothesis(
            &[("temperature", "increases")],
            &[("brightness", "increases"), ("temperature", "decreases")],
        );
        assert_eq!(diagnose(&h), Feedback::ObservingManipulated);
        assert!(diagnose(&h).message().contains("same variables"));
    }
}
