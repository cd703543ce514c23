//! @acp:module "Domain Model"
//! @acp:summary "Immutable variables and relations shared by parser, generator and evaluator"
//! @acp:domain grammar
//! @acp:layer model
//!
//! A [`DomainModel`] is built once from a [`DomainSpec`] and never mutated
//! afterwards, so it can be shared by reference across threads.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::lexicon::{check_phrase, normalize_phrase, Trend};
use super::spec::{DomainSpec, Polarity, RelationSpec, VariableSpec};
use crate::error::{HypogramError, Result};

/// A variable a hypothesis may reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub id: String,
    pub label: String,
    pub directions: Vec<String>,
}

impl Variable {
    /// Resolve a direction word (case-insensitive) to its declared form
    pub fn resolve_direction(&self, word: &str) -> Option<&str> {
        let wanted = normalize_phrase(word);
        self.directions
            .iter()
            .find(|d| normalize_phrase(d) == wanted)
            .map(String::as_str)
    }

    pub fn allows(&self, word: &str) -> bool {
        self.resolve_direction(word).is_some()
    }
}

/// An ordered cause/effect pair between two declared variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub cause: String,
    pub effect: String,
    pub polarity: Option<Polarity>,
    /// Explicit valid (cause direction, effect direction) pairs
    pub pairs: Vec<(String, String)>,
}

impl Relation {
    pub fn involves(&self, variable_id: &str) -> bool {
        self.cause == variable_id || self.effect == variable_id
    }

    /// Whether moving the cause and effect this way agrees with the relation
    pub fn is_consistent(&self, cause_direction: &str, effect_direction: &str) -> bool {
        if !self.pairs.is_empty() {
            let (cause, effect) = (normalize_phrase(cause_direction), normalize_phrase(effect_direction));
            return self
                .pairs
                .iter()
                .any(|(c, e)| normalize_phrase(c) == cause && normalize_phrase(e) == effect);
        }

        let cause = Trend::of(cause_direction);
        let effect = Trend::of(effect_direction);
        if !cause.is_change() || !effect.is_change() {
            return false;
        }

        match self.polarity {
            Some(Polarity::Positive) => match (cause, effect) {
                (Trend::Other, Trend::Other) => {
                    normalize_phrase(cause_direction) == normalize_phrase(effect_direction)
                }
                _ => cause == effect,
            },
            Some(Polarity::Negative) => cause.opposite() == Some(effect),
            None => true,
        }
    }

    /// All direction pairs of the two variables that agree with the relation
    pub fn consistent_pairs<'a>(
        &self,
        cause: &'a Variable,
        effect: &'a Variable,
    ) -> Vec<(&'a str, &'a str)> {
        let mut pairs = Vec::new();
        for c in &cause.directions {
            for e in &effect.directions {
                if self.is_consistent(c, e) {
                    pairs.push((c.as_str(), e.as_str()));
                }
            }
        }
        pairs
    }
}

/// Validated, read-only domain of variables and relations
#[derive(Debug, Clone)]
pub struct DomainModel {
    variables: Vec<Variable>,
    index: HashMap<String, usize>,
    relations: Vec<Relation>,
}

impl DomainModel {
    /// Build a model from a parsed domain document, validating every invariant
    pub fn load(spec: DomainSpec) -> Result<Self> {
        let mut variables = Vec::with_capacity(spec.variables.len());
        let mut index = HashMap::new();
        let mut labels = HashSet::new();

        for var_spec in spec.variables {
            let variable = build_variable(var_spec)?;
            if index.contains_key(&variable.id) {
                return Err(HypogramError::Schema(format!(
                    "Duplicate variable id '{}'",
                    variable.id
                )));
            }
            if !labels.insert(normalize_phrase(&variable.label)) {
                return Err(HypogramError::Schema(format!(
                    "Duplicate variable label '{}'",
                    variable.label
                )));
            }
            index.insert(variable.id.clone(), variables.len());
            variables.push(variable);
        }

        for variable in &variables {
            for direction in &variable.directions {
                if labels.contains(&normalize_phrase(direction)) {
                    return Err(HypogramError::Schema(format!(
                        "Direction '{}' of '{}' collides with a variable label",
                        direction, variable.id
                    )));
                }
            }
        }

        check_clause_boundaries(&variables)?;

        let mut relations: Vec<Relation> = Vec::with_capacity(spec.relations.len());
        for rel_spec in spec.relations {
            let relation = build_relation(rel_spec, &variables, &index)?;
            if relations
                .iter()
                .any(|r| r.cause == relation.cause && r.effect == relation.effect)
            {
                return Err(HypogramError::Schema(format!(
                    "Duplicate relation '{}' -> '{}'",
                    relation.cause, relation.effect
                )));
            }
            relations.push(relation);
        }

        tracing::debug!(
            "Loaded domain with {} variables and {} relations",
            variables.len(),
            relations.len()
        );

        Ok(Self {
            variables,
            index,
            relations,
        })
    }

    /// Parse and validate a JSON domain document
    pub fn from_json(content: &str) -> Result<Self> {
        Self::load(DomainSpec::from_json(content)?)
    }

    /// Read and validate a domain file (JSON, or YAML by extension)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(DomainSpec::from_path(path)?)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn lookup_variable(&self, id: &str) -> Result<&Variable> {
        self.index
            .get(id)
            .map(|&i| &self.variables[i])
            .ok_or_else(|| HypogramError::UnknownVariable {
                name: id.to_string(),
                context: "domain lookup".to_string(),
            })
    }

    /// All relations where the variable is the cause or the effect
    pub fn relations_of(&self, id: &str) -> Vec<&Relation> {
        self.relations.iter().filter(|r| r.involves(id)).collect()
    }

    /// The relation declared from `cause` to `effect`, if any
    pub fn relation(&self, cause: &str, effect: &str) -> Option<&Relation> {
        self.relations
            .iter()
            .find(|r| r.cause == cause && r.effect == effect)
    }
}

fn build_variable(spec: VariableSpec) -> Result<Variable> {
    if spec.id.trim().is_empty() {
        return Err(HypogramError::Schema("Variable id must not be empty".to_string()));
    }
    let label = spec
        .label
        .unwrap_or_else(|| spec.id.replace('_', " "))
        .trim()
        .to_string();
    check_phrase(&label).map_err(|reason| {
        HypogramError::Schema(format!("Label of variable '{}' {}", spec.id, reason))
    })?;

    if spec.directions.is_empty() {
        return Err(HypogramError::Schema(format!(
            "Variable '{}' declares no directions",
            spec.id
        )));
    }
    let mut seen = HashSet::new();
    let mut directions = Vec::with_capacity(spec.directions.len());
    for direction in spec.directions {
        check_phrase(&direction).map_err(|reason| {
            HypogramError::Schema(format!(
                "Direction '{}' of variable '{}' {}",
                direction, spec.id, reason
            ))
        })?;
        if !seen.insert(normalize_phrase(&direction)) {
            return Err(HypogramError::Schema(format!(
                "Direction '{}' repeated for variable '{}'",
                direction, spec.id
            )));
        }
        directions.push(direction.trim().to_string());
    }

    Ok(Variable {
        id: spec.id,
        label,
        directions,
    })
}

/// Every `<label> <direction>` clause must tokenize back to its own label:
/// no other label or direction may be a longer word-prefix of it
fn check_clause_boundaries(variables: &[Variable]) -> Result<()> {
    let phrases: Vec<Vec<String>> = variables
        .iter()
        .flat_map(|v| std::iter::once(&v.label).chain(&v.directions))
        .map(|text| phrase_words(text))
        .collect();

    for variable in variables {
        let label = phrase_words(&variable.label);
        for direction in &variable.directions {
            let mut clause = label.clone();
            clause.extend(phrase_words(direction));
            if let Some(phrase) = phrases
                .iter()
                .find(|p| p.len() > label.len() && clause.starts_with(p))
            {
                return Err(HypogramError::Schema(format!(
                    "Clause '{}' of variable '{}' would be read as '{}'",
                    clause.join(" "),
                    variable.id,
                    phrase.join(" ")
                )));
            }
        }
    }
    Ok(())
}

fn phrase_words(text: &str) -> Vec<String> {
    normalize_phrase(text).split(' ').map(str::to_string).collect()
}

fn build_relation(
    spec: RelationSpec,
    variables: &[Variable],
    index: &HashMap<String, usize>,
) -> Result<Relation> {
    let cause = endpoint(variables, index, &spec.cause, "cause")?;
    let effect = endpoint(variables, index, &spec.effect, "effect")?;

    if cause.id == effect.id {
        return Err(HypogramError::Schema(format!(
            "Relation '{}' -> '{}' relates a variable to itself",
            cause.id, effect.id
        )));
    }

    let mut pairs = Vec::with_capacity(spec.directions.len());
    for (c, e) in &spec.directions {
        let resolved_cause = cause.resolve_direction(c).ok_or_else(|| {
            HypogramError::Schema(format!(
                "Relation '{}' -> '{}' uses direction '{}' not allowed for '{}'",
                cause.id, effect.id, c, cause.id
            ))
        })?;
        let resolved_effect = effect.resolve_direction(e).ok_or_else(|| {
            HypogramError::Schema(format!(
                "Relation '{}' -> '{}' uses direction '{}' not allowed for '{}'",
                cause.id, effect.id, e, effect.id
            ))
        })?;
        pairs.push((resolved_cause.to_string(), resolved_effect.to_string()));
    }

    Ok(Relation {
        cause: cause.id.clone(),
        effect: effect.id.clone(),
        polarity: spec.polarity,
        pairs,
    })
}

fn endpoint<'a>(
    variables: &'a [Variable],
    index: &HashMap<String, usize>,
    id: &str,
    role: &str,
) -> Result<&'a Variable> {
    index.get(id).map(|&i| &variables[i]).ok_or_else(|| {
        HypogramError::Schema(format!(
            "Relation {} '{}' is not a declared variable",
            role, id
        ))
    })
}
