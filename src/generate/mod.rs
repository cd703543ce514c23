//! @acp:module "Generator"
//! @acp:summary "Seeded sampling of grammatical hypotheses from a domain model"
//! @acp:domain grammar
//! @acp:layer service
//!
//! # Sampling Algorithm
//!
//! For each hypothesis:
//!
//! 1. **Size** both groups: 1..=max clauses each, bounded by the variables left
//! 2. **Anchor** (grounded bias only) a relation with a polarity-consistent
//!    direction pair; its cause opens the antecedent, its effect the consequent
//! 3. **Fill** remaining slots with distinct variables, uniformly without replacement
//! 4. **Pick** one allowed direction per variable, uniformly
//! 5. **Render** through the parser's template

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainModel, Variable};
use crate::error::{HypogramError, Result};
use crate::hypothesis::{Clause, Hypothesis};

/// Attempts per requested hypothesis before deduplication gives up
const DEDUP_ATTEMPT_FACTOR: usize = 50;

/// Shape and policy of a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub count: usize,
    pub max_clauses_per_side: usize,
    /// Anchor each hypothesis on a declared relation
    pub grounded_bias: bool,
    /// Let the consequent reuse antecedent variables
    pub allow_overlap: bool,
    /// Drop hypotheses whose text was already produced
    pub dedup: bool,
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            count: 10,
            max_clauses_per_side: 2,
            grounded_bias: false,
            allow_overlap: false,
            dedup: false,
            seed: None,
        }
    }
}

impl GeneratorOptions {
    /// Fewest variables a domain needs for this shape
    pub fn required_variables(&self) -> usize {
        if self.allow_overlap {
            1
        } else {
            2
        }
    }
}

/// A generated hypothesis with its rendered text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
    pub hypothesis: Hypothesis,
    pub text: String,
}

/// Relation endpoints with the direction pairs that agree with it
#[derive(Debug, Clone)]
struct Anchor<'d> {
    cause: usize,
    effect: usize,
    pairs: Vec<(&'d str, &'d str)>,
}

/// Generate hypotheses using the options' seed (or OS entropy when unset)
pub fn generate_seeded(domain: &DomainModel, options: &GeneratorOptions) -> Result<Vec<Generated>> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    generate(domain, options, &mut rng)
}

/// Generate `options.count` hypotheses drawing randomness from `rng`
pub fn generate<R: Rng + ?Sized>(
    domain: &DomainModel,
    options: &GeneratorOptions,
    rng: &mut R,
) -> Result<Vec<Generated>> {
    if options.max_clauses_per_side == 0 {
        return Err(HypogramError::Other(
            "max clauses per side must be at least 1".to_string(),
        ));
    }

    let available = domain.variables().len();
    let required = options.required_variables();
    if available < required {
        return Err(HypogramError::InsufficientVariables {
            available,
            required,
        });
    }

    let anchors = if options.grounded_bias {
        collect_anchors(domain)
    } else {
        Vec::new()
    };
    if options.grounded_bias && anchors.is_empty() {
        tracing::debug!("No relation has a consistent direction pair, sampling without bias");
    }

    let max_attempts = if options.dedup {
        options.count.saturating_mul(DEDUP_ATTEMPT_FACTOR)
    } else {
        options.count
    };

    let mut generated = Vec::with_capacity(options.count);
    let mut seen = HashSet::new();
    let mut attempts = 0;

    while generated.len() < options.count && attempts < max_attempts {
        attempts += 1;

        let hypothesis = if anchors.is_empty() {
            sample_unbiased(domain, options, rng)?
        } else {
            let anchor = &anchors[rng.random_range(0..anchors.len())];
            sample_anchored(domain, options, anchor, rng)?
        };
        let text = hypothesis.render(domain)?;

        if options.dedup && !seen.insert(text.clone()) {
            continue;
        }
        generated.push(Generated { hypothesis, text });
    }

    if generated.len() < options.count {
        tracing::warn!(
            "Only {} distinct hypotheses found after {} attempts (requested {})",
            generated.len(),
            attempts,
            options.count
        );
    }

    Ok(generated)
}

fn collect_anchors(domain: &DomainModel) -> Vec<Anchor<'_>> {
    let variables = domain.variables();
    let position = |id: &str| variables.iter().position(|v| v.id == id);

    domain
        .relations()
        .iter()
        .filter_map(|relation| {
            let cause = position(&relation.cause)?;
            let effect = position(&relation.effect)?;
            let pairs = relation.consistent_pairs(&variables[cause], &variables[effect]);
            if pairs.is_empty() {
                None
            } else {
                Some(Anchor {
                    cause,
                    effect,
                    pairs,
                })
            }
        })
        .collect()
}

/// Clause counts for both groups
fn group_sizes<R: Rng + ?Sized>(
    rng: &mut R,
    available: usize,
    options: &GeneratorOptions,
) -> (usize, usize) {
    let max = options.max_clauses_per_side;
    if options.allow_overlap {
        let upper = max.min(available);
        (rng.random_range(1..=upper), rng.random_range(1..=upper))
    } else {
        let antecedent = rng.random_range(1..=max.min(available - 1));
        let consequent = rng.random_range(1..=max.min(available - antecedent));
        (antecedent, consequent)
    }
}

/// Up to `amount` distinct entries of `pool`
fn sample_from<R: Rng + ?Sized>(rng: &mut R, pool: &[usize], amount: usize) -> Vec<usize> {
    let amount = amount.min(pool.len());
    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i])
        .collect()
}

fn random_clause<R: Rng + ?Sized>(rng: &mut R, variable: &Variable) -> Clause {
    let direction = &variable.directions[rng.random_range(0..variable.directions.len())];
    Clause::new(variable.id.clone(), direction.clone())
}

fn sample_unbiased<R: Rng + ?Sized>(
    domain: &DomainModel,
    options: &GeneratorOptions,
    rng: &mut R,
) -> Result<Hypothesis> {
    let variables = domain.variables();
    let all: Vec<usize> = (0..variables.len()).collect();
    let (antecedent_size, consequent_size) = group_sizes(rng, variables.len(), options);

    let antecedent = sample_from(rng, &all, antecedent_size);
    let consequent_pool: Vec<usize> = if options.allow_overlap {
        all
    } else {
        all.into_iter().filter(|i| !antecedent.contains(i)).collect()
    };
    let consequent = sample_from(rng, &consequent_pool, consequent_size);

    let antecedent = antecedent
        .iter()
        .map(|&i| random_clause(rng, &variables[i]))
        .collect();
    let consequent = consequent
        .iter()
        .map(|&i| random_clause(rng, &variables[i]))
        .collect();
    Hypothesis::new(antecedent, consequent)
}

fn sample_anchored<R: Rng + ?Sized>(
    domain: &DomainModel,
    options: &GeneratorOptions,
    anchor: &Anchor<'_>,
    rng: &mut R,
) -> Result<Hypothesis> {
    let variables = domain.variables();
    let (antecedent_size, consequent_size) = group_sizes(rng, variables.len(), options);
    let (cause_direction, effect_direction) = anchor.pairs[rng.random_range(0..anchor.pairs.len())];

    let antecedent_pool: Vec<usize> = (0..variables.len())
        .filter(|&i| i != anchor.cause && (options.allow_overlap || i != anchor.effect))
        .collect();
    let extra_antecedent = sample_from(rng, &antecedent_pool, antecedent_size - 1);

    let consequent_pool: Vec<usize> = (0..variables.len())
        .filter(|&i| {
            i != anchor.effect
                && (options.allow_overlap || (i != anchor.cause && !extra_antecedent.contains(&i)))
        })
        .collect();
    let extra_consequent = sample_from(rng, &consequent_pool, consequent_size - 1);

    let mut antecedent = vec![Clause::new(
        variables[anchor.cause].id.clone(),
        cause_direction,
    )];
    antecedent.extend(
        extra_antecedent
            .iter()
            .map(|&i| random_clause(rng, &variables[i])),
    );
    antecedent.shuffle(rng);

    let mut consequent = vec![Clause::new(
        variables[anchor.effect].id.clone(),
        effect_direction,
    )];
    consequent.extend(
        extra_consequent
            .iter()
            .map(|&i| random_clause(rng, &variables[i])),
    );
    consequent.shuffle(rng);

    Hypothesis::new(antecedent, consequent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> DomainModel {
        DomainModel::from_json(
            r#"{
                "variables": [
                    {"id": "temperature", "directions": ["increases", "decreases"]},
                    {"id": "brightness", "directions": ["increases", "decreases"]},
                    {"id": "radiation", "directions": ["increases", "decreases", "remains the same"]},
                    {"id": "heat", "directions": ["rises", "falls"]}
                ],
                "relations": [{"cause": "temperature", "effect": "brightness", "polarity": "positive"}]
            }"#,
        )
        .unwrap()
    }

    fn options(count: usize) -> GeneratorOptions {
        GeneratorOptions {
            count,
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn test_count_and_shape() {
        let domain = domain();
        let opts = GeneratorOptions {
            max_clauses_per_side: 3,
            ..options(200)
        };
        let generated = generate_seeded(&domain, &opts).unwrap();
        assert_eq!(generated.len(), 200);
        for g in &generated {
            let h = &g.hypothesis;
            assert!((1..=3).contains(&h.antecedent().len()));
            assert!((1..=3).contains(&h.consequent().len()));
            let ante: HashSet<_> = h.antecedent().iter().map(|c| &c.variable).collect();
            assert_eq!(ante.len(), h.antecedent().len());
            assert!(h.consequent().iter().all(|c| !ante.contains(&c.variable)));
            h.validate(&domain).unwrap();
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let domain = domain();
        let a: Vec<_> = generate_seeded(&domain, &options(50)).unwrap();
        let b: Vec<_> = generate_seeded(&domain, &options(50)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_grounded_bias_anchors_relation() {
        let domain = domain();
        let opts = GeneratorOptions {
            grounded_bias: true,
            ..options(100)
        };
        for g in generate_seeded(&domain, &opts).unwrap() {
            let cause = g
                .hypothesis
                .antecedent()
                .iter()
                .find(|c| c.variable == "temperature")
                .expect("cause in antecedent");
            let effect = g
                .hypothesis
                .consequent()
                .iter()
                .find(|c| c.variable == "brightness")
                .expect("effect in consequent");
            assert_eq!(cause.direction, effect.direction);
        }
    }

    #[test]
    fn test_insufficient_variables() {
        let domain = DomainModel::from_json(
            r#"{"variables": [{"id": "temperature", "directions": ["increases"]}]}"#,
        )
        .unwrap();
        let err = generate_seeded(&domain, &options(1)).unwrap_err();
        assert!(matches!(
            err,
            HypogramError::InsufficientVariables {
                available: 1,
                required: 2
            }
        ));

        let overlap = GeneratorOptions {
            allow_overlap: true,
            ..options(3)
        };
        let generated = generate_seeded(&domain, &overlap).unwrap();
        assert_eq!(
            generated[0].text,
            "if temperature increases then temperature increases"
        );
    }

    #[test]
    fn test_dedup_stops_when_space_exhausted() {
        let domain = DomainModel::from_json(
            r#"{"variables": [
                {"id": "a", "directions": ["increases"]},
                {"id": "b", "directions": ["increases"]}
            ]}"#,
        )
        .unwrap();
        let opts = GeneratorOptions {
            dedup: true,
            ..options(10)
        };
        let generated = generate_seeded(&domain, &opts).unwrap();
        // Only "if a ... then b ..." and "if b ... then a ..." exist
        assert_eq!(generated.len(), 2);
    }

    #[test]
    fn test_zero_max_clauses_rejected() {
        let opts = GeneratorOptions {
            max_clauses_per_side: 0,
            ..options(1)
        };
        assert!(generate_seeded(&domain(), &opts).is_err());
    }
}
