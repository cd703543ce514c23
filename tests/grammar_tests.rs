//! Grammar engine integration tests
//!
//! Round-trip, rejection, scoring and reproducibility behaviour across the
//! bundled domains.

use hypogram::domain::DomainSpec;
use hypogram::{
    evaluate, generate_seeded, parse, Clause, DomainModel, Evaluator, EvaluatorConfig,
    GeneratorOptions, Hypothesis, HypogramError, ScoreWeights,
};

const TEMPERATURE: &str = include_str!("../domains/temperature.json");
const PLANTS: &str = include_str!("../domains/plants.yaml");

fn temperature() -> DomainModel {
    DomainModel::from_json(TEMPERATURE).unwrap()
}

fn plants() -> DomainModel {
    DomainModel::load(DomainSpec::from_yaml(PLANTS).unwrap()).unwrap()
}

fn scenario() -> DomainModel {
    DomainModel::from_json(
        r#"{
            "variables": [
                {"id": "temperature", "label": "temperature", "directions": ["increases", "decreases"]},
                {"id": "brightness", "label": "brightness", "directions": ["increases", "decreases"]}
            ],
            "relations": [{"cause": "temperature", "effect": "brightness", "polarity": "positive"}]
        }"#,
    )
    .unwrap()
}

fn option_grid() -> Vec<GeneratorOptions> {
    let mut grid = Vec::new();
    for seed in [1, 17, 2024] {
        for max_clauses_per_side in [1, 2, 3] {
            for grounded_bias in [false, true] {
                for allow_overlap in [false, true] {
                    grid.push(GeneratorOptions {
                        count: 40,
                        max_clauses_per_side,
                        grounded_bias,
                        allow_overlap,
                        dedup: false,
                        seed: Some(seed),
                    });
                }
            }
        }
    }
    grid
}

// =============================================================================
// Round-trip: parse(render(h)) == h
// =============================================================================

mod round_trip_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_round_trip(domain: &DomainModel) {
        for options in option_grid() {
            for generated in generate_seeded(domain, &options).unwrap() {
                let parsed = parse(&generated.text, domain).unwrap();
                assert_eq!(parsed, generated.hypothesis, "text: {}", generated.text);
            }
        }
    }

    #[test]
    fn test_round_trip_temperature_domain() {
        assert_round_trip(&temperature());
    }

    #[test]
    fn test_round_trip_multi_word_labels() {
        assert_round_trip(&plants());
    }

    #[test]
    fn test_round_trip_uppercased_text() {
        let domain = plants();
        let options = GeneratorOptions {
            count: 25,
            seed: Some(5),
            ..Default::default()
        };
        for generated in generate_seeded(&domain, &options).unwrap() {
            let shouted = format!("  {}  ", generated.text.to_uppercase());
            assert_eq!(parse(&shouted, &domain).unwrap(), generated.hypothesis);
        }
    }
}

// =============================================================================
// Rejection: grammar and domain errors
// =============================================================================

mod rejection_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_grammar_rejection() {
        let domain = temperature();
        for text in [
            "if temperature increases brightness increases",
            "if then brightness increases",
            "if temperature increases then ",
            "if temperature increases! then brightness increases",
            "if temperature increases then brightness increases.",
            "if (temperature increases) then brightness increases",
        ] {
            assert!(
                matches!(parse(text, &domain), Err(HypogramError::Grammar { .. })),
                "{:?} should be a grammar error",
                text
            );
        }
    }

    #[test]
    fn test_domain_rejection() {
        let domain = temperature();
        assert!(matches!(
            parse("if pressure increases then brightness increases", &domain),
            Err(HypogramError::UnknownVariable { .. })
        ));
        assert!(matches!(
            parse("if light remains the same then brightness increases", &domain),
            Err(HypogramError::InvalidDirection { .. })
        ));
    }

    #[test]
    fn test_label_swallowing_direction_rejected_at_load() {
        let result = DomainModel::from_json(
            r#"{"variables": [
                {"id": "sea_level", "directions": ["rise", "falls"]},
                {"id": "sea_level_rise", "directions": ["increases", "decreases"]}
            ]}"#,
        );
        assert!(matches!(result, Err(HypogramError::Schema(_))));

        // Same shape without the collision loads and round-trips
        let domain = DomainModel::from_json(
            r#"{"variables": [
                {"id": "sea_level", "directions": ["goes up", "falls"]},
                {"id": "sea_level_rise", "directions": ["increases", "decreases"]}
            ]}"#,
        )
        .unwrap();
        let h = Hypothesis::new(
            vec![Clause::new("sea_level", "goes up")],
            vec![Clause::new("sea_level_rise", "increases")],
        )
        .unwrap();
        let text = h.render(&domain).unwrap();
        assert_eq!(text, "if sea level goes up then sea level rise increases");
        assert_eq!(parse(&text, &domain).unwrap(), h);
    }

    #[test]
    fn test_multi_word_unknown_variable() {
        let domain = plants();
        match parse("if soil acidity goes up then growth rate increases", &domain) {
            Err(HypogramError::UnknownVariable { name, .. }) => assert_eq!(name, "soil acidity"),
            other => panic!("unexpected {:?}", other),
        }
    }
}

// =============================================================================
// Scoring
// =============================================================================

mod scoring_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_concrete_scenario() {
        let domain = scenario();

        let consistent = parse("if temperature increases then brightness increases", &domain).unwrap();
        assert_eq!(consistent.antecedent(), &[Clause::new("temperature", "increases")]);
        assert_eq!(consistent.consequent(), &[Clause::new("brightness", "increases")]);
        let good = evaluate(&consistent, &domain).unwrap();
        assert_eq!(good.groundedness, 1.0);

        let inconsistent = parse("if temperature increases then brightness decreases", &domain).unwrap();
        let bad = evaluate(&inconsistent, &domain).unwrap();
        assert_eq!(bad.groundedness, 0.0);
        assert!(bad.specificity < good.specificity);
        assert!(bad.aggregate < good.aggregate);
    }

    #[test]
    fn test_score_bounds() {
        let weight_sets = [
            ScoreWeights::default(),
            ScoreWeights {
                groundedness: 10.0,
                complexity: 0.0,
                specificity: 0.1,
                coverage: 3.0,
            },
            ScoreWeights {
                groundedness: -1.0,
                complexity: 0.0,
                specificity: 0.0,
                coverage: 0.0,
            },
        ];
        for domain in [temperature(), plants()] {
            for weights in weight_sets {
                let evaluator = Evaluator::new(EvaluatorConfig {
                    weights,
                    complexity_cap: 3,
                    polarity_penalty: 2.0,
                });
                for options in option_grid() {
                    for generated in generate_seeded(&domain, &options).unwrap() {
                        let score = evaluator.evaluate(&generated.hypothesis, &domain).unwrap();
                        for (name, value) in score.sub_scores() {
                            assert!((0.0..=1.0).contains(&value), "{} = {}", name, value);
                        }
                        assert!((0.0..=1.0).contains(&score.aggregate));
                    }
                }
            }
        }
    }

    #[test]
    fn test_forced_relation_is_grounded() {
        for domain in [temperature(), plants()] {
            for relation in domain.relations() {
                let cause = domain.lookup_variable(&relation.cause).unwrap();
                let effect = domain.lookup_variable(&relation.effect).unwrap();
                for (c, e) in relation.consistent_pairs(cause, effect) {
                    let h = Hypothesis::new(
                        vec![Clause::new(cause.id.clone(), c)],
                        vec![Clause::new(effect.id.clone(), e)],
                    )
                    .unwrap();
                    assert_eq!(evaluate(&h, &domain).unwrap().groundedness, 1.0);
                }
            }
        }
    }

    #[test]
    fn test_grounded_generation_always_grounded() {
        let domain = plants();
        let options = GeneratorOptions {
            count: 100,
            max_clauses_per_side: 3,
            grounded_bias: true,
            seed: Some(11),
            ..Default::default()
        };
        for generated in generate_seeded(&domain, &options).unwrap() {
            let score = evaluate(&generated.hypothesis, &domain).unwrap();
            assert_eq!(score.groundedness, 1.0, "{}", generated.text);
        }
    }
}

// =============================================================================
// Reproducibility
// =============================================================================

mod reproducibility_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(domain: &DomainModel, seed: u64) -> Vec<String> {
        let options = GeneratorOptions {
            count: 30,
            max_clauses_per_side: 2,
            grounded_bias: true,
            seed: Some(seed),
            ..Default::default()
        };
        generate_seeded(domain, &options)
            .unwrap()
            .into_iter()
            .map(|g| g.text)
            .collect()
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let domain = temperature();
        assert_eq!(texts(&domain, 99), texts(&domain, 99));
    }

    #[test]
    fn test_shared_domain_across_threads() {
        let domain = temperature();
        let expected = texts(&domain, 4);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| texts(&domain, 4)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
