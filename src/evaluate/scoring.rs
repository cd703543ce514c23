//! @acp:module "Score Weights"
//! @acp:summary "Weighted aggregation of quality sub-scores and named presets"
//! @acp:domain grammar
//! @acp:layer logic

use serde::{Deserialize, Serialize};

/// Relative weight of each sub-score in the aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_weight")]
    pub groundedness: f64,
    #[serde(default = "default_weight")]
    pub complexity: f64,
    #[serde(default = "default_weight")]
    pub specificity: f64,
    #[serde(default = "default_weight")]
    pub coverage: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            groundedness: 1.0,
            complexity: 1.0,
            specificity: 1.0,
            coverage: 1.0,
        }
    }
}

impl ScoreWeights {
    /// Weighted mean of sub-scores, always within [0, 1]
    ///
    /// Negative or non-finite weights count as zero; if no weight remains the
    /// aggregate is 0.
    pub fn combine(&self, groundedness: f64, complexity: f64, specificity: f64, coverage: f64) -> f64 {
        let parts = [
            (self.groundedness, groundedness),
            (self.complexity, complexity),
            (self.specificity, specificity),
            (self.coverage, coverage),
        ];

        let mut total = 0.0;
        let mut weighted = 0.0;
        for (weight, score) in parts {
            let weight = sanitize(weight);
            total += weight;
            weighted += weight * score.clamp(0.0, 1.0);
        }

        if total > 0.0 {
            (weighted / total).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

fn sanitize(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Get weights for a named preset
pub fn get_preset_weights(preset: &str) -> ScoreWeights {
    match preset {
        "grounded" => ScoreWeights {
            groundedness: 2.0,
            complexity: 0.5,
            specificity: 1.5,
            coverage: 0.5,
        },
        "exploratory" => ScoreWeights {
            groundedness: 0.8,
            complexity: 1.5,
            specificity: 0.8,
            coverage: 1.5,
        },
        "balanced" => ScoreWeights::default(),
        unknown => {
            tracing::warn!("Unknown scoring preset '{}', using balanced weights", unknown);
            ScoreWeights::default()
        }
    }
}

/// Get list of available presets with their descriptions
pub fn list_presets() -> Vec<(&'static str, &'static str, ScoreWeights)> {
    vec![
        ("balanced", "Arithmetic mean of all sub-scores", get_preset_weights("balanced")),
        ("grounded", "Rewards hypotheses backed by declared relations", get_preset_weights("grounded")),
        ("exploratory", "Rewards hypotheses spanning many variables and relations", get_preset_weights("exploratory")),
    ]
}

/// Names accepted by [`get_preset_weights`]
pub fn preset_names() -> Vec<&'static str> {
    list_presets().into_iter().map(|(name, _, _)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_weights_is_mean() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.combine(1.0, 0.5, 1.0, 0.5), 0.75);
    }

    #[test]
    fn test_weighted_combination() {
        let weights = ScoreWeights {
            groundedness: 3.0,
            complexity: 1.0,
            specificity: 0.0,
            coverage: 0.0,
        };
        // (3*1 + 1*0) / 4
        assert_eq!(weights.combine(1.0, 0.0, 0.3, 0.9), 0.75);
    }

    #[test]
    fn test_degenerate_weights() {
        let zero = ScoreWeights {
            groundedness: 0.0,
            complexity: -2.0,
            specificity: f64::NAN,
            coverage: 0.0,
        };
        assert_eq!(zero.combine(1.0, 1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_preset_weights() {
        let grounded = get_preset_weights("grounded");
        assert!(grounded.groundedness > grounded.complexity);

        let exploratory = get_preset_weights("exploratory");
        assert!(exploratory.coverage > exploratory.groundedness);

        assert_eq!(get_preset_weights("unknown"), ScoreWeights::default());
        assert_eq!(preset_names(), vec!["balanced", "grounded", "exploratory"]);
    }
}
