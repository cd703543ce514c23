//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};

use crate::evaluate::{get_preset_weights, EvaluatorConfig, ScoreWeights};
use crate::generate::GeneratorOptions;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".hypogram.config.json";

fn default_version() -> String {
    "1.0.0".to_string()
}

/// @acp:summary "Main configuration structure"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Hypothesis generation defaults
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Quality scoring policy
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            generation: GenerationConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// @acp:summary "Generation defaults (overridable from the command line)"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Upper bound of clauses in each group
    #[serde(default = "default_max_clauses", rename = "maxClausesPerSide")]
    pub max_clauses_per_side: usize,

    /// Let consequents reuse antecedent variables
    #[serde(default, rename = "allowOverlap")]
    pub allow_overlap: bool,

    /// Anchor hypotheses on declared relations
    #[serde(default, rename = "groundedBias")]
    pub grounded_bias: bool,

    /// Drop repeated hypotheses
    #[serde(default)]
    pub dedup: bool,
}

fn default_max_clauses() -> usize {
    2
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_clauses_per_side: default_max_clauses(),
            allow_overlap: false,
            grounded_bias: false,
            dedup: false,
        }
    }
}

impl GenerationConfig {
    /// Generator options for a run of `count` hypotheses
    pub fn options(&self, count: usize, seed: Option<u64>) -> GeneratorOptions {
        GeneratorOptions {
            count,
            max_clauses_per_side: self.max_clauses_per_side,
            grounded_bias: self.grounded_bias,
            allow_overlap: self.allow_overlap,
            dedup: self.dedup,
            seed,
        }
    }
}

/// @acp:summary "Quality scoring policy"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Named weight preset (balanced, grounded, exploratory)
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Explicit weights; override the preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoreWeights>,

    /// Distinct-variable count at which complexity saturates
    #[serde(default = "default_complexity_cap", rename = "complexityCap")]
    pub complexity_cap: usize,

    /// Fraction of specificity removed for polarity-inconsistent hypotheses
    #[serde(default = "default_polarity_penalty", rename = "polarityPenalty")]
    pub polarity_penalty: f64,
}

fn default_preset() -> String {
    "balanced".to_string()
}

fn default_complexity_cap() -> usize {
    4
}

fn default_polarity_penalty() -> f64 {
    0.5
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            weights: None,
            complexity_cap: default_complexity_cap(),
            polarity_penalty: default_polarity_penalty(),
        }
    }
}

impl ScoringConfig {
    /// Resolve into an evaluator policy, optionally forcing a preset
    pub fn evaluator_config(&self, preset_override: Option<&str>) -> EvaluatorConfig {
        let weights = match (preset_override, self.weights) {
            (Some(preset), _) => get_preset_weights(preset),
            (None, Some(weights)) => weights,
            (None, None) => get_preset_weights(&self.preset),
        };
        EvaluatorConfig {
            weights,
            complexity_cap: self.complexity_cap,
            polarity_penalty: self.polarity_penalty,
        }
    }
}
