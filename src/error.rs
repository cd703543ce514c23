//! @acp:module "Errors"
//! @acp:summary "Error taxonomy for domain loading, parsing, generation and scoring"
//! @acp:domain grammar
//! @acp:layer model

use thiserror::Error;

/// Errors raised by the grammar engine
#[derive(Debug, Error)]
pub enum HypogramError {
    /// Malformed domain specification
    #[error("Schema error: {0}")]
    Schema(String),

    /// Text does not match the hypothesis template
    #[error("Grammar error in '{text}': {reason}")]
    Grammar { text: String, reason: String },

    /// A clause names a variable the domain does not declare
    #[error("Unknown variable '{name}' in '{context}'")]
    UnknownVariable { name: String, context: String },

    /// A clause uses a direction outside the variable's allowed set
    #[error("Invalid direction '{direction}' for variable '{variable}' (expected one of: {})", .allowed.join(", "))]
    InvalidDirection {
        variable: String,
        direction: String,
        allowed: Vec<String>,
    },

    /// The domain is too small for the requested hypothesis shape
    #[error("Insufficient variables: domain has {available}, generation needs at least {required}")]
    InsufficientVariables { available: usize, required: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}

impl HypogramError {
    /// Build a grammar error for the given input text
    pub fn grammar(text: impl Into<String>, reason: impl Into<String>) -> Self {
        HypogramError::Grammar {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            HypogramError::Schema(_) => "schema",
            HypogramError::Grammar { .. } => "grammar",
            HypogramError::UnknownVariable { .. } => "unknown-variable",
            HypogramError::InvalidDirection { .. } => "invalid-direction",
            HypogramError::InsufficientVariables { .. } => "insufficient-variables",
            HypogramError::Io(_) => "io",
            HypogramError::Json(_) => "json",
            HypogramError::Yaml(_) => "yaml",
            HypogramError::Other(_) => "other",
        }
    }
}

pub type Result<T> = std::result::Result<T, HypogramError>;
