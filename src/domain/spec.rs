//! @acp:module "Domain Specification"
//! @acp:summary "Serialized domain document (JSON or YAML)"
//! @acp:domain grammar
//! @acp:layer model

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HypogramError, Result};

/// Expected correlation between the two ends of a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Both variables move the same way
    Positive,
    /// The variables move in opposite directions
    Negative,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Root of a domain document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainSpec {
    pub variables: Vec<VariableSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<RelationSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableSpec {
    pub id: String,

    /// Defaults to the id with underscores as spaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub directions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationSpec {
    pub cause: String,
    pub effect: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<Polarity>,

    /// Explicit (cause direction, effect direction) pairs; take precedence over polarity
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directions: Vec<(String, String)>,
}

impl DomainSpec {
    /// Parse a JSON domain document
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| HypogramError::Schema(format!("Invalid domain document: {}", e)))
    }

    /// Parse a YAML domain document
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| HypogramError::Schema(format!("Invalid domain document: {}", e)))
    }

    /// Read a domain document, choosing the format by file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }
}
