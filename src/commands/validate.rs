//! @acp:module "Validate Command"
//! @acp:summary "Validate a domain specification file"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::domain::DomainModel;

/// Options for the validate command
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Domain file to validate
    pub file: PathBuf,
}

/// Execute the validate command
pub fn execute_validate(options: ValidateOptions) -> Result<()> {
    let domain = match DomainModel::from_path(&options.file) {
        Ok(domain) => domain,
        Err(e) => {
            eprintln!(
                "{} {} is not a valid domain",
                style("✗").red(),
                options.file.display()
            );
            return Err(e.into());
        }
    };

    println!(
        "{} {} is valid",
        style("✓").green(),
        options.file.display()
    );
    println!("  Variables: {}", domain.variables().len());
    println!("  Relations: {}", domain.relations().len());

    for variable in domain.variables() {
        let relations = domain.relations_of(&variable.id).len();
        if relations == 0 {
            println!(
                "  {} '{}' takes part in no relation",
                style("!").yellow(),
                variable.id
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_yaml_domain() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("domain.yaml");
        std::fs::write(
            &file,
            "variables:\n  - id: heat\n    directions: [rises, falls]\n  - id: light\n    directions: [rises, falls]\nrelations:\n  - cause: heat\n    effect: light\n    polarity: positive\n",
        )
        .unwrap();
        assert!(execute_validate(ValidateOptions { file }).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_relation() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("domain.json");
        std::fs::write(
            &file,
            r#"{"variables": [{"id": "heat", "directions": ["rises"]}],
                "relations": [{"cause": "heat", "effect": "light"}]}"#,
        )
        .unwrap();
        assert!(execute_validate(ValidateOptions { file }).is_err());
    }
}
