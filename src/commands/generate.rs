//! @acp:module "Generate Command"
//! @acp:summary "Generate hypotheses from a domain file"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `hypogram generate`: one hypothesis per line, in generation order.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::domain::DomainModel;
use crate::generate::{generate_seeded, Generated};

/// Options for the generate command
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Domain specification file
    pub domain: PathBuf,
    /// Number of hypotheses to generate
    pub count: usize,
    /// Output file (stdout when None)
    pub output: Option<PathBuf>,
    /// Random seed for reproducible runs
    pub seed: Option<u64>,
    /// Override of the configured clause bound per side
    pub max_clauses: Option<usize>,
    /// Anchor hypotheses on declared relations
    pub grounded: bool,
    /// Let consequents reuse antecedent variables
    pub overlap: bool,
    /// Drop repeated hypotheses
    pub dedup: bool,
}

/// Execute the generate command
pub fn execute_generate(options: GenerateOptions, config: &Config) -> Result<()> {
    let domain = DomainModel::from_path(&options.domain)?;

    let mut generation = config.generation.clone();
    if let Some(max) = options.max_clauses {
        generation.max_clauses_per_side = max;
    }
    generation.grounded_bias |= options.grounded;
    generation.allow_overlap |= options.overlap;
    generation.dedup |= options.dedup;

    let generated = generate_seeded(&domain, &generation.options(options.count, options.seed))?;
    tracing::info!("Generated {} hypotheses", generated.len());

    match &options.output {
        Some(path) => {
            std::fs::write(path, render_lines(&generated))?;
            eprintln!(
                "{} Wrote {} hypotheses to {}",
                style("✓").green(),
                generated.len(),
                path.display()
            );
        }
        None => print!("{}", render_lines(&generated)),
    }

    Ok(())
}

/// One hypothesis per line
pub fn render_lines(generated: &[Generated]) -> String {
    generated
        .iter()
        .map(|g| format!("{}\n", g.text))
        .collect()
}
