//! @acp:module "Evaluate Command"
//! @acp:summary "Parse one hypothesis and print its quality breakdown"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::config::Config;
use crate::domain::DomainModel;
use crate::evaluate::{diagnose, Evaluator, Feedback, QualityScore};
use crate::hypothesis::Hypothesis;
use crate::parse::Parser;

/// Options for the evaluate command
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    /// Hypothesis text
    pub hypothesis: String,
    /// Domain specification file
    pub domain: PathBuf,
    /// Output as JSON
    pub json: bool,
    /// Weight preset overriding the configuration
    pub preset: Option<String>,
}

/// Everything reported for one evaluated hypothesis
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub text: String,
    pub hypothesis: Hypothesis,
    pub score: QualityScore,
    pub feedback: Feedback,
    pub feedback_code: u8,
    pub message: &'static str,
}

impl EvaluationReport {
    /// Parse and score a hypothesis
    pub fn build(
        text: &str,
        parser: &Parser<'_>,
        evaluator: &Evaluator,
        domain: &DomainModel,
    ) -> crate::Result<Self> {
        let hypothesis = parser.parse(text)?;
        let score = evaluator.evaluate(&hypothesis, domain)?;
        let feedback = diagnose(&hypothesis);
        Ok(Self {
            text: text.trim().to_string(),
            hypothesis,
            score,
            feedback,
            feedback_code: feedback.code(),
            message: feedback.message(),
        })
    }

    /// Human-readable score breakdown
    pub fn print(&self) {
        println!("{}", style(&self.text).bold());
        println!(
            "  {:<14} {}",
            "aggregate",
            style(format!("{:.3}", self.score.aggregate)).cyan()
        );
        for (name, value) in self.score.sub_scores() {
            println!("  {:<14} {:.3}", name, value);
        }
        let marker = if self.feedback.is_appropriate() {
            style("✓").green()
        } else {
            style("!").yellow()
        };
        println!("  {} {}", marker, self.message);
    }
}

/// Execute the evaluate command
pub fn execute_evaluate(options: EvaluateOptions, config: &Config) -> Result<()> {
    let domain = DomainModel::from_path(&options.domain)?;
    let parser = Parser::new(&domain);
    let evaluator = Evaluator::new(config.scoring.evaluator_config(options.preset.as_deref()));

    let report = EvaluationReport::build(&options.hypothesis, &parser, &evaluator, &domain)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }

    Ok(())
}
