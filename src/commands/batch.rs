//! @acp:module "Batch Command"
//! @acp:summary "Evaluate a file of hypotheses in parallel"
//! @acp:domain cli
//! @acp:layer handler
//!
//! A failing line is reported and the batch continues; the command exits
//! non-zero when any line failed.

use std::path::PathBuf;

use anyhow::{bail, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use super::evaluate::EvaluationReport;
use crate::config::Config;
use crate::domain::DomainModel;
use crate::evaluate::Evaluator;
use crate::parse::Parser;

/// Options for the batch command
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// File with one hypothesis per line
    pub file: PathBuf,
    /// Domain specification file
    pub domain: PathBuf,
    /// Output as JSON
    pub json: bool,
    /// Weight preset overriding the configuration
    pub preset: Option<String>,
}

/// Outcome for a single input line
#[derive(Debug, Serialize)]
pub struct BatchItem {
    /// 1-based line number in the input file
    pub line: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<EvaluationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchError>,
}

#[derive(Debug, Serialize)]
pub struct BatchError {
    pub kind: &'static str,
    pub message: String,
}

/// Evaluate every non-blank line; order of the result follows the input
pub fn evaluate_lines(
    content: &str,
    domain: &DomainModel,
    evaluator: &Evaluator,
    progress: &ProgressBar,
) -> Vec<BatchItem> {
    let parser = Parser::new(domain);
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i + 1, l))
        .collect();

    lines
        .par_iter()
        .map(|&(line, text)| {
            let item = match EvaluationReport::build(text, &parser, evaluator, domain) {
                Ok(report) => BatchItem {
                    line,
                    text: text.trim().to_string(),
                    report: Some(report),
                    error: None,
                },
                Err(e) => BatchItem {
                    line,
                    text: text.trim().to_string(),
                    report: None,
                    error: Some(BatchError {
                        kind: e.kind(),
                        message: e.to_string(),
                    }),
                },
            };
            progress.inc(1);
            item
        })
        .collect()
}

/// Execute the batch command
pub fn execute_batch(options: BatchOptions, config: &Config) -> Result<()> {
    let domain = DomainModel::from_path(&options.domain)?;
    let content = std::fs::read_to_string(&options.file)?;
    let evaluator = Evaluator::new(config.scoring.evaluator_config(options.preset.as_deref()));

    let progress = ProgressBar::new(content.lines().filter(|l| !l.trim().is_empty()).count() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:30}] {pos}/{len} hypotheses")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let items = evaluate_lines(&content, &domain, &evaluator, &progress);
    progress.finish_and_clear();

    let failed = items.iter().filter(|i| i.error.is_some()).count();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in &items {
            match (&item.report, &item.error) {
                (Some(report), _) => println!(
                    "{} {:>4}  {:.3}  {}",
                    style("✓").green(),
                    item.line,
                    report.score.aggregate,
                    item.text
                ),
                (None, Some(error)) => println!(
                    "{} {:>4}  {}",
                    style("✗").red(),
                    item.line,
                    error.message
                ),
                (None, None) => {}
            }
        }
        println!(
            "\n{} evaluated, {} failed",
            items.len() - failed,
            failed
        );
    }

    if failed > 0 {
        bail!("{} of {} hypotheses could not be evaluated", failed, items.len());
    }

    Ok(())
}
