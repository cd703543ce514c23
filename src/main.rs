#![forbid(unsafe_code)]
//! Hypogram Command Line Interface

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use hypogram::commands::{
    execute_batch, execute_evaluate, execute_generate, execute_validate, BatchOptions,
    EvaluateOptions, GenerateOptions, ValidateOptions,
};
use hypogram::config::DEFAULT_CONFIG_FILE;
use hypogram::evaluate::preset_names;
use hypogram::Config;

#[derive(Parser)]
#[command(name = "hypogram")]
#[command(about = "Qualitative-reasoning grammar for scientific hypotheses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate hypotheses from a domain file
    Generate {
        /// Domain specification (JSON or YAML)
        domain: PathBuf,

        /// Number of hypotheses
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Output file (one hypothesis per line, stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed for reproducible output
        #[arg(long, env = "HYPOGRAM_SEED")]
        seed: Option<u64>,

        /// Maximum clauses per side
        #[arg(long)]
        max_clauses: Option<usize>,

        /// Anchor each hypothesis on a declared relation
        #[arg(long)]
        grounded: bool,

        /// Allow consequents to reuse antecedent variables
        #[arg(long)]
        overlap: bool,

        /// Drop repeated hypotheses
        #[arg(long)]
        dedup: bool,
    },

    /// Parse and score a single hypothesis
    Evaluate {
        /// Hypothesis text, e.g. "if temperature increases then brightness increases"
        hypothesis: String,

        /// Domain specification (JSON or YAML)
        domain: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Weight preset
        #[arg(long, value_parser = PossibleValuesParser::new(preset_names()))]
        preset: Option<String>,
    },

    /// Score every hypothesis in a file (one per line)
    Batch {
        /// File of hypotheses
        file: PathBuf,

        /// Domain specification (JSON or YAML)
        domain: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Weight preset
        #[arg(long, value_parser = PossibleValuesParser::new(preset_names()))]
        preset: Option<String>,
    },

    /// Validate a domain specification file
    Validate {
        /// Domain specification (JSON or YAML)
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config = if cli.config.exists() {
        match Config::load(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "{} Could not read {}: {}",
                    style("✗").red(),
                    cli.config.display(),
                    e
                );
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Generate {
            domain,
            count,
            output,
            seed,
            max_clauses,
            grounded,
            overlap,
            dedup,
        } => {
            let options = GenerateOptions {
                domain,
                count,
                output,
                seed,
                max_clauses,
                grounded,
                overlap,
                dedup,
            };
            execute_generate(options, &config)?;
        }

        Commands::Evaluate {
            hypothesis,
            domain,
            json,
            preset,
        } => {
            let options = EvaluateOptions {
                hypothesis,
                domain,
                json,
                preset,
            };
            execute_evaluate(options, &config)?;
        }

        Commands::Batch {
            file,
            domain,
            json,
            preset,
        } => {
            let options = BatchOptions {
                file,
                domain,
                json,
                preset,
            };
            execute_batch(options, &config)?;
        }

        Commands::Validate { file } => {
            let options = ValidateOptions { file };
            execute_validate(options)?;
        }
    }

    Ok(())
}
