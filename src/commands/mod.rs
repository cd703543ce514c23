//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod batch;
pub mod evaluate;
pub mod generate;
pub mod validate;

pub use batch::{evaluate_lines, execute_batch, BatchItem, BatchOptions};
pub use evaluate::{execute_evaluate, EvaluateOptions, EvaluationReport};
pub use generate::{execute_generate, render_lines, GenerateOptions};
pub use validate::{execute_validate, ValidateOptions};
