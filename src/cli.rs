//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `techtasks`.
#[derive(Debug, Parser)]
#[command(
    name = "techtasks",
    version,
    about = "Turn a project plan into a validated technical task list"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a task list from a project plan and write JSON, audit and Markdown files.
    Generate(GenerateArgs),
    /// Print the prompts that would be sent for a plan, without calling the model.
    Prompt(PlanArgs),
    /// Render a structured task list file as Markdown.
    Render {
        /// Structured task list (`*.json`).
        #[arg(long)]
        input: PathBuf,
        /// Markdown destination; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate a structured task list file and print its build order.
    Check {
        /// Structured task list (`*.json`).
        #[arg(long)]
        input: PathBuf,
    },
}

/// Plan inputs shared by `generate` and `prompt`.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Project plan file (YAML or JSON).
    #[arg(long)]
    pub plan: PathBuf,
    /// Optional work breakdown structure file (YAML or JSON).
    #[arg(long)]
    pub wbs: Option<PathBuf>,
}

/// Arguments of `generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Plan inputs.
    #[command(flatten)]
    pub plan: PlanArgs,
    /// Directory the artifacts are written to.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
    /// File stem of the artifacts.
    #[arg(long, default_value = crate::generate::output::DEFAULT_STEM)]
    pub stem: String,
    /// Model identifier; overrides `TECHTASKS_MODEL`.
    #[arg(long)]
    pub model: Option<String>,
    /// Completion token budget; overrides `TECHTASKS_MAX_TOKENS`.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_tokens: Option<u32>,
}
