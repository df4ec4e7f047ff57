//! Technical task list generation.
//!
//! A project plan goes in; a validated, language-agnostic list of
//! development tasks comes out, as JSON and as Markdown. The model is
//! reached through the [`ports::LlmClient`] port so the pipeline can run
//! live, recorded or replayed.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod generate;
pub mod parse;
pub mod ports;
pub mod project;
pub mod prompt;
pub mod task;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
