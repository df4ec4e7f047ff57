//! Command dispatch and handlers.

pub mod check;
pub mod generate;
pub mod prompt;
pub mod render;

use tracing::info;

use crate::adapters::replaying::ReplayingLlmClient;
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `TECHTASKS_REPLAY_LLM` names a cassette, completions are served from
/// it instead of the live API. When `TECHTASKS_RECORD` is set to a
/// directory, all port interactions are recorded to per-port cassette files
/// in a timestamped directory under it.
///
/// # Errors
///
/// Returns an error string if settings are invalid, a cassette cannot be
/// loaded or written, or the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let settings = Settings::from_env().map_err(|e| e.to_string())?;

    let mut ctx = ServiceContext::live(&settings);
    if let Some(path) = &settings.replay_llm {
        info!(cassette = %path.display(), "replaying LLM completions");
        let replayer = CassetteConfig::load_port_cassette(path)?;
        ctx = ctx.with_llm(Box::new(ReplayingLlmClient::new(replayer)));
    }

    let session = match &settings.record_dir {
        Some(dir) => {
            let session = RecordingSession::in_dir(dir)?;
            ctx = ServiceContext::recording(ctx, &session);
            Some(session)
        }
        None => None,
    };

    let result = dispatch_with_context(command, &ctx, &settings);

    // Finish recording after the command completes, even on error.
    if let Some(session) = session {
        // Release the adapters' recorder references first.
        drop(ctx);
        let output_dir = session.finish()?;
        eprintln!("Recording saved to: {}", output_dir.display());
    }

    result
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    settings: &Settings,
) -> Result<(), String> {
    match command {
        Command::Generate(args) => generate::run(ctx, settings, args),
        Command::Prompt(args) => prompt::run(ctx, args),
        Command::Render { input, output } => render::run(ctx, input, output.as_deref()),
        Command::Check { input } => check::run(ctx, input),
    }
}
