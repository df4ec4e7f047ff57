//! `techtasks prompt` command.

use crate::cli::PlanArgs;
use crate::context::ServiceContext;
use crate::project::{ProjectPlan, WorkBreakdown};
use crate::prompt;

/// Execute the `prompt` command: print both prompts without calling the model.
///
/// # Errors
///
/// Returns an error string if an input cannot be loaded or the plan is
/// incomplete.
pub fn run(ctx: &ServiceContext, args: &PlanArgs) -> Result<(), String> {
    let plan = ProjectPlan::load(ctx.fs.as_ref(), &args.plan).map_err(|e| e.to_string())?;
    let wbs = args
        .wbs
        .as_deref()
        .map(|path| WorkBreakdown::load(ctx.fs.as_ref(), path))
        .transpose()
        .map_err(|e| e.to_string())?;

    let prompt = prompt::build(&plan, wbs.as_ref()).map_err(|e| e.to_string())?;
    println!("=== System prompt ===\n{}\n", prompt.system);
    println!("=== User prompt ===\n{}", prompt.user);
    Ok(())
}
