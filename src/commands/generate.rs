//! `techtasks generate` command.

use crate::cli::GenerateArgs;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::generate::output::write_outputs;
use crate::generate::{GeneratorConfig, TaskGenerator};
use crate::project::{ProjectPlan, WorkBreakdown};

/// Execute the `generate` command.
///
/// Loads the plan (and breakdown), runs one generation on a
/// single-threaded runtime and writes the three artifacts.
///
/// # Errors
///
/// Returns an error string if an input cannot be loaded, generation fails
/// or an artifact cannot be written.
pub fn run(ctx: &ServiceContext, settings: &Settings, args: &GenerateArgs) -> Result<(), String> {
    let plan = ProjectPlan::load(ctx.fs.as_ref(), &args.plan.plan).map_err(|e| e.to_string())?;
    let wbs = args
        .plan
        .wbs
        .as_deref()
        .map(|path| WorkBreakdown::load(ctx.fs.as_ref(), path))
        .transpose()
        .map_err(|e| e.to_string())?;

    let mut config = GeneratorConfig::from(settings);
    if let Some(model) = &args.model {
        config.model.clone_from(model);
    }
    if let Some(max_tokens) = args.max_tokens {
        config.max_tokens = max_tokens;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    let generator = TaskGenerator::new(ctx, config);
    let generation = runtime
        .block_on(generator.generate(&plan, wbs.as_ref()))
        .map_err(|e| format!("Generation failed ({}): {e}", e.category()))?;

    let paths = write_outputs(ctx.fs.as_ref(), &args.out_dir, &args.stem, &generation)
        .map_err(|e| e.to_string())?;

    println!(
        "Generated {} tasks for {} in {:.1}s",
        generation.task_list.len(),
        generation.task_list.project_name(),
        generation.metadata.duration_secs
    );
    for path in [&paths.json, &paths.raw, &paths.markdown] {
        println!("  {}", path.display());
    }
    Ok(())
}
