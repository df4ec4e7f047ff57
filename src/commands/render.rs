//! `techtasks render` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::task::{markdown, TaskList};

/// Execute the `render` command.
///
/// Decodes a structured task list (which re-runs every validation) and
/// writes its Markdown form to `output`, or prints it.
///
/// # Errors
///
/// Returns an error string if the input cannot be read or decoded, or the
/// output cannot be written.
pub fn run(ctx: &ServiceContext, input: &Path, output: Option<&Path>) -> Result<(), String> {
    let list = load_task_list(ctx, input)?;
    let md = markdown::render(&list);

    match output {
        Some(path) => {
            ctx.fs
                .write(path, &md)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            println!("Wrote {} tasks to {}", list.len(), path.display());
        }
        None => print!("{md}"),
    }
    Ok(())
}

/// Reads and decodes a structured task list file.
pub(crate) fn load_task_list(ctx: &ServiceContext, input: &Path) -> Result<TaskList, String> {
    let text = ctx
        .fs
        .read_to_string(input)
        .map_err(|e| format!("Failed to read {}: {e}", input.display()))?;
    TaskList::from_json(&text).map_err(|e| format!("{}: {e}", input.display()))
}
