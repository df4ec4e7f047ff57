//! `techtasks check` command.

use std::path::Path;

use super::render::load_task_list;
use crate::context::ServiceContext;
use crate::task::TaskList;

/// Execute the `check` command: validate a task list file and print a summary.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or violates a task
/// list invariant.
pub fn run(ctx: &ServiceContext, input: &Path) -> Result<(), String> {
    let list = load_task_list(ctx, input)?;
    print!("{}", summary(&list));
    Ok(())
}

fn summary(list: &TaskList) -> String {
    let mut out = format!("OK: {} tasks for {}\n", list.len(), list.project_name());
    if !list.is_empty() {
        out.push_str("Build order: ");
        out.push_str(&list.topological_order().join(" -> "));
        out.push('\n');
    }
    out
}
