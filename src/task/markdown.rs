//! Human-readable Markdown rendering of a task list.
//!
//! One-way: the output is for people and is never parsed back. Model text
//! is escaped so it cannot open headings of its own; each task owns exactly
//! one `## Task` heading.

use std::fmt::Write as _;

use super::list::TaskList;
use super::record::TaskRecord;

/// Renders the whole list: header, then one `## Task N` section per task.
///
/// Tasks appear in list order with their own identifiers; nothing is
/// renumbered except the section ordinal.
#[must_use]
pub fn render(list: &TaskList) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Technical Task List: {}", inline(list.project_name()));
    out.push('\n');
    if !list.project_description().is_empty() {
        let _ = writeln!(out, "{}", block(list.project_description()));
        out.push('\n');
    }
    let _ = writeln!(out, "**Total Tasks:** {}", list.len());
    out.push('\n');
    out.push_str("---\n\n");

    for (i, task) in list.tasks().iter().enumerate() {
        render_task(&mut out, i + 1, task);
        out.push_str("---\n\n");
    }

    out
}

fn render_task(out: &mut String, ordinal: usize, task: &TaskRecord) {
    let _ = writeln!(out, "## Task {ordinal}: {}", inline(&task.title));
    out.push('\n');
    let _ = writeln!(out, "**ID:** {}", inline(&task.id));
    let _ = writeln!(out, "**Priority:** {}", task.priority);
    let _ = writeln!(out, "**Estimated Effort:** {}", task.estimated_effort);
    if !task.tags.is_empty() {
        let tags: Vec<&str> = task.tags.iter().map(String::as_str).collect();
        let _ = writeln!(out, "**Tags:** {}", tags.join(", "));
    }
    out.push('\n');

    out.push_str("### Description\n\n");
    let _ = writeln!(out, "{}", block(&task.description));
    out.push('\n');

    if !task.dependencies.is_empty() {
        out.push_str("### Dependencies\n\n");
        for dep in &task.dependencies {
            let _ = writeln!(out, "- Task {}", inline(dep));
        }
        out.push('\n');
    }

    out.push_str("### Acceptance Criteria\n\n");
    for (j, criterion) in task.acceptance_criteria.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", j + 1, inline(criterion));
    }
    out.push('\n');

    if !task.examples.is_empty() {
        out.push_str("### Examples\n\n");
        for example in &task.examples {
            let _ = writeln!(out, "#### {}", inline(&example.title));
            out.push('\n');
            let _ = writeln!(out, "{}", block(&example.description));
            out.push('\n');
        }
    }

    if let Some(notes) = &task.notes {
        out.push_str("### Notes\n\n");
        let _ = writeln!(out, "{}", block(notes));
        out.push('\n');
    }
}

/// Folds text onto one line for headings and list items.
fn inline(text: &str) -> String {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect::<Vec<_>>().join(" ")
}

/// Multi-line prose with heading markers escaped.
fn block(text: &str) -> String {
    text.lines()
        .map(|line| {
            let body = line.trim_start();
            if body.starts_with('#') {
                format!("\\{body}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
