//! Prompt construction for task decomposition.
//!
//! Pure functions: a plan (and optional breakdown) in, prompt text out.

use std::fmt::Write as _;

use crate::error::InputError;
use crate::project::{ProjectPlan, WorkBreakdown};
use crate::task::{Effort, Priority};

/// Standing instructions for the model.
///
/// The vocabulary lines for effort and priority are appended by
/// [`system_prompt`] from the enums themselves so they cannot drift from
/// what the parser accepts.
const SYSTEM_INSTRUCTIONS: &str = "\
You are a senior software architect. Break the project plan you are given into \
an ordered list of technical tasks that a developer can follow to build it.

Rules:
1. Stay agnostic of programming language, framework and library. Describe WHAT \
must be built and the behavior it must have, never WHICH technology to use.
2. Order tasks in natural build sequence: data model first, then business logic, \
then interfaces (APIs, contracts), then user interface, then integrations.
3. Each task must be independently testable and small enough to finish within \
its effort estimate.
4. Dependencies may only reference ids of other tasks in the same list, and must \
never form a cycle.

Every task must have all of these fields:
- id: unique identifier of the form task-001, task-002, ...
- title: 3-8 words naming what is built
- description: what is built, why, the business rules involved and how it fits \
the overall system
- acceptance_criteria: 3-5 specific, testable conditions (strings)
- examples: 2-4 objects with a title and a description of a concrete scenario, \
including edge cases
- dependencies: ids of tasks that must be finished first (may be empty)
- estimated_effort: one of the effort values below
- priority: one of the priority values below
- tags: short lowercase labels such as data-model, business-logic, api, ui, \
validation, security, integration
- notes: implementation considerations, risks or references to the plan

Respond with exactly one JSON object and nothing else, shaped like:
{\"tasks\": [{\"id\": \"task-001\", \"title\": \"...\", \"description\": \"...\", \
\"acceptance_criteria\": [\"...\"], \
\"examples\": [{\"title\": \"...\", \"description\": \"...\"}], \
\"dependencies\": [], \"estimated_effort\": \"Medium\", \"priority\": \"High\", \
\"tags\": [\"...\"], \"notes\": \"...\"}]}";

/// The two prompt parts sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Standing instructions.
    pub system: String,
    /// The project-specific request.
    pub user: String,
}

/// Returns the full system prompt, including the enum vocabularies.
#[must_use]
pub fn system_prompt() -> String {
    let efforts: Vec<&str> = Effort::ALL.iter().map(|e| e.label()).collect();
    let priorities: Vec<&str> = Priority::ALL.iter().map(|p| p.label()).collect();
    format!(
        "{SYSTEM_INSTRUCTIONS}\n\n\
         Allowed estimated_effort values: {} \
         (Small: 1-4 hours, Medium: 4-16 hours, Large: 16+ hours, X-Large: multiple days).\n\
         Allowed priority values: {}.",
        efforts.join(", "),
        priorities.join(", "),
    )
}

/// Builds the prompt for `plan`, folding in `wbs` when given.
///
/// # Errors
///
/// Returns [`InputError::MissingField`] if the plan has no name or description.
pub fn build(plan: &ProjectPlan, wbs: Option<&WorkBreakdown>) -> Result<Prompt, InputError> {
    plan.validate()?;
    Ok(Prompt { system: system_prompt(), user: user_prompt(plan, wbs) })
}

fn user_prompt(plan: &ProjectPlan, wbs: Option<&WorkBreakdown>) -> String {
    let mut out = String::new();

    out.push_str("Generate the technical task list for the following project.\n\n");
    let _ = writeln!(out, "**Project Name:** {}", plan.name);
    let _ = writeln!(out, "**Project Description:** {}", plan.description);

    if !plan.goals.is_empty() {
        out.push_str("\n**Goals:**\n");
        for goal in &plan.goals {
            let _ = writeln!(out, "- {goal}");
        }
    }

    if let Some(scope) = plan.scope.as_deref().filter(|s| !s.trim().is_empty()) {
        let _ = writeln!(out, "\n**Scope:** {scope}");
    }

    if let Some(smart) = &plan.smart_criteria {
        out.push_str("\n**Project Requirements:**\n");
        for (label, value) in [
            ("Specific", &smart.specific),
            ("Measurable", &smart.measurable),
            ("Achievable", &smart.achievable),
            ("Relevant", &smart.relevant),
            ("Time-bound", &smart.time_bound),
        ] {
            let value = if value.trim().is_empty() { "N/A" } else { value.as_str() };
            let _ = writeln!(out, "- {label}: {value}");
        }
    }

    if !plan.dependencies.is_empty() {
        out.push_str("\n**Project Dependencies:**\n");
        for dep in &plan.dependencies {
            let _ = writeln!(out, "- {dep}");
        }
    }

    if !plan.resources_required.is_empty() {
        out.push_str("\n**Resources Required:**\n");
        for resource in &plan.resources_required {
            let _ = writeln!(out, "- {resource}");
        }
    }

    if let Some(wbs) = wbs {
        let outline = wbs.outline();
        if !outline.is_empty() {
            out.push_str("\n**Work Breakdown Structure** (use it to order the tasks):\n");
            out.push_str(&outline);
        }
    }

    out.push_str(
        "\nProduce a detailed, sequential task list that guides developers through \
         building this application, following the rules in your instructions.",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{SmartCriteria, WbsNode};

    fn coffee_plan() -> ProjectPlan {
        ProjectPlan {
            goals: vec!["Skip the queue".into(), "Pay in the app".into()],
            smart_criteria: Some(SmartCriteria {
                specific: "Mobile ordering for one shop".into(),
                ..SmartCriteria::default()
            }),
            resources_required: vec!["One barista tablet".into()],
            ..ProjectPlan::new("Coffee App", "Order coffee ahead of time.")
        }
    }

    #[test]
    fn system_prompt_states_the_constraints() {
        let system = system_prompt();
        assert!(system.contains("agnostic of programming language"));
        assert!(system.contains("data model first, then business logic"));
        assert!(system.contains("Small, Medium, Large, X-Large"));
        assert!(system.contains("High, Medium, Low"));
        for field in [
            "id:",
            "title:",
            "description:",
            "acceptance_criteria:",
            "examples:",
            "dependencies:",
            "estimated_effort:",
            "priority:",
            "tags:",
            "notes:",
        ] {
            assert!(system.contains(field), "system prompt should request {field}");
        }
        assert!(system.contains("exactly one JSON object"));
    }

    #[test]
    fn user_prompt_carries_plan_details() {
        let prompt = build(&coffee_plan(), None).unwrap();
        assert!(prompt.user.contains("**Project Name:** Coffee App"));
        assert!(prompt.user.contains("- Skip the queue"));
        assert!(prompt.user.contains("- Specific: Mobile ordering for one shop"));
        assert!(prompt.user.contains("- Measurable: N/A"));
        assert!(prompt.user.contains("- One barista tablet"));
        assert!(!prompt.user.contains("Work Breakdown Structure"));
        assert!(!prompt.user.contains("**Scope:**"));
    }

    #[test]
    fn user_prompt_includes_wbs_outline() {
        let wbs = WorkBreakdown {
            title: None,
            phases: vec![WbsNode {
                title: "Foundation".into(),
                description: None,
                children: vec![],
            }],
        };
        let prompt = build(&coffee_plan(), Some(&wbs)).unwrap();
        assert!(prompt.user.contains("**Work Breakdown Structure**"));
        assert!(prompt.user.contains("- Foundation\n"));
    }

    #[test]
    fn building_is_deterministic() {
        let plan = coffee_plan();
        assert_eq!(build(&plan, None).unwrap(), build(&plan, None).unwrap());
    }

    #[test]
    fn missing_name_fails_before_anything_else() {
        let plan = ProjectPlan::new("", "Something");
        assert!(matches!(build(&plan, None), Err(InputError::MissingField("name"))));
    }
}
