//! The task record type and its enumerated fields.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Rough size of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effort {
    /// 1-4 hours.
    Small,
    /// 4-16 hours.
    Medium,
    /// 16+ hours.
    Large,
    /// Multiple days.
    #[serde(rename = "X-Large")]
    XLarge,
}

impl Effort {
    /// Every variant, smallest first.
    pub const ALL: [Effort; 4] = [Effort::Small, Effort::Medium, Effort::Large, Effort::XLarge];

    /// Canonical label, as written to JSON and Markdown.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Effort::Small => "Small",
            Effort::Medium => "Medium",
            Effort::Large => "Large",
            Effort::XLarge => "X-Large",
        }
    }

    /// Matches `s` case-insensitively against the canonical labels.
    ///
    /// Only surrounding whitespace is forgiven; `"xlarge"` is rejected.
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|e| e.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How urgently a task should be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Blocks other work or is critical to the product.
    High,
    /// Normal.
    Medium,
    /// Can be deferred.
    Low,
}

impl Priority {
    /// Every variant, most urgent first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Canonical label, as written to JSON and Markdown.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Matches `s` case-insensitively against the canonical labels.
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|p| p.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An illustrative scenario attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskExample {
    /// Short label for the scenario.
    pub title: String,
    /// What happens in the scenario.
    pub description: String,
}

/// One language- and framework-agnostic unit of development work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Identifier, unique within its list (e.g. `task-003`).
    pub id: String,
    /// What needs to be built, in a few words.
    pub title: String,
    /// Context, purpose and requirements.
    pub description: String,
    /// Testable conditions for completion, in order.
    pub acceptance_criteria: Vec<String>,
    /// Scenarios illustrating expected behavior.
    #[serde(default)]
    pub examples: Vec<TaskExample>,
    /// Identifiers of tasks that must be finished first.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Size estimate.
    pub estimated_effort: Effort,
    /// Urgency.
    pub priority: Priority,
    /// Free-text labels such as `backend` or `data-model`.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Implementation tips and caveats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
