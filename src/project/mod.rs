//! Project plan inputs that seed task generation.
//!
//! Both the plan and the optional work breakdown are produced elsewhere and
//! treated as read-only. Plan files may be YAML or JSON.

mod wbs;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::ports::FileSystem;

pub use wbs::{WbsNode, WorkBreakdown};

/// SMART goal framing attached to a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartCriteria {
    /// What is to be accomplished.
    #[serde(default)]
    pub specific: String,
    /// How success is measured.
    #[serde(default)]
    pub measurable: String,
    /// Why the goal is attainable.
    #[serde(default)]
    pub achievable: String,
    /// How the goal connects to broader objectives.
    #[serde(default)]
    pub relevant: String,
    /// Deadline and milestones.
    #[serde(default)]
    pub time_bound: String,
}

/// A structured description of the project to decompose.
///
/// Only `name` and `description` are required; they are checked by
/// [`ProjectPlan::validate`] rather than by the decoder so that a missing
/// field surfaces as an [`InputError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPlan {
    /// Project name.
    #[serde(default)]
    pub name: String,
    /// What the project is.
    #[serde(default)]
    pub description: String,
    /// Goals the project must meet.
    #[serde(default)]
    pub goals: Vec<String>,
    /// Scope statement.
    #[serde(default)]
    pub scope: Option<String>,
    /// SMART framing of the main goal.
    #[serde(default)]
    pub smart_criteria: Option<SmartCriteria>,
    /// External prerequisites of the project.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// People, tools and budget the project needs.
    #[serde(default)]
    pub resources_required: Vec<String>,
}

impl ProjectPlan {
    /// Creates a plan with just the required fields.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into(), ..Self::default() }
    }

    /// Checks that the required fields carry content.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingField`] for a blank `name` or `description`.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.name.trim().is_empty() {
            return Err(InputError::MissingField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(InputError::MissingField("description"));
        }
        Ok(())
    }

    /// Loads and validates a plan file through the filesystem port.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Unreadable`], [`InputError::Malformed`] or
    /// [`InputError::MissingField`].
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, InputError> {
        let plan: ProjectPlan = load_document(fs, path)?;
        plan.validate()?;
        Ok(plan)
    }
}

/// Reads a YAML or JSON document through the filesystem port.
pub(crate) fn load_document<T: serde::de::DeserializeOwned>(
    fs: &dyn FileSystem,
    path: &Path,
) -> Result<T, InputError> {
    let content = fs.read_to_string(path).map_err(|e| InputError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    // YAML is a superset of JSON, so one decoder covers both formats.
    serde_yaml::from_str(&content)
        .map_err(|e| InputError::Malformed { path: path.to_path_buf(), message: e.to_string() })
}
