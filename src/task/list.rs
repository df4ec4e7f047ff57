//! The validated task list and its structured (JSON) encoding.

use serde::{Deserialize, Serialize};

use super::graph;
use super::record::TaskRecord;
use crate::error::{DecodeError, ValidationError};

/// An ordered, validated decomposition of one project into tasks.
///
/// Fields are private: the only ways to obtain a `TaskList` are
/// [`TaskList::new`] and decoding, and both enforce every list invariant.
/// Order is reading order and is never changed after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTaskList")]
pub struct TaskList {
    project_name: String,
    project_description: String,
    tasks: Vec<TaskRecord>,
}

/// Wire shape used while decoding, before validation.
#[derive(Deserialize)]
struct RawTaskList {
    project_name: String,
    project_description: String,
    tasks: Vec<TaskRecord>,
}

impl TryFrom<RawTaskList> for TaskList {
    type Error = ValidationError;

    fn try_from(raw: RawTaskList) -> Result<Self, Self::Error> {
        TaskList::new(raw.project_name, raw.project_description, raw.tasks)
    }
}

impl TaskList {
    /// Builds a list, checking per-record and list-wide invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for a blank id or title, an
    /// empty acceptance criteria list or a blank criterion, and the graph errors from
    /// [`graph::validate`] for duplicate ids, dangling dependencies or cycles.
    pub fn new(
        project_name: impl Into<String>,
        project_description: impl Into<String>,
        tasks: Vec<TaskRecord>,
    ) -> Result<Self, ValidationError> {
        for (index, task) in tasks.iter().enumerate() {
            check_record(index, task)?;
        }
        graph::validate(&tasks)?;
        Ok(Self {
            project_name: project_name.into(),
            project_description: project_description.into(),
            tasks,
        })
    }

    /// Name of the project the tasks belong to.
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Short description of the project.
    #[must_use]
    pub fn project_description(&self) -> &str {
        &self.project_description
    }

    /// Tasks in reading order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks a task up by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Task ids ordered so that dependencies come first.
    #[must_use]
    pub fn topological_order(&self) -> Vec<&str> {
        graph::topological_order(&self.tasks)
    }

    /// Encodes the list as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization itself fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Decodes a list produced by [`TaskList::to_json`], re-running validation.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] for malformed JSON and
    /// [`DecodeError::Invalid`] when the content breaks an invariant.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        let raw: RawTaskList = serde_json::from_str(text)?;
        Ok(Self::try_from(raw)?)
    }
}

fn check_record(index: usize, task: &TaskRecord) -> Result<(), ValidationError> {
    let empty = |field: String| Err(ValidationError::EmptyField { index, field });
    if task.id.trim().is_empty() {
        return empty("id".into());
    }
    if task.title.trim().is_empty() {
        return empty("title".into());
    }
    if task.acceptance_criteria.is_empty() {
        return empty("acceptance_criteria".into());
    }
    if let Some(i) = task.acceptance_criteria.iter().position(|c| c.trim().is_empty()) {
        return empty(format!("acceptance_criteria[{i}]"));
    }
    Ok(())
}
