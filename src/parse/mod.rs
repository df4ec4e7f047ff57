//! Turns raw completion text into a validated [`TaskList`].
//!
//! Decoding happens in two steps. The text is first decoded into a generic
//! JSON value; failures there are [`ParseError`]s. The value is then mapped
//! onto the task schema field by field, so a bad field is reported with the
//! task index and field name instead of a decoder position.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{GenerateError, ParseError, ValidationError};
use crate::task::{Effort, Priority, TaskExample, TaskList, TaskRecord};

/// A validated task list together with the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    /// The validated list.
    pub task_list: TaskList,
    /// The completion text exactly as received.
    pub raw_response: String,
}

/// Parses and validates a completion.
///
/// `project_name` and `project_description` come from the plan; any values
/// the model echoes back are ignored.
///
/// # Errors
///
/// Returns [`GenerateError::Parse`] if the text is not JSON, and
/// [`GenerateError::Validation`] if the JSON does not describe a valid
/// task list.
pub fn parse_response(
    raw: &str,
    project_name: &str,
    project_description: &str,
) -> Result<ParsedResponse, GenerateError> {
    let value = decode(raw)?;
    let tasks = tasks_from_value(&value)?;
    if tasks.is_empty() {
        warn!("completion contained an empty task list");
    }
    let task_list = TaskList::new(project_name, project_description, tasks)?;
    debug!(tasks = task_list.len(), "completion parsed");
    Ok(ParsedResponse { task_list, raw_response: raw.to_string() })
}

/// Removes surrounding whitespace and one enclosing Markdown code fence.
///
/// Text that does not both open and close with a fence is returned trimmed
/// but otherwise unchanged.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line.
    match body.split_once('\n') {
        Some((_info, inner)) => inner.trim(),
        None => trimmed,
    }
}

/// Decodes the completion into generic JSON.
///
/// Positions in the error refer to the text after fence stripping.
fn decode(raw: &str) -> Result<Value, ParseError> {
    serde_json::from_str(strip_code_fence(raw)).map_err(|e| {
        let (line, column) = (e.line(), e.column());
        let full = e.to_string();
        let suffix = format!(" at line {line} column {column}");
        let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();
        ParseError { message, line, column, response: raw.to_string() }
    })
}

/// Maps a decoded completion onto task records, in order.
///
/// The value must be an object with a `tasks` array; other top-level keys
/// are ignored.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, scanning tasks in order.
pub fn tasks_from_value(value: &Value) -> Result<Vec<TaskRecord>, ValidationError> {
    let object = value.as_object().ok_or_else(|| {
        ValidationError::UnexpectedShape(format!("expected a JSON object, found {}", kind(value)))
    })?;
    let tasks = match object.get("tasks") {
        Some(Value::Array(tasks)) => tasks,
        Some(other) => {
            return Err(ValidationError::UnexpectedShape(format!(
                "`tasks` must be an array, found {}",
                kind(other)
            )))
        }
        None => {
            return Err(ValidationError::UnexpectedShape(
                "missing top-level `tasks` array".to_string(),
            ))
        }
    };
    tasks.iter().enumerate().map(|(index, task)| task_from_value(index, task)).collect()
}

fn task_from_value(index: usize, value: &Value) -> Result<TaskRecord, ValidationError> {
    let Some(fields) = value.as_object() else {
        return Err(ValidationError::UnexpectedShape(format!(
            "tasks[{index}] must be an object, found {}",
            kind(value)
        )));
    };
    let task = Fields { index, fields };

    Ok(TaskRecord {
        id: task.required_str("id")?,
        title: task.required_str("title")?,
        description: task.required_str("description")?,
        acceptance_criteria: task.acceptance_criteria()?,
        examples: task.examples()?,
        dependencies: task.optional_str_list("dependencies")?,
        estimated_effort: task.enumerated(
            "estimated_effort",
            Effort::from_label,
            &Effort::ALL.map(Effort::label),
        )?,
        priority: task.enumerated(
            "priority",
            Priority::from_label,
            &Priority::ALL.map(Priority::label),
        )?,
        tags: task.optional_str_list("tags")?.into_iter().collect::<BTreeSet<_>>(),
        notes: task.optional_str("notes")?,
    })
}

/// Field accessors for one task object that report errors against its index.
struct Fields<'a> {
    index: usize,
    fields: &'a Map<String, Value>,
}

impl Fields<'_> {
    /// A present, non-null field.
    fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    fn missing(&self, field: &str) -> ValidationError {
        ValidationError::MissingField { index: self.index, field: field.to_string() }
    }

    fn wrong_type(&self, field: impl Into<String>, expected: &'static str) -> ValidationError {
        ValidationError::WrongType { index: self.index, field: field.into(), expected }
    }

    fn required_str(&self, field: &str) -> Result<String, ValidationError> {
        match self.get(field) {
            None => Err(self.missing(field)),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(self.wrong_type(field, "a string")),
        }
    }

    fn optional_str(&self, field: &str) -> Result<Option<String>, ValidationError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.wrong_type(field, "a string")),
        }
    }

    fn array(&self, field: &str) -> Result<Option<&Vec<Value>>, ValidationError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(self.wrong_type(field, "an array")),
        }
    }

    fn optional_str_list(&self, field: &str) -> Result<Vec<String>, ValidationError> {
        let Some(items) = self.array(field)? else {
            return Ok(Vec::new());
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(self.wrong_type(format!("{field}[{i}]"), "a string")),
            })
            .collect()
    }

    /// Criteria are strings, or objects with a `criterion` string.
    fn acceptance_criteria(&self) -> Result<Vec<String>, ValidationError> {
        const FIELD: &str = "acceptance_criteria";
        let items = self.array(FIELD)?.ok_or_else(|| self.missing(FIELD))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Object(obj) => match obj.get("criterion") {
                    Some(Value::String(s)) => Ok(s.clone()),
                    _ => Err(self.wrong_type(format!("{FIELD}[{i}].criterion"), "a string")),
                },
                _ => Err(self.wrong_type(format!("{FIELD}[{i}]"), "a string or an object")),
            })
            .collect()
    }

    fn examples(&self) -> Result<Vec<TaskExample>, ValidationError> {
        let Some(items) = self.array("examples")? else {
            return Ok(Vec::new());
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let Value::Object(obj) = item else {
                    return Err(self.wrong_type(format!("examples[{i}]"), "an object"));
                };
                let text = |key: &str| match obj.get(key) {
                    Some(Value::String(s)) => Ok(s.clone()),
                    None | Some(Value::Null) => Err(self.missing(&format!("examples[{i}].{key}"))),
                    Some(_) => Err(self.wrong_type(format!("examples[{i}].{key}"), "a string")),
                };
                Ok(TaskExample { title: text("title")?, description: text("description")? })
            })
            .collect()
    }

    /// Matches a label against a fixed vocabulary; never falls back to a default.
    fn enumerated<T>(
        &self,
        field: &str,
        from_label: fn(&str) -> Option<T>,
        allowed: &[&str],
    ) -> Result<T, ValidationError> {
        let label = self.required_str(field)?;
        from_label(&label).ok_or_else(|| ValidationError::UnknownEnumValue {
            index: self.index,
            field: field.to_string(),
            value: label,
            allowed: allowed.join(", "),
        })
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
