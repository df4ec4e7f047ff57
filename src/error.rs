//! Error taxonomy for the task generation pipeline.
//!
//! Every stage fails with its own type so callers can tell an incomplete
//! plan apart from an unreachable model or a malformed completion.
//! [`GenerateError`] unifies them for the generator's public surface.

use std::path::PathBuf;

use thiserror::Error;

/// The project plan handed to the generator is unusable.
///
/// Detected before any external call is made.
#[derive(Debug, Error)]
pub enum InputError {
    /// A required plan field is absent or blank.
    #[error("project plan is missing required field `{0}`")]
    MissingField(&'static str),

    /// An input file could not be read.
    #[error("failed to read {path}: {message}")]
    Unreadable {
        /// The file that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        message: String,
    },

    /// An input file was read but is not a valid plan or breakdown.
    #[error("failed to parse {path}: {message}")]
    Malformed {
        /// The file that was parsed.
        path: PathBuf,
        /// Decoder failure.
        message: String,
    },
}

/// The LLM collaborator failed. The source is passed through untouched.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The client reported an error (network, auth, rate limit, timeout, ...).
    #[error("upstream LLM failure: {0}")]
    Llm(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The call succeeded but produced no text.
    #[error("upstream LLM failure: completion was empty")]
    EmptyResponse,
}

/// The response text could not be decoded as JSON.
///
/// Carries the complete response for diagnostics.
#[derive(Debug, Error)]
#[error("LLM response is not valid JSON (line {line}, column {column}): {message}")]
pub struct ParseError {
    /// Decoder message.
    pub message: String,
    /// 1-based line of the first decoding failure.
    pub line: usize,
    /// 1-based column of the first decoding failure.
    pub column: usize,
    /// The raw response exactly as returned by the LLM.
    pub response: String,
}

/// Decoded data violates the task list schema or one of its invariants.
///
/// Task indices are 0-based positions in the `tasks` array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The top-level structure is not an object with a `tasks` array.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A required field is absent.
    #[error("tasks[{index}]: missing required field `{field}`")]
    MissingField {
        /// Position of the offending task.
        index: usize,
        /// Field path within the task.
        field: String,
    },

    /// A field is present but has the wrong JSON type.
    #[error("tasks[{index}]: field `{field}` must be {expected}")]
    WrongType {
        /// Position of the offending task.
        index: usize,
        /// Field path within the task.
        field: String,
        /// Description of the expected type.
        expected: &'static str,
    },

    /// A field that must carry content is empty.
    #[error("tasks[{index}]: field `{field}` must not be empty")]
    EmptyField {
        /// Position of the offending task.
        index: usize,
        /// Field path within the task.
        field: String,
    },

    /// An enumerated field holds a value outside its vocabulary.
    #[error("tasks[{index}]: `{value}` is not a valid {field} (expected one of: {allowed})")]
    UnknownEnumValue {
        /// Position of the offending task.
        index: usize,
        /// Field name.
        field: String,
        /// The rejected value, verbatim.
        value: String,
        /// Comma-separated accepted values.
        allowed: String,
    },

    /// Two or more tasks share an identifier.
    #[error("duplicate task identifier(s): {}", .ids.join(", "))]
    DuplicateId {
        /// Every identifier that occurs more than once, sorted.
        ids: Vec<String>,
    },

    /// A task depends on an identifier that is not in the list.
    #[error("task `{task_id}` depends on unknown task `{dependency}`")]
    DanglingDependency {
        /// The task declaring the dependency.
        task_id: String,
        /// The identifier that does not resolve.
        dependency: String,
    },

    /// The dependency graph contains a cycle.
    #[error("dependency cycle: {}", .path.join(" -> "))]
    DependencyCycle {
        /// Identifiers along the cycle; the first id is repeated at the end.
        path: Vec<String>,
    },
}

/// Any failure of a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// See [`InputError`].
    #[error(transparent)]
    Input(#[from] InputError),
    /// See [`UpstreamError`].
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// See [`ParseError`].
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GenerateError {
    /// Short category label, used as a structured logging field.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            GenerateError::Input(_) => "input",
            GenerateError::Upstream(_) => "upstream",
            GenerateError::Parse(_) => "parse",
            GenerateError::Validation(_) => "validation",
        }
    }
}

/// A structured task list file could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not JSON of the task list shape.
    #[error("malformed task list JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The decoded list violates a task list invariant.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// An environment setting holds a value that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for {var}: `{value}` ({reason})")]
pub struct ConfigError {
    /// The environment variable.
    pub var: &'static str,
    /// The rejected value.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

/// Writing generation artifacts failed.
#[derive(Debug, Error)]
pub enum OutputError {
    /// An artifact could not be serialized.
    #[error("failed to encode {what}: {message}")]
    Encode {
        /// Which artifact was being encoded.
        what: &'static str,
        /// Encoder failure.
        message: String,
    },
    /// An artifact could not be written.
    #[error("failed to write {path}: {message}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Filesystem failure.
        message: String,
    },
}
