//! Writes the artifacts of a generation run.

use std::path::{Path, PathBuf};

use tracing::info;

use super::Generation;
use crate::error::OutputError;
use crate::ports::FileSystem;
use crate::task::markdown;

/// File stem used when the caller does not choose one.
pub const DEFAULT_STEM: &str = "technical_tasks";

/// Paths of the files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Structured task list (`<stem>.json`).
    pub json: PathBuf,
    /// Audit record (`<stem>.raw.json`).
    pub raw: PathBuf,
    /// Markdown rendering (`<stem>.md`).
    pub markdown: PathBuf,
}

impl OutputPaths {
    /// Paths for `stem` inside `dir`.
    #[must_use]
    pub fn new(dir: &Path, stem: &str) -> Self {
        Self {
            json: dir.join(format!("{stem}.json")),
            raw: dir.join(format!("{stem}.raw.json")),
            markdown: dir.join(format!("{stem}.md")),
        }
    }
}

/// Writes the structured list, the audit record and the Markdown file.
///
/// Everything is encoded before the first write, so an encoding failure
/// leaves no files behind.
///
/// # Errors
///
/// Returns [`OutputError::Encode`] if an artifact cannot be serialized and
/// [`OutputError::Write`] if a file cannot be written.
pub fn write_outputs(
    fs: &dyn FileSystem,
    dir: &Path,
    stem: &str,
    generation: &Generation,
) -> Result<OutputPaths, OutputError> {
    let paths = OutputPaths::new(dir, stem);

    let json = generation
        .task_list
        .to_json()
        .map_err(|e| OutputError::Encode { what: "task list", message: e.to_string() })?;
    let raw = generation
        .audit_json()
        .map_err(|e| OutputError::Encode { what: "audit record", message: e.to_string() })?;
    let md = markdown::render(&generation.task_list);

    for (path, contents) in [(&paths.json, &json), (&paths.raw, &raw), (&paths.markdown, &md)] {
        fs.write(path, contents)
            .map_err(|e| OutputError::Write { path: path.clone(), message: e.to_string() })?;
    }

    info!(
        json = %paths.json.display(),
        raw = %paths.raw.display(),
        markdown = %paths.markdown.display(),
        "artifacts written"
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::error::Error;
    use std::sync::Mutex;

    use super::*;
    use crate::generate::GenerationMetadata;
    use crate::task::{Effort, Priority, TaskList, TaskRecord};

    #[derive(Default)]
    struct MemFs {
        files: Mutex<HashMap<PathBuf, String>>,
        fail_on: Option<&'static str>,
    }

    impl FileSystem for MemFs {
        fn read_to_string(&self, path: &Path) -> Result<String, Box<dyn Error + Send + Sync>> {
            self.files.lock().unwrap().get(path).cloned().ok_or_else(|| "not found".into())
        }

        fn write(&self, path: &Path, contents: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
            if self.fail_on.is_some_and(|suffix| path.to_string_lossy().ends_with(suffix)) {
                return Err("disk full".into());
            }
            self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }

    fn generation() -> Generation {
        let task = TaskRecord {
            id: "task-001".into(),
            title: "Model orders".into(),
            description: "Orders and line items.".into(),
            acceptance_criteria: vec!["An order has at least one line item".into()],
            examples: vec![],
            dependencies: vec![],
            estimated_effort: Effort::Small,
            priority: Priority::High,
            tags: ["data-model".to_string()].into(),
            notes: None,
        };
        Generation {
            task_list: TaskList::new("Coffee App", "Order ahead.", vec![task]).unwrap(),
            system_prompt: "system".into(),
            user_prompt: "user".into(),
            raw_response: "{\"tasks\": []}".into(),
            metadata: GenerationMetadata {
                run_id: "run-1".into(),
                model: "m".into(),
                started_at: chrono::Utc::now(),
                duration_secs: 1.5,
                response_bytes: 13,
                task_count: 1,
                prompt_tokens: 0,
                completion_tokens: 0,
            },
        }
    }

    #[test]
    fn writes_three_artifacts() {
        let fs = MemFs::default();
        let paths = write_outputs(&fs, Path::new("out"), DEFAULT_STEM, &generation()).unwrap();

        assert_eq!(paths.json, Path::new("out/technical_tasks.json"));
        assert_eq!(paths.raw, Path::new("out/technical_tasks.raw.json"));
        assert_eq!(paths.markdown, Path::new("out/technical_tasks.md"));

        let json = fs.read_to_string(&paths.json).unwrap();
        assert_eq!(TaskList::from_json(&json).unwrap(), generation().task_list);
        assert!(fs.read_to_string(&paths.raw).unwrap().contains("\"run_id\": \"run-1\""));
        let markdown = fs.read_to_string(&paths.markdown).unwrap();
        assert!(markdown.starts_with("# Technical Task List: Coffee App"));
    }

    #[test]
    fn write_failures_name_the_file() {
        let fs = MemFs { fail_on: Some(".md"), ..MemFs::default() };
        let err = write_outputs(&fs, Path::new("out"), "tasks", &generation()).unwrap_err();
        assert!(matches!(
            err,
            OutputError::Write { ref path, .. } if path == Path::new("out/tasks.md")
        ));
        assert!(err.to_string().contains("disk full"));
    }
}
