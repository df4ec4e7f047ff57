//! Work breakdown structure used to bias task ordering.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::ports::FileSystem;

/// One node of the breakdown hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WbsNode {
    /// Phase or work package name.
    pub title: String,
    /// Optional detail.
    #[serde(default)]
    pub description: Option<String>,
    /// Nested work packages.
    #[serde(default)]
    pub children: Vec<WbsNode>,
}

/// Hierarchical decomposition of the project into phases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkBreakdown {
    /// Title of the whole breakdown, usually the project title.
    #[serde(default)]
    pub title: Option<String>,
    /// Top-level phases in order.
    #[serde(default)]
    pub phases: Vec<WbsNode>,
}

impl WorkBreakdown {
    /// Loads a breakdown file (YAML or JSON) through the filesystem port.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Unreadable`] or [`InputError::Malformed`].
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, InputError> {
        super::load_document(fs, path)
    }

    /// Renders the hierarchy as an indented Markdown outline.
    #[must_use]
    pub fn outline(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            let _ = writeln!(out, "{title}");
        }
        for node in &self.phases {
            write_node(&mut out, node, 0);
        }
        out
    }
}

fn write_node(out: &mut String, node: &WbsNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match &node.description {
        Some(desc) if !desc.trim().is_empty() => {
            let _ = writeln!(out, "{indent}- {}: {desc}", node.title);
        }
        _ => {
            let _ = writeln!(out, "{indent}- {}", node.title);
        }
    }
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}
