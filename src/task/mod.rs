//! Task records, the validated task list, and its renderers.
//!
//! A [`TaskList`] can only exist in a valid state: identifiers are unique,
//! dependencies resolve, and the dependency graph is acyclic.

pub mod graph;
mod list;
pub mod markdown;
mod record;

pub use list::TaskList;
pub use record::{Effort, Priority, TaskExample, TaskRecord};
