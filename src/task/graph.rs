//! List-wide dependency checks.
//!
//! Identifiers must be unique, every dependency must resolve inside the
//! list, and the dependency relation must be acyclic. The checks run in
//! that order, so a cycle report never involves an unknown identifier.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap, HashSet};

use super::record::TaskRecord;
use crate::error::ValidationError;

/// Runs every graph check, stopping at the first violation.
///
/// # Errors
///
/// Returns [`ValidationError::DuplicateId`], [`ValidationError::DanglingDependency`]
/// or [`ValidationError::DependencyCycle`].
pub fn validate(tasks: &[TaskRecord]) -> Result<(), ValidationError> {
    check_unique_ids(tasks)?;
    check_dependencies_resolve(tasks)?;
    if let Some(path) = find_cycle(tasks) {
        return Err(ValidationError::DependencyCycle { path });
    }
    Ok(())
}

/// Fails when any identifier occurs more than once.
///
/// # Errors
///
/// Returns [`ValidationError::DuplicateId`] listing every repeated id.
pub fn check_unique_ids(tasks: &[TaskRecord]) -> Result<(), ValidationError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut dupes: BTreeSet<String> = BTreeSet::new();
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            dupes.insert(task.id.clone());
        }
    }
    if dupes.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::DuplicateId { ids: dupes.into_iter().collect() })
    }
}

/// Fails on the first dependency (in list order) that names no task.
///
/// # Errors
///
/// Returns [`ValidationError::DanglingDependency`].
pub fn check_dependencies_resolve(tasks: &[TaskRecord]) -> Result<(), ValidationError> {
    let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    for task in tasks {
        if let Some(dep) = task.dependencies.iter().find(|d| !ids.contains(d.as_str())) {
            return Err(ValidationError::DanglingDependency {
                task_id: task.id.clone(),
                dependency: dep.clone(),
            });
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Finds a dependency cycle, if any.
///
/// Traversal follows list order, so the reported cycle is deterministic.
/// The returned path starts and ends with the same identifier; a task that
/// depends on itself yields `[id, id]`. Unknown dependencies are skipped.
/// The walk keeps its own stack, so chain depth is bounded by memory only.
#[must_use]
pub fn find_cycle(tasks: &[TaskRecord]) -> Option<Vec<String>> {
    let graph: HashMap<&str, &[String]> =
        tasks.iter().map(|t| (t.id.as_str(), t.dependencies.as_slice())).collect();
    let mut marks: HashMap<&str, Mark> = HashMap::new();

    for task in tasks {
        if !marks.contains_key(task.id.as_str()) {
            if let Some(cycle) = walk(task.id.as_str(), &graph, &mut marks) {
                return Some(cycle);
            }
        }
    }
    None
}

/// Depth-first walk from `root`. Each frame is a node and the index of
/// the next dependency to look at.
fn walk<'a>(
    root: &'a str,
    graph: &HashMap<&'a str, &'a [String]>,
    marks: &mut HashMap<&'a str, Mark>,
) -> Option<Vec<String>> {
    let mut frames: Vec<(&'a str, usize)> = vec![(root, 0)];
    marks.insert(root, Mark::Visiting);

    while let Some(frame) = frames.last_mut() {
        let (node, next) = *frame;
        let deps = graph.get(node).copied().unwrap_or_default();
        let Some(dep) = deps.get(next) else {
            frames.pop();
            marks.insert(node, Mark::Done);
            continue;
        };
        frame.1 += 1;

        let dep = dep.as_str();
        if !graph.contains_key(dep) {
            continue;
        }
        match marks.get(dep) {
            Some(Mark::Visiting) => {
                let start = frames.iter().position(|&(n, _)| n == dep).unwrap_or(0);
                let mut path: Vec<String> =
                    frames[start..].iter().map(|(n, _)| (*n).to_string()).collect();
                path.push(dep.to_string());
                return Some(path);
            }
            Some(Mark::Done) => {}
            None => {
                marks.insert(dep, Mark::Visiting);
                frames.push((dep, 0));
            }
        }
    }
    None
}

/// Orders task ids so every task comes after its dependencies.
///
/// Ties keep list order. This is a derived view: the stored list order is
/// never changed. Tasks caught in a cycle are left out, which cannot happen
/// for a validated list.
#[must_use]
pub fn topological_order(tasks: &[TaskRecord]) -> Vec<&str> {
    let position: HashMap<&str, usize> =
        tasks.iter().enumerate().map(|(i, t)| (t.id.as_str(), i)).collect();
    let mut indegree: Vec<usize> = vec![0; tasks.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];

    for (i, task) in tasks.iter().enumerate() {
        for dep in &task.dependencies {
            if let Some(&j) = position.get(dep.as_str()) {
                indegree[i] += 1;
                dependents[j].push(i);
            }
        }
    }

    // Min-heap on list position keeps ties in list order.
    let mut ready: BinaryHeap<Reverse<usize>> =
        (0..tasks.len()).filter(|&i| indegree[i] == 0).map(Reverse).collect();
    let mut order = Vec::with_capacity(tasks.len());
    while let Some(Reverse(i)) = ready.pop() {
        order.push(tasks[i].id.as_str());
        for &k in &dependents[i] {
            indegree[k] -= 1;
            if indegree[k] == 0 {
                ready.push(Reverse(k));
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::record::{Effort, Priority};

    fn task(id: &str, deps: &[&str]) -> TaskRecord {
        TaskRecord {
            id: id.into(),
            title: format!("Task {id}"),
            description: String::new(),
            acceptance_criteria: vec!["done".into()],
            examples: vec![],
            dependencies: deps.iter().map(|d| (*d).to_string()).collect(),
            estimated_effort: Effort::Small,
            priority: Priority::Medium,
            tags: BTreeSet::new(),
            notes: None,
        }
    }

    #[test]
    fn linear_chain_is_valid() {
        let tasks = vec![task("a", &[]), task("b", &["a"]), task("c", &["b"])];
        assert!(validate(&tasks).is_ok());
    }

    #[test]
    fn duplicates_are_reported_sorted() {
        let tasks = vec![task("b", &[]), task("a", &[]), task("b", &[]), task("a", &[])];
        assert_eq!(
            check_unique_ids(&tasks),
            Err(ValidationError::DuplicateId { ids: vec!["a".into(), "b".into()] })
        );
    }

    #[test]
    fn dangling_reference_names_both_ids() {
        let tasks = vec![task("a", &[]), task("b", &["a", "zzz"])];
        assert_eq!(
            validate(&tasks),
            Err(ValidationError::DanglingDependency {
                task_id: "b".into(),
                dependency: "zzz".into()
            })
        );
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let tasks = vec![task("task-001", &[]), task("task-002", &["task-002"])];
        assert_eq!(find_cycle(&tasks), Some(vec!["task-002".to_string(), "task-002".to_string()]));
    }

    #[test]
    fn two_node_cycle() {
        let tasks = vec![task("task-001", &["task-002"]), task("task-002", &["task-001"])];
        assert_eq!(
            validate(&tasks),
            Err(ValidationError::DependencyCycle {
                path: vec!["task-001".into(), "task-002".into(), "task-001".into()]
            })
        );
    }

    #[test]
    fn three_node_cycle_behind_acyclic_prefix() {
        let tasks = vec![
            task("root", &[]),
            task("x", &["root", "z"]),
            task("y", &["x"]),
            task("z", &["y"]),
        ];
        let cycle = find_cycle(&tasks).unwrap();
        assert_eq!(cycle, vec!["x", "z", "y", "x"]);
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let tasks =
            vec![task("a", &[]), task("b", &["a"]), task("c", &["a"]), task("d", &["b", "c"])];
        assert!(find_cycle(&tasks).is_none());
    }

    fn chain(len: usize) -> Vec<TaskRecord> {
        (0..len)
            .map(|i| {
                let id = format!("t{i}");
                let next = format!("t{}", i + 1);
                if i + 1 < len {
                    task(&id, &[next.as_str()])
                } else {
                    task(&id, &[])
                }
            })
            .collect()
    }

    #[test]
    fn very_deep_chain_does_not_exhaust_the_stack() {
        let tasks = chain(50_000);
        assert!(validate(&tasks).is_ok());
        let order = topological_order(&tasks);
        assert_eq!(order.len(), 50_000);
        assert_eq!(order.first(), Some(&"t49999"));
        assert_eq!(order.last(), Some(&"t0"));
    }

    #[test]
    fn cycle_closing_a_deep_chain_is_found() {
        let mut tasks = chain(50_000);
        tasks[49_999].dependencies.push("t0".into());
        let path = find_cycle(&tasks).unwrap();
        assert_eq!(path.len(), 50_001);
        assert_eq!(path.first().map(String::as_str), Some("t0"));
        assert_eq!(path.last().map(String::as_str), Some("t0"));
    }

    #[test]
    fn topological_order_respects_dependencies_and_list_order() {
        // Listed out of dependency order on purpose.
        let tasks = vec![task("ui", &["api"]), task("model", &[]), task("api", &["model"])];
        assert_eq!(topological_order(&tasks), vec!["model", "api", "ui"]);
    }

    #[test]
    fn topological_order_is_list_order_when_already_sorted() {
        let tasks = vec![task("a", &[]), task("b", &[]), task("c", &["a"]), task("d", &[])];
        assert_eq!(topological_order(&tasks), vec!["a", "b", "c", "d"]);
    }
}
