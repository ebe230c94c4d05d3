//! Builds the parent/child tree from a flat task list.

use crate::types::Task;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A task with its subtasks materialised, rebuilt on every projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizedTask {
    #[serde(flatten)]
    pub task: Task,
    pub subtasks: Vec<OrganizedTask>,
}

/// Organize a flat list into root nodes with nested subtasks.
///
/// A task becomes a root when it has no parent or its parent is not in `tasks`
/// (for example, excluded by a filter). Siblings keep their input order.
pub fn organize(tasks: &[Task]) -> Vec<OrganizedTask> {
    if tasks.is_empty() {
        return Vec::new();
    }

    // First pass: index every task.
    let index: HashMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();

    // Second pass: attach to parent or to the root list.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    let mut roots = Vec::new();
    for (i, task) in tasks.iter().enumerate() {
        match task.parent_id.as_deref().and_then(|pid| index.get(pid)) {
            Some(&parent) => children[parent].push(i),
            None => roots.push(i),
        }
    }

    let mut placed = vec![false; tasks.len()];
    let mut result: Vec<OrganizedTask> = roots
        .into_iter()
        .map(|i| build_node(i, tasks, &children, &mut placed))
        .collect();

    // Tasks in a parent_id cycle are unreachable from any root.
    for i in 0..tasks.len() {
        if !placed[i] {
            result.push(build_node(i, tasks, &children, &mut placed));
        }
    }

    result
}

fn build_node(
    i: usize,
    tasks: &[Task],
    children: &[Vec<usize>],
    placed: &mut [bool],
) -> OrganizedTask {
    placed[i] = true;
    let mut subtasks = Vec::with_capacity(children[i].len());
    for &child in &children[i] {
        if !placed[child] {
            subtasks.push(build_node(child, tasks, children, placed));
        }
    }
    OrganizedTask {
        task: tasks[i].clone(),
        subtasks,
    }
}

/// Pre-order walk of an organized tree, yielding each task with its depth.
pub fn flatten(nodes: &[OrganizedTask]) -> Vec<(usize, &Task)> {
    let mut out = Vec::new();
    flatten_into(nodes, 0, &mut out);
    out
}

fn flatten_into<'a>(nodes: &'a [OrganizedTask], depth: usize, out: &mut Vec<(usize, &'a Task)>) {
    for node in nodes {
        out.push((depth, &node.task));
        flatten_into(&node.subtasks, depth + 1, out);
    }
}
