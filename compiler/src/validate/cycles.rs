//! V001: circular dependencies in the derived node→node graph.
//!
//! Depth-first search with an explicit frame stack, so arbitrarily deep
//! chains cannot exhaust the call stack.

use std::collections::{HashMap, HashSet};

use super::{ComponentType, Finding};
use crate::parse::graph::DependencyGraph;
use crate::parse::types::Snapshot;

#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Each cycle as the DFS trail from its root; the last element is the
    /// on-stack node the trail re-entered.
    pub cycles: Vec<Vec<String>>,
    pub visited: HashSet<String>,
}

/// Run one DFS per unvisited node, in declaration order, and keep the first
/// cycle each search runs into. Cycles are deduplicated by member set.
pub fn find_cycles(graph: &DependencyGraph) -> CycleReport {
    let mut report = CycleReport::default();
    let mut seen: HashSet<Vec<String>> = HashSet::new();

    for root in graph.node_ids() {
        if report.visited.contains(root) {
            continue;
        }
        let Some(cycle) = search_from(graph, root, &mut report.visited) else {
            continue;
        };
        let mut key = cycle.clone();
        key.sort();
        if seen.insert(key) {
            report.cycles.push(cycle);
        }
    }

    report
}

fn search_from<'g>(
    graph: &'g DependencyGraph,
    root: &'g str,
    visited: &mut HashSet<String>,
) -> Option<Vec<String>> {
    let mut on_stack: HashSet<&'g str> = HashSet::new();
    let mut path: Vec<&'g str> = Vec::new();
    let mut frames: Vec<(&'g str, Vec<&'g str>, usize)> = Vec::new();

    visited.insert(root.to_string());
    on_stack.insert(root);
    path.push(root);
    frames.push((root, graph.successors(root), 0));

    while let Some((node, successors, next)) = frames.last_mut() {
        let Some(&neighbor) = successors.get(*next) else {
            on_stack.remove(*node);
            path.pop();
            frames.pop();
            continue;
        };
        *next += 1;

        if !visited.contains(neighbor) {
            visited.insert(neighbor.to_string());
            on_stack.insert(neighbor);
            path.push(neighbor);
            frames.push((neighbor, graph.successors(neighbor), 0));
        } else if on_stack.contains(neighbor) {
            let mut cycle: Vec<String> = path.iter().map(|n| n.to_string()).collect();
            cycle.push(neighbor.to_string());
            return Some(cycle);
        }
    }

    None
}

pub fn v001_no_cycles(snapshot: &Snapshot, graph: &DependencyGraph, findings: &mut Vec<Finding>) {
    let labels: HashMap<&str, &str> = snapshot
        .nodes
        .iter()
        .map(|n| {
            let name = n.name.trim();
            (n.id.as_str(), if name.is_empty() { n.id.as_str() } else { name })
        })
        .collect();

    for cycle in find_cycles(graph).cycles {
        let trail = cycle
            .iter()
            .map(|id| labels.get(id.as_str()).copied().unwrap_or(id.as_str()))
            .collect::<Vec<_>>()
            .join(" → ");
        findings.push(
            Finding::error(
                "V001",
                "circular",
                &cycle[0],
                ComponentType::Pipeline,
                format!("Circular dependency detected: {}", trail),
            )
            .with_suggestion("Remove one connection to break the cycle"),
        );
    }
}
