//! petgraph-based node→node dependency graph derived from the bipartite
//! node↔dataset connections.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};

use super::types::{Link, Snapshot};

pub struct DependencyGraph {
    pub graph: DiGraph<String, ()>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// A dataset with producers P and consumers C contributes the edges P×C.
    /// Connections that are not node↔dataset, or that reference components
    /// missing from the snapshot, are skipped.
    pub fn build(snapshot: &Snapshot) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        // Add all nodes, isolated ones included
        for node in &snapshot.nodes {
            if node_indices.contains_key(&node.id) {
                continue;
            }
            let idx = graph.add_node(node.id.clone());
            node_indices.insert(node.id.clone(), idx);
        }

        let dataset_ids: HashSet<&str> = snapshot.datasets.iter().map(|d| d.id.as_str()).collect();
        let mut producers: HashMap<&str, Vec<NodeIndex>> = HashMap::new();
        let mut consumers: HashMap<&str, Vec<NodeIndex>> = HashMap::new();

        for conn in &snapshot.connections {
            match conn.link() {
                Some(Link::Produces { node, dataset }) if dataset_ids.contains(dataset) => {
                    if let Some(&idx) = node_indices.get(node) {
                        producers.entry(dataset).or_default().push(idx);
                    }
                }
                Some(Link::Consumes { dataset, node }) if dataset_ids.contains(dataset) => {
                    if let Some(&idx) = node_indices.get(node) {
                        consumers.entry(dataset).or_default().push(idx);
                    }
                }
                _ => {}
            }
        }

        for dataset in &snapshot.datasets {
            let (Some(from), Some(to)) = (
                producers.get(dataset.id.as_str()),
                consumers.get(dataset.id.as_str()),
            ) else {
                continue;
            };
            for &p in from {
                for &c in to {
                    graph.update_edge(p, c, ());
                }
            }
        }

        DependencyGraph { graph, node_indices }
    }

    /// Node ids in snapshot declaration order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }

    /// Downstream node ids in the order their edges were derived.
    pub fn successors(&self, node_id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        // petgraph walks outgoing edges newest-first
        let mut next: Vec<&str> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect();
        next.reverse();
        next
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_indices.get(from), self.node_indices.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The graph as a plain node-id → downstream-set map.
    pub fn downstream(&self) -> HashMap<String, HashSet<String>> {
        self.node_ids()
            .map(|id| {
                let next = self.successors(id).into_iter().map(str::to_string).collect();
                (id.to_string(), next)
            })
            .collect()
    }
}

/// Dataset names a node reads and writes, in connection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeIo {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// Derive every node's input/output dataset names from the connections.
/// Every node gets an entry, even when it has no edges.
pub fn resolve_node_io(snapshot: &Snapshot) -> HashMap<String, NodeIo> {
    let mut io: HashMap<String, NodeIo> = snapshot
        .nodes
        .iter()
        .map(|n| (n.id.clone(), NodeIo::default()))
        .collect();
    let dataset_names: HashMap<&str, &str> = snapshot
        .datasets
        .iter()
        .map(|d| (d.id.as_str(), d.name.trim()))
        .collect();

    for conn in &snapshot.connections {
        let (node, dataset, is_output) = match conn.link() {
            Some(Link::Produces { node, dataset }) => (node, dataset, true),
            Some(Link::Consumes { dataset, node }) => (node, dataset, false),
            None => continue,
        };
        let (Some(entry), Some(&name)) = (io.get_mut(node), dataset_names.get(dataset)) else {
            continue;
        };
        let list = if is_output {
            &mut entry.outputs
        } else {
            &mut entry.inputs
        };
        if !list.iter().any(|existing| existing == name) {
            list.push(name.to_string());
        }
    }

    io
}
