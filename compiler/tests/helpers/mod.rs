#![allow(dead_code)]

use pipeline_compiler::parse::types::*;

// =============================================================================
// Snapshot builders
// =============================================================================

/// Fluent builder over `Snapshot`; connection ids are numbered in order.
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    pub fn new(project: &str) -> Self {
        Self {
            snapshot: Snapshot::new(ProjectMetadata::new(project)),
        }
    }

    pub fn pipeline(mut self, name: &str) -> Self {
        self.snapshot.project.pipeline_name = name.into();
        self
    }

    pub fn node(mut self, id: &str, name: &str) -> Self {
        self.snapshot.nodes.push(Node::new(id, name));
        self
    }

    pub fn node_with_code(mut self, id: &str, name: &str, code: &str) -> Self {
        let mut node = Node::new(id, name);
        node.function_code = Some(code.into());
        self.snapshot.nodes.push(node);
        self
    }

    pub fn dataset(mut self, id: &str, name: &str, kind: DatasetType) -> Self {
        self.snapshot.datasets.push(Dataset::new(id, name, kind));
        self
    }

    pub fn dataset_at(mut self, id: &str, name: &str, kind: DatasetType, filepath: &str) -> Self {
        let mut dataset = Dataset::new(id, name, kind);
        dataset.filepath = Some(filepath.into());
        self.snapshot.datasets.push(dataset);
        self
    }

    /// Connect `source` to `target`.
    pub fn link(mut self, source: &str, target: &str) -> Self {
        let id = format!("conn-{}", self.snapshot.connections.len() + 1);
        self.snapshot
            .connections
            .push(Connection::new(id, source, target));
        self
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}

// =============================================================================
// Canonical scenarios
// =============================================================================

/// raw_data (csv) → load_data → processed_data (parquet).
pub fn single_node_snapshot() -> Snapshot {
    SnapshotBuilder::new("demo-project")
        .node_with_code("node-1", "load_data", "return raw_data")
        .dataset_at("dataset-1", "raw_data", DatasetType::Csv, "data/01_raw/raw_data.csv")
        .dataset_at(
            "dataset-2",
            "processed_data",
            DatasetType::Parquet,
            "data/02_intermediate/processed_data.parquet",
        )
        .link("dataset-1", "node-1")
        .link("node-1", "dataset-2")
        .build()
}

/// node_a → data_a → node_b → data_b → node_a.
pub fn two_node_cycle_snapshot() -> Snapshot {
    SnapshotBuilder::new("demo")
        .node("node-a", "node_a")
        .node("node-b", "node_b")
        .dataset("dataset-a", "data_a", DatasetType::Memory)
        .dataset("dataset-b", "data_b", DatasetType::Memory)
        .link("node-a", "dataset-a")
        .link("dataset-a", "node-b")
        .link("node-b", "dataset-b")
        .link("dataset-b", "node-a")
        .build()
}

/// A linear chain `node-0 → dataset-0 → node-1 → …`, optionally closed
/// back onto `node-0`.
pub fn chain_snapshot(len: usize, closed: bool) -> Snapshot {
    let mut builder = SnapshotBuilder::new("chain");
    for i in 0..len {
        builder = builder
            .node(&format!("node-{i}"), &format!("step_{i}"))
            .dataset(&format!("dataset-{i}"), &format!("out_{i}"), DatasetType::Memory)
            .link(&format!("node-{i}"), &format!("dataset-{i}"));
        if i + 1 < len || closed {
            builder = builder.link(&format!("dataset-{i}"), &format!("node-{}", (i + 1) % len));
        }
    }
    builder.build()
}

/// Consistently rename every id in the snapshot.
pub fn relabel(snapshot: &Snapshot, map: impl Fn(&str) -> String) -> Snapshot {
    let mut out = snapshot.clone();
    for node in &mut out.nodes {
        node.id = map(&node.id);
    }
    for dataset in &mut out.datasets {
        dataset.id = map(&dataset.id);
    }
    for conn in &mut out.connections {
        conn.source = map(&conn.source);
        conn.target = map(&conn.target);
    }
    out
}
