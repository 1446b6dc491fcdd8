//! Parse phase: snapshot JSON → Rust types + derived dependency graph.

pub mod graph;
pub mod types;

pub use graph::{DependencyGraph, NodeIo, resolve_node_io};
pub use types::*;

use crate::error::CompilerError;

/// Deserialize a snapshot JSON string into a `Snapshot`.
pub fn parse(json: &str) -> Result<Snapshot, Vec<CompilerError>> {
    serde_json::from_str::<Snapshot>(json).map_err(|e| {
        vec![CompilerError::parse(
            "P001",
            format!("Failed to parse project snapshot JSON: {}", e),
        )]
    })
}
