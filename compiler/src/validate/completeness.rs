//! Non-blocking completeness checks: V005 orphans, V006 function bodies,
//! V007 dataset configuration, V008 malformed connections.

use std::collections::HashSet;

use super::{ComponentType, Finding};
use crate::parse::types::{Endpoint, Snapshot};

pub fn v005_no_orphans(snapshot: &Snapshot, findings: &mut Vec<Finding>) {
    let touched: HashSet<&str> = snapshot
        .connections
        .iter()
        .flat_map(|c| [c.source.as_str(), c.target.as_str()])
        .collect();

    for node in &snapshot.nodes {
        if !touched.contains(node.id.as_str()) {
            findings.push(
                Finding::warning(
                    "V005",
                    "orphan-node",
                    &node.id,
                    ComponentType::Node,
                    format!("Node \"{}\" is not connected to any datasets", node.name),
                )
                .with_suggestion("Connect this node to input or output datasets"),
            );
        }
    }

    for dataset in &snapshot.datasets {
        if !touched.contains(dataset.id.as_str()) {
            findings.push(
                Finding::warning(
                    "V005",
                    "orphan-dataset",
                    &dataset.id,
                    ComponentType::Dataset,
                    format!("Dataset \"{}\" is not connected to any nodes", dataset.name),
                )
                .with_suggestion("Connect this dataset to a node or remove it"),
            );
        }
    }
}

pub fn v006_function_bodies(snapshot: &Snapshot, findings: &mut Vec<Finding>) {
    for node in &snapshot.nodes {
        let has_code = node
            .function_code
            .as_deref()
            .is_some_and(|code| !code.trim().is_empty());
        if !has_code {
            findings.push(
                Finding::warning(
                    "V006",
                    "no-code",
                    &node.id,
                    ComponentType::Node,
                    format!("Node \"{}\" has no function code", node.name),
                )
                .with_suggestion("Add function code or it will be generated as a placeholder"),
            );
        }
    }
}

pub fn v007_dataset_config(snapshot: &Snapshot, findings: &mut Vec<Finding>) {
    for dataset in &snapshot.datasets {
        let mut missing = Vec::new();
        match dataset.dataset_type {
            None => {
                missing.push("type");
                if dataset.location().is_none() {
                    missing.push("filepath");
                }
            }
            Some(kind) if !kind.is_in_memory() && dataset.location().is_none() => {
                missing.push("filepath");
            }
            Some(_) => {}
        }

        if !missing.is_empty() {
            findings.push(
                Finding::warning(
                    "V007",
                    "incomplete-config",
                    &dataset.id,
                    ComponentType::Dataset,
                    format!("Dataset \"{}\" is missing: {}", dataset.name, missing.join(", ")),
                )
                .with_suggestion("Configure the dataset type and file path"),
            );
        }
    }
}

pub fn v008_well_formed_connections(snapshot: &Snapshot, findings: &mut Vec<Finding>) {
    let node_ids: HashSet<&str> = snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
    let dataset_ids: HashSet<&str> = snapshot.datasets.iter().map(|d| d.id.as_str()).collect();
    let exists = |endpoint: Endpoint<'_>| match endpoint {
        Endpoint::Node(id) => node_ids.contains(id),
        Endpoint::Dataset(id) => dataset_ids.contains(id),
    };

    for conn in &snapshot.connections {
        let problem = match (
            Endpoint::classify(&conn.source),
            Endpoint::classify(&conn.target),
        ) {
            (Some(Endpoint::Node(_)), Some(Endpoint::Node(_))) => {
                Some("links two nodes directly".to_string())
            }
            (Some(Endpoint::Dataset(_)), Some(Endpoint::Dataset(_))) => {
                Some("links two datasets directly".to_string())
            }
            (Some(source), Some(target)) => [source, target]
                .into_iter()
                .find(|e| !exists(*e))
                .map(|e| format!("references missing component \"{}\"", e.id())),
            (None, _) => Some(format!("has an unrecognised source \"{}\"", conn.source)),
            (_, None) => Some(format!("has an unrecognised target \"{}\"", conn.target)),
        };

        if let Some(problem) = problem {
            findings.push(
                Finding::warning(
                    "V008",
                    "malformed-connection",
                    &conn.id,
                    ComponentType::Connection,
                    format!("Connection {}", problem),
                )
                .with_suggestion("Delete this connection; it is ignored during export"),
            );
        }
    }
}
