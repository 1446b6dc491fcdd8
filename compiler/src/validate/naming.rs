//! Naming rules: V002 duplicates, V003 syntax, V004 empty names, V009
//! project metadata.
//!
//! Node names become function names through snake_case normalization, so
//! they may contain spaces and reserved words. Dataset names are used as
//! catalog keys verbatim and must already be snake_case identifiers.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::{ComponentType, Finding};
use crate::codegen::helpers::{is_python_keyword, to_snake_case};
use crate::parse::types::{DEFAULT_PIPELINE_NAME, ProjectMetadata, Snapshot, UNNAMED_DATASET, UNNAMED_NODE};

static NODE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_ ]*$").expect("valid node name pattern"));
static DATASET_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid dataset name pattern"));
static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid project name pattern"));
static PYTHON_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("valid package pattern"));

pub fn is_valid_node_name(name: &str) -> bool {
    NODE_NAME.is_match(name)
}

pub fn is_valid_dataset_name(name: &str) -> bool {
    DATASET_NAME.is_match(name) && !is_python_keyword(name)
}

fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Group names by `key` in first-seen order. Names with a blank key are
/// left to V004.
fn group_names<'a>(
    items: impl Iterator<Item = (&'a str, &'a str)>,
    key: fn(&str) -> String,
) -> Vec<Vec<(&'a str, &'a str)>> {
    let mut groups: Vec<Vec<(&str, &str)>> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();
    for (id, name) in items {
        let key = key(name);
        if key.is_empty() {
            continue;
        }
        match slot.get(&key) {
            Some(&i) => groups[i].push((id, name)),
            None => {
                slot.insert(key, groups.len());
                groups.push(vec![(id, name)]);
            }
        }
    }
    groups
}

pub fn v002_unique_names(snapshot: &Snapshot, findings: &mut Vec<Finding>) {
    let nodes = || snapshot.nodes.iter().map(|n| (n.id.as_str(), n.name.as_str()));
    let node_groups = group_names(nodes(), fold_name);
    for group in node_groups.iter().filter(|g| g.len() > 1) {
        for &(id, name) in group {
            findings.push(
                Finding::error(
                    "V002",
                    "duplicate-node",
                    id,
                    ComponentType::Node,
                    format!("Duplicate node name \"{}\" found in {} nodes", name, group.len()),
                )
                .with_suggestion("Rename this node to make it unique"),
            );
        }
    }

    // Distinct names such as "Load Data" and "load_data" still generate the
    // same Python function and Kedro node name.
    for group in group_names(nodes(), to_snake_case).iter().filter(|g| g.len() > 1) {
        let folded = fold_name(group[0].1);
        if group.iter().all(|&(_, name)| fold_name(name) == folded) {
            continue;
        }
        let function = to_snake_case(group[0].1);
        for &(id, name) in group {
            findings.push(
                Finding::error(
                    "V002",
                    "duplicate-function",
                    id,
                    ComponentType::Node,
                    format!(
                        "Node \"{}\" generates function \"{}\", shared by {} nodes",
                        name,
                        function,
                        group.len()
                    ),
                )
                .with_suggestion("Rename this node so its function name is unique"),
            );
        }
    }

    let dataset_groups = group_names(
        snapshot.datasets.iter().map(|d| (d.id.as_str(), d.name.as_str())),
        fold_name,
    );
    for group in dataset_groups.iter().filter(|g| g.len() > 1) {
        for &(id, name) in group {
            findings.push(
                Finding::error(
                    "V002",
                    "duplicate-dataset",
                    id,
                    ComponentType::Dataset,
                    format!("Duplicate dataset name \"{}\" found in {} datasets", name, group.len()),
                )
                .with_suggestion("Rename this dataset to make it unique"),
            );
        }
    }
}

pub fn v003_valid_names(snapshot: &Snapshot, findings: &mut Vec<Finding>) {
    for node in &snapshot.nodes {
        let trimmed = node.name.trim();
        if !trimmed.is_empty() && !is_valid_node_name(trimmed) {
            findings.push(
                Finding::error(
                    "V003",
                    "invalid-node-name",
                    &node.id,
                    ComponentType::Node,
                    format!("Invalid node name \"{}\"", node.name),
                )
                .with_suggestion(
                    "Use only letters, numbers, spaces, and underscores. Must start with a letter.",
                ),
            );
        }
    }

    for dataset in &snapshot.datasets {
        let trimmed = dataset.name.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !DATASET_NAME.is_match(trimmed) {
            findings.push(
                Finding::error(
                    "V003",
                    "invalid-dataset-name",
                    &dataset.id,
                    ComponentType::Dataset,
                    format!("Invalid dataset name \"{}\"", dataset.name),
                )
                .with_suggestion("Use snake_case: lowercase letters, numbers, and underscores only."),
            );
        } else if is_python_keyword(trimmed) {
            findings.push(
                Finding::error(
                    "V003",
                    "reserved-dataset-name",
                    &dataset.id,
                    ComponentType::Dataset,
                    format!("Dataset name \"{}\" is a Python reserved word", trimmed),
                )
                .with_suggestion("Pick a name that is not a Python keyword, e.g. add a suffix."),
            );
        }
    }
}

pub fn v004_named_components(snapshot: &Snapshot, findings: &mut Vec<Finding>) {
    for node in &snapshot.nodes {
        let name = node.name.trim();
        if name.is_empty() || name == UNNAMED_NODE {
            findings.push(
                Finding::error("V004", "empty-node-name", &node.id, ComponentType::Node, "Node has no name")
                    .with_suggestion("Give this node a descriptive name"),
            );
        }
    }

    for dataset in &snapshot.datasets {
        let name = dataset.name.trim();
        if name.is_empty() || name == UNNAMED_DATASET {
            findings.push(
                Finding::error(
                    "V004",
                    "empty-dataset-name",
                    &dataset.id,
                    ComponentType::Dataset,
                    "Dataset has no name",
                )
                .with_suggestion("Give this dataset a descriptive name"),
            );
        }
    }
}

pub fn v009_project_metadata(project: &ProjectMetadata, findings: &mut Vec<Finding>) {
    let name = project.name.trim();
    if name.is_empty() {
        findings.push(
            Finding::error("V009", "project-name", "project", ComponentType::Pipeline, "Project name is required")
                .with_suggestion("Name the project before exporting"),
        );
    } else if !PROJECT_NAME.is_match(name) {
        findings.push(
            Finding::error(
                "V009",
                "project-name",
                "project",
                ComponentType::Pipeline,
                format!("Invalid project name \"{}\"", project.name),
            )
            .with_suggestion("Only letters, numbers, hyphens, and underscores allowed"),
        );
    } else {
        let package = project.package_name();
        if !PYTHON_PACKAGE.is_match(&package) || is_python_keyword(&package) {
            findings.push(
                Finding::error(
                    "V009",
                    "python-package",
                    "project",
                    ComponentType::Pipeline,
                    format!("\"{}\" is not a valid Python package name", package),
                )
                .with_suggestion("Start the project name with a letter"),
            );
        }
    }

    let pipeline = project.pipeline_name.trim();
    let pipeline_ok = pipeline == DEFAULT_PIPELINE_NAME
        || (PYTHON_PACKAGE.is_match(pipeline) && !is_python_keyword(pipeline));
    if !pipeline_ok {
        findings.push(
            Finding::error(
                "V009",
                "pipeline-name",
                "project",
                ComponentType::Pipeline,
                format!("Invalid pipeline name \"{}\"", project.pipeline_name),
            )
            .with_suggestion("Use a snake_case pipeline name"),
        );
    }
}
