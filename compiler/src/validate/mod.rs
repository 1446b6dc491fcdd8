//! Graph-level validation phase (pre-codegen).
//!
//! Runs the cycle detector and every structural rule over an immutable
//! snapshot and partitions the findings into blocking errors and warnings.
//! Safe to call on every edit; nothing is cached between runs.

pub mod completeness;
pub mod cycles;
pub mod naming;

use serde::Serialize;

use crate::parse::graph::DependencyGraph;
use crate::parse::types::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Node,
    Dataset,
    Connection,
    Pipeline,
}

/// One validation result, addressed to the component the UI should focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub code: &'static str,
    pub severity: Severity,
    pub component_id: String,
    pub component_type: ComponentType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    fn new(
        severity: Severity,
        code: &'static str,
        kind: &str,
        component_id: &str,
        component_type: ComponentType,
        message: impl Into<String>,
    ) -> Self {
        Finding {
            id: format!("{}-{}-{}", severity, kind, component_id),
            code,
            severity,
            component_id: component_id.to_string(),
            component_type,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn error(
        code: &'static str,
        kind: &str,
        component_id: &str,
        component_type: ComponentType,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, code, kind, component_id, component_type, message)
    }

    pub fn warning(
        code: &'static str,
        kind: &str,
        component_id: &str,
        component_type: ComponentType,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, code, kind, component_id, component_type, message)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub is_valid: bool,
}

impl ValidationResult {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = findings.into_iter().partition(Finding::is_error);
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

/// Validate the whole project snapshot. Rule order is fixed so that the
/// reported findings are stable across runs.
pub fn validate_project(snapshot: &Snapshot) -> ValidationResult {
    let graph = DependencyGraph::build(snapshot);
    let mut findings = Vec::new();

    // Errors (block export)
    cycles::v001_no_cycles(snapshot, &graph, &mut findings);
    naming::v002_unique_names(snapshot, &mut findings);
    naming::v003_valid_names(snapshot, &mut findings);
    naming::v004_named_components(snapshot, &mut findings);
    naming::v009_project_metadata(&snapshot.project, &mut findings);
    tracing::debug!(findings = findings.len(), "blocking rules done");

    // Warnings (export still allowed)
    completeness::v005_no_orphans(snapshot, &mut findings);
    completeness::v006_function_bodies(snapshot, &mut findings);
    completeness::v007_dataset_config(snapshot, &mut findings);
    completeness::v008_well_formed_connections(snapshot, &mut findings);
    tracing::debug!(findings = findings.len(), "advisory rules done");

    let result = ValidationResult::from_findings(findings);
    tracing::debug!(
        nodes = snapshot.nodes.len(),
        datasets = snapshot.datasets.len(),
        connections = snapshot.connections.len(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated project snapshot"
    );
    result
}
