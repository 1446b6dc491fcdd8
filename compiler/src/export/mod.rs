//! Export gate: validate, refuse on blocking errors, otherwise generate.

mod tree;

pub use tree::{FileNode, build_file_tree};

use crate::codegen::{CodegenOutput, generate_project};
use crate::error::ExportError;
use crate::parse::{self, Snapshot};
use crate::validate::{ValidationResult, validate_project};

/// A successful export: the generated files plus the warnings that did not
/// block it.
#[derive(Debug, Clone)]
pub struct ProjectExport {
    pub validation: ValidationResult,
    pub output: CodegenOutput,
}

/// Validate the snapshot and, when no finding blocks it, generate the full
/// project. Generation never runs on an invalid snapshot.
pub fn export_project(snapshot: &Snapshot) -> Result<ProjectExport, ExportError> {
    let project = snapshot.project.name.as_str();
    tracing::info!(project, nodes = snapshot.nodes.len(), "starting export");

    let validation = validate_project(snapshot);
    if !validation.is_valid {
        tracing::warn!(
            project,
            errors = validation.errors.len(),
            "export blocked by validation errors"
        );
        return Err(ExportError::Blocked {
            errors: validation.errors,
        });
    }

    let output = generate_project(snapshot);
    tracing::info!(
        project,
        files = output.files.len(),
        warnings = validation.warnings.len(),
        "export finished"
    );
    Ok(ProjectExport { validation, output })
}

/// Parse snapshot JSON, then export.
pub fn export_json(json: &str) -> Result<ProjectExport, ExportError> {
    let snapshot = parse::parse(json).map_err(ExportError::Parse)?;
    export_project(&snapshot)
}
