//! Unified compiler error type used across all phases.

use crate::validate::Finding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Validate,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Validate => write!(f, "Validate"),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("[{phase}:{code}] {message}{}", component_suffix(.component_id))]
pub struct CompilerError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub component_id: Option<String>,
}

fn component_suffix(component_id: &Option<String>) -> String {
    match component_id {
        Some(id) => format!(" (component '{}')", id),
        None => String::new(),
    }
}

impl From<&Finding> for CompilerError {
    fn from(f: &Finding) -> Self {
        CompilerError {
            code: f.code.to_string(),
            phase: Phase::Validate,
            message: f.message.clone(),
            component_id: Some(f.component_id.clone()),
        }
    }
}

impl CompilerError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Parse,
            message: message.into(),
            component_id: None,
        }
    }
}

/// Why an export request produced no project.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("snapshot could not be parsed: {}", join_errors(.0))]
    Parse(Vec<CompilerError>),
    #[error("export blocked by {} validation error(s)", .errors.len())]
    Blocked { errors: Vec<Finding> },
}

fn join_errors(errors: &[CompilerError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ExportError {
    /// Flatten into compiler errors, the shape handed to the browser host.
    pub fn into_compiler_errors(self) -> Vec<CompilerError> {
        match self {
            ExportError::Parse(errors) => errors,
            ExportError::Blocked { errors } => errors.iter().map(CompilerError::from).collect(),
        }
    }
}
