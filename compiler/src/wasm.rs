//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::error::{CompilerError, ExportError};
use crate::export::{self, FileNode};
use crate::validate::{Finding, ValidationResult};

/// Validate a project snapshot JSON. Safe to call on every edit.
/// Returns `{status: "validated", errors, warnings, isValid}` or, when the
/// JSON cannot be parsed, `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn validate_project(json: &str) -> JsValue {
    let result = validate_project_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_project_inner(json: &str) -> ValidateResult {
    match crate::parse::parse(json) {
        Ok(snapshot) => ValidateResult::Validated(crate::validate::validate_project(&snapshot)),
        Err(errors) => ValidateResult::Errors {
            errors: errors.into_iter().map(ErrorDto::from).collect(),
        },
    }
}

/// Full pipeline: parse → validate → generate.
/// Returns a JSON object with either `files` (success) or `errors` (failure).
#[wasm_bindgen]
pub fn compile_project(json: &str) -> JsValue {
    let result = compile_project_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn compile_project_inner(json: &str) -> CompileResult {
    match export::export_json(json) {
        Ok(export) => CompileResult::Success {
            files: export
                .output
                .files
                .into_iter()
                .map(|f| FileDto {
                    path: f.path,
                    content: f.content,
                })
                .collect(),
            warnings: export.validation.warnings,
        },
        Err(err) => CompileResult::from(err),
    }
}

/// Like `compile_project`, but nests the files into a folder tree.
#[wasm_bindgen]
pub fn preview_project(json: &str) -> JsValue {
    let result = preview_project_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn preview_project_inner(json: &str) -> PreviewResult {
    match export::export_json(json) {
        Ok(export) => PreviewResult::Success {
            tree: export::build_file_tree(
                export
                    .output
                    .files
                    .iter()
                    .map(|f| (f.path.as_str(), f.content.as_str())),
            ),
            warnings: export.validation.warnings,
        },
        Err(err) => PreviewResult::Errors {
            errors: error_dtos(err),
        },
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    component_id: Option<String>,
}

impl From<CompilerError> for ErrorDto {
    fn from(e: CompilerError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            component_id: e.component_id,
        }
    }
}

fn error_dtos(err: ExportError) -> Vec<ErrorDto> {
    err.into_compiler_errors()
        .into_iter()
        .map(ErrorDto::from)
        .collect()
}

#[derive(Debug, serde::Serialize)]
struct FileDto {
    path: String,
    content: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum ValidateResult {
    Validated(ValidationResult),
    Errors { errors: Vec<ErrorDto> },
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum CompileResult {
    Success {
        files: Vec<FileDto>,
        warnings: Vec<Finding>,
    },
    Errors {
        errors: Vec<ErrorDto>,
    },
}

impl From<ExportError> for CompileResult {
    fn from(err: ExportError) -> Self {
        CompileResult::Errors {
            errors: error_dtos(err),
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum PreviewResult {
    Success {
        tree: Vec<FileNode>,
        warnings: Vec<Finding>,
    },
    Errors {
        errors: Vec<ErrorDto>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "project": { "name": "demo" },
        "nodes": [{ "id": "node-1", "name": "load_data", "functionCode": "return raw_data" }],
        "datasets": [{ "id": "dataset-1", "name": "raw_data", "type": "csv", "filepath": "data/01_raw/raw.csv" }],
        "connections": [{ "id": "c1", "source": "dataset-1", "target": "node-1" }]
    }"#;

    #[test]
    fn validate_reports_parse_errors() {
        let json = serde_json::to_value(validate_project_inner("[]")).unwrap();
        assert_eq!(json["status"], "errors");
        assert_eq!(json["errors"][0]["code"], "P001");
        assert_eq!(json["errors"][0]["phase"], "Parse");
    }

    #[test]
    fn validate_returns_findings() {
        let json = serde_json::to_value(validate_project_inner(VALID)).unwrap();
        assert_eq!(json["status"], "validated");
        assert_eq!(json["isValid"], true);
        assert_eq!(json["errors"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn compile_success_lists_files() {
        let json = serde_json::to_value(compile_project_inner(VALID)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["files"].as_array().unwrap().len(), 24);
        assert_eq!(json["files"][0]["path"], "pyproject.toml");
    }

    #[test]
    fn compile_blocked_maps_findings_to_errors() {
        let blocked = VALID.replace("load_data", "Unnamed Node");
        let json = serde_json::to_value(compile_project_inner(&blocked)).unwrap();
        assert_eq!(json["status"], "errors");
        assert_eq!(json["errors"][0]["code"], "V004");
        assert_eq!(json["errors"][0]["phase"], "Validate");
        assert_eq!(json["errors"][0]["componentId"], "node-1");
    }

    #[test]
    fn preview_nests_files() {
        let json = serde_json::to_value(preview_project_inner(VALID)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["tree"][0]["type"], "folder");
        assert_eq!(json["tree"][0]["name"], "conf");
    }
}
