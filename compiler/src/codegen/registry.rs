//! Package wiring: `pipeline_registry.py`, `settings.py` and the pipeline
//! package's `__init__.py`.

use super::ProjectContext;
use super::writer::CodeWriter;
use crate::parse::types::{DEFAULT_PIPELINE_NAME, DataLayer};

pub fn gen_pipeline_registry(ctx: &ProjectContext<'_>) -> String {
    let pipeline = &ctx.pipeline;
    let binding = format!("{}_pipeline", pipeline.trim_start_matches('_'));
    let mut w = CodeWriter::new();

    w.line("\"\"\"Project pipelines registry.");
    w.blank();
    w.line("This module registers all pipelines in the project. Each pipeline should be");
    w.line("imported and added to the dictionary returned by register_pipelines().");
    w.line("\"\"\"");
    w.blank();
    w.line("from typing import Dict");
    w.blank();
    w.line("from kedro.pipeline import Pipeline");
    w.blank();
    w.line(&format!("from {}.pipelines import {}", ctx.package, pipeline));
    w.blank();
    w.blank();
    w.block_open("def register_pipelines() -> Dict[str, Pipeline]");
    w.line("\"\"\"Register the project's pipelines.");
    w.blank();
    w.block_open("Returns");
    w.line("A mapping from pipeline names to Pipeline objects.");
    w.block_close();
    w.line("\"\"\"");
    w.line(&format!("{} = {}.create_pipeline()", binding, pipeline));
    w.blank();
    w.line("return {");
    w.indent();
    w.line(&format!("\"{}\": {},", DEFAULT_PIPELINE_NAME, binding));
    if pipeline != DEFAULT_PIPELINE_NAME {
        w.line(&format!("\"{}\": {},", pipeline, binding));
    }
    w.dedent();
    w.line("}");
    w.block_close();

    w.finish()
}

pub fn gen_settings_py() -> String {
    let mut w = CodeWriter::new();

    w.line("\"\"\"Project settings.");
    w.blank();
    w.line("This file configures Kedro's behavior for this project. You can override");
    w.line("default Kedro settings here.");
    w.line("\"\"\"");
    w.blank();
    w.line("from kedro.config import OmegaConfigLoader");
    w.blank();
    w.line("# Instantiate and list your project hooks here");
    w.line("HOOKS = ()");
    w.blank();
    w.line("# List the installed plugins for which to disable auto-registry");
    w.line("DISABLE_HOOKS_FOR_PLUGINS = ()");
    w.blank();
    w.line("# Define where to store data from different data layers");
    w.line("DATA_LAYER_MAPPING = {");
    w.indent();
    for layer in DataLayer::ALL {
        w.line(&format!("\"{}\": [\"{}\"],", layer.short_name(), layer.dir_name()));
    }
    w.dedent();
    w.line("}");
    w.blank();
    w.line("# Configure the OmegaConfigLoader");
    w.line("CONFIG_LOADER_CLASS = OmegaConfigLoader");
    w.line("CONFIG_LOADER_ARGS = {");
    w.indent();
    w.line("\"base_env\": \"base\",");
    w.line("\"default_run_env\": \"local\",");
    w.dedent();
    w.line("}");

    w.finish()
}

pub fn gen_pipeline_init(pipeline: &str) -> String {
    format!(
        "\"\"\"\n{pipeline} pipeline.\n\"\"\"\n\nfrom .pipeline import create_pipeline\n\n__all__ = [\"create_pipeline\"]\n"
    )
}
