//! `pipeline.py`: the `create_pipeline` factory wiring every node.

use super::ProjectContext;
use super::helpers::{format_node_io, to_snake_case};
use super::writer::CodeWriter;

pub fn gen_pipeline_py(ctx: &ProjectContext<'_>) -> String {
    let mut w = CodeWriter::new();
    let functions: Vec<String> = ctx
        .snapshot
        .nodes
        .iter()
        .map(|n| to_snake_case(&n.name))
        .collect();

    w.line("\"\"\"");
    w.line(&format!("Pipeline definition for {} pipeline", ctx.pipeline));
    w.line(&format!(
        "generated using Kedro {}",
        ctx.snapshot.settings.kedro_version
    ));
    w.line("\"\"\"");
    w.blank();
    w.line("from kedro.pipeline import Node, Pipeline");
    if !functions.is_empty() {
        w.blank();
        w.line(&format!("from .nodes import {}", functions.join(", ")));
    }
    w.blank();
    w.blank();
    w.block_open("def create_pipeline(**kwargs) -> Pipeline");
    w.line(&format!("\"\"\"Create the {} pipeline.\"\"\"", ctx.pipeline));

    if functions.is_empty() {
        w.line("return Pipeline([])");
        w.block_close();
        return w.finish();
    }

    w.line("return Pipeline(");
    w.indent();
    w.line("[");
    w.indent();
    for (node, func) in ctx.snapshot.nodes.iter().zip(&functions) {
        let io = ctx.node_io(&node.id);
        w.line("Node(");
        w.indent();
        w.line(&format!("func={},", func));
        w.line(&format!("inputs={},", format_node_io(&io.inputs)));
        w.line(&format!("outputs={},", format_node_io(&io.outputs)));
        w.line(&format!("name=\"{}_node\",", func));
        w.dedent();
        w.line("),");
    }
    w.dedent();
    w.line("]");
    w.dedent();
    w.line(")");
    w.block_close();

    w.finish()
}
