//! `nodes.py`: one Python function per node.

use super::ProjectContext;
use super::helpers::{
    format_docstring_params, format_function_params, to_snake_case, type_hint_imports,
};
use super::writer::CodeWriter;
use crate::parse::types::Node;

pub fn gen_nodes_py(ctx: &ProjectContext<'_>) -> String {
    let mut w = CodeWriter::new();
    let settings = &ctx.snapshot.settings;

    w.line("\"\"\"");
    w.line(&format!("Node functions for the '{}' pipeline", ctx.pipeline));
    w.line(&format!("generated using Kedro {}", settings.kedro_version));
    w.line("\"\"\"");
    let imports = type_hint_imports(&settings.type_hint);
    if !imports.is_empty() {
        w.blank();
        for import in &imports {
            w.line(import);
        }
    }

    for node in &ctx.snapshot.nodes {
        w.blank();
        w.blank();
        emit_function(ctx, node, &mut w);
    }

    w.finish()
}

fn emit_function(ctx: &ProjectContext<'_>, node: &Node, w: &mut CodeWriter) {
    let type_hint = &ctx.snapshot.settings.type_hint;
    let io = ctx.node_io(&node.id);
    let func = to_snake_case(&node.name);

    let returns = match io.outputs.len() {
        0 => "None".to_string(),
        1 => type_hint.clone(),
        n => format!("tuple[{}]", vec![type_hint.as_str(); n].join(", ")),
    };
    w.block_open(&format!(
        "def {}({}) -> {}",
        func,
        format_function_params(&io.inputs, type_hint),
        returns
    ));

    // Docstring
    let summary = node
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(node.name.trim());
    w.line(&format!("\"\"\"{}", summary.replace("\"\"\"", "\\\"\\\"\\\"")));
    if !io.inputs.is_empty() {
        w.blank();
        w.block_open("Args");
        for entry in format_docstring_params(&io.inputs) {
            w.line(&entry);
        }
        w.block_close();
    }
    if !io.outputs.is_empty() {
        w.blank();
        w.block_open("Returns");
        w.line(&io.outputs.join(", "));
        w.block_close();
    }
    w.line("\"\"\"");

    match node.function_code.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(code) => w.embed(code),
        None => {
            w.line("# TODO: implement this node");
            w.line(&format!("raise NotImplementedError(\"{}\")", func));
        }
    }
    w.block_close();
}
