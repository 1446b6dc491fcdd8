//! Codegen pass: validated snapshot → Kedro project file tree.
//!
//! Public API: `generate_project(snapshot) -> CodegenOutput`

mod writer;
pub mod helpers;
pub mod filepath;
pub mod catalog;
mod nodes;
mod pipeline;
mod manifest;
mod registry;
mod files;

use std::collections::{BTreeMap, HashMap};

use crate::parse::graph::{NodeIo, resolve_node_io};
use crate::parse::types::{DataLayer, Snapshot};

pub use writer::CodeWriter;

/// A generated file with its path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// The complete output of the codegen pass.
#[derive(Debug, Clone)]
pub struct CodegenOutput {
    pub files: Vec<GeneratedFile>,
}

impl CodegenOutput {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.as_str())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    /// The path → content map handed to archive writers and previews.
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.files.into_iter().map(|f| (f.path, f.content)).collect()
    }
}

static NO_IO: NodeIo = NodeIo {
    inputs: Vec::new(),
    outputs: Vec::new(),
};

/// Values every generator needs, computed once per export.
pub struct ProjectContext<'a> {
    pub snapshot: &'a Snapshot,
    pub package: String,
    pub pipeline: String,
    io: HashMap<String, NodeIo>,
}

impl<'a> ProjectContext<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        ProjectContext {
            snapshot,
            package: snapshot.project.package_name(),
            pipeline: snapshot.project.pipeline_name.trim().to_string(),
            io: resolve_node_io(snapshot),
        }
    }

    /// Derived dataset names for a node. Unknown ids have no I/O.
    pub fn node_io(&self, node_id: &str) -> &NodeIo {
        self.io.get(node_id).unwrap_or(&NO_IO)
    }
}

/// Generate the complete Kedro project for a snapshot that passed
/// validation. Files are emitted in a fixed order.
pub fn generate_project(snapshot: &Snapshot) -> CodegenOutput {
    let ctx = ProjectContext::new(snapshot);
    let pkg = format!("src/{}", ctx.package);
    let pipeline_dir = format!("{}/pipelines/{}", pkg, ctx.pipeline);
    let mut output_files = Vec::new();
    let mut emit = |path: String, content: String| {
        output_files.push(GeneratedFile { path, content });
    };

    // Root
    emit("pyproject.toml".into(), manifest::gen_pyproject_toml(&ctx));
    emit("README.md".into(), files::gen_readme(&ctx));
    emit(".gitignore".into(), files::gen_gitignore());

    // conf/
    emit("conf/base/catalog.yml".into(), catalog::gen_catalog_yml(snapshot));
    emit("conf/base/parameters.yml".into(), files::gen_parameters_yml(&ctx));
    emit("conf/base/logging.yml".into(), files::gen_logging_yml(&ctx));
    emit("conf/local/credentials.yml".into(), files::gen_credentials_yml());

    // src/<package>/
    emit(format!("{pkg}/__init__.py"), files::gen_package_init(&ctx));
    emit(format!("{pkg}/__main__.py"), files::gen_main_py(&ctx));
    emit(format!("{pkg}/settings.py"), registry::gen_settings_py());
    emit(format!("{pkg}/pipeline_registry.py"), registry::gen_pipeline_registry(&ctx));
    emit(format!("{pkg}/pipelines/__init__.py"), files::gen_pipelines_init());
    emit(format!("{pipeline_dir}/__init__.py"), registry::gen_pipeline_init(&ctx.pipeline));
    emit(format!("{pipeline_dir}/nodes.py"), nodes::gen_nodes_py(&ctx));
    emit(format!("{pipeline_dir}/pipeline.py"), pipeline::gen_pipeline_py(&ctx));

    // data/ and logs/
    for layer in DataLayer::ALL {
        emit(format!("data/{}/.gitkeep", layer.dir_name()), files::gen_gitkeep());
    }
    emit("logs/.gitkeep".into(), files::gen_gitkeep());

    tracing::debug!(
        package = %ctx.package,
        pipeline = %ctx.pipeline,
        files = output_files.len(),
        "generated project files"
    );

    CodegenOutput {
        files: output_files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::*;

    #[test]
    fn generate_project_produces_all_files() {
        let mut meta = ProjectMetadata::new("demo-project");
        meta.pipeline_name = "etl".into();
        let output = generate_project(&Snapshot::new(meta));
        let paths: Vec<&str> = output.paths().collect();

        assert_eq!(paths.len(), 24);
        assert_eq!(paths[0], "pyproject.toml");
        for expected in [
            "README.md",
            ".gitignore",
            "conf/base/catalog.yml",
            "conf/base/parameters.yml",
            "conf/base/logging.yml",
            "conf/local/credentials.yml",
            "src/demo_project/__init__.py",
            "src/demo_project/__main__.py",
            "src/demo_project/settings.py",
            "src/demo_project/pipeline_registry.py",
            "src/demo_project/pipelines/__init__.py",
            "src/demo_project/pipelines/etl/__init__.py",
            "src/demo_project/pipelines/etl/nodes.py",
            "src/demo_project/pipelines/etl/pipeline.py",
            "data/01_raw/.gitkeep",
            "data/08_reporting/.gitkeep",
            "logs/.gitkeep",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn output_is_deterministic() {
        let mut s = Snapshot::new(ProjectMetadata::new("demo"));
        s.nodes.push(Node::new("node-1", "Load"));
        s.datasets.push(Dataset::new("dataset-1", "raw", DatasetType::Csv));
        s.connections.push(Connection::new("c1", "dataset-1", "node-1"));
        assert_eq!(
            generate_project(&s).into_map(),
            generate_project(&s).into_map()
        );
    }
}
