//! Integration tests for the codegen pass.

mod helpers;

use pipeline_compiler::codegen::generate_project;

const PIPELINE_DIR: &str = "src/demo_project/pipelines/__default__";

#[test]
fn single_node_pipeline_py_snapshot() {
    let output = generate_project(&helpers::single_node_snapshot());
    let pipeline = output
        .get(&format!("{PIPELINE_DIR}/pipeline.py"))
        .expect("pipeline.py should be generated");

    insta::assert_snapshot!(pipeline, @r#"
    """
    Pipeline definition for __default__ pipeline
    generated using Kedro 1.0.0
    """

    from kedro.pipeline import Node, Pipeline

    from .nodes import load_data


    def create_pipeline(**kwargs) -> Pipeline:
        """Create the __default__ pipeline."""
        return Pipeline(
            [
                Node(
                    func=load_data,
                    inputs="raw_data",
                    outputs="processed_data",
                    name="load_data_node",
                ),
            ]
        )
    "#);
}

#[test]
fn single_node_nodes_py_snapshot() {
    let output = generate_project(&helpers::single_node_snapshot());
    let nodes = output
        .get(&format!("{PIPELINE_DIR}/nodes.py"))
        .expect("nodes.py should be generated");

    insta::assert_snapshot!(nodes, @r#"
    """
    Node functions for the '__default__' pipeline
    generated using Kedro 1.0.0
    """

    import pandas as pd


    def load_data(raw_data: pd.DataFrame) -> pd.DataFrame:
        """load_data

        Args:
            raw_data: Input raw_data

        Returns:
            processed_data
        """
        return raw_data
    "#);
}

#[test]
fn single_node_catalog_snapshot() {
    let output = generate_project(&helpers::single_node_snapshot());
    let catalog = output
        .get("conf/base/catalog.yml")
        .expect("catalog.yml should be generated");

    insta::assert_snapshot!(catalog, @r#"
    # Data catalog
    #
    # Every dataset read or written by a node is registered here. Datasets
    # left out of this file are held in memory for the duration of a run.
    #
    # Documentation: https://docs.kedro.org/en/stable/catalog-data/data_catalog/

    raw_data:
      type: pandas.CSVDataset
      filepath: data/01_raw/raw_data.csv
      metadata:
        kedro-viz:
          layer: raw

    processed_data:
      type: pandas.ParquetDataset
      filepath: data/02_intermediate/processed_data.parquet
      metadata:
        kedro-viz:
          layer: intermediate
    "#);
}

#[test]
fn pipeline_io_encoding_is_singular_or_list() {
    let snapshot = helpers::SnapshotBuilder::new("demo")
        .node("node-1", "merge_data")
        .dataset("dataset-1", "data1", pipeline_compiler::parse::DatasetType::Csv)
        .dataset("dataset-2", "data2", pipeline_compiler::parse::DatasetType::Csv)
        .dataset("dataset-3", "result", pipeline_compiler::parse::DatasetType::Parquet)
        .link("dataset-1", "node-1")
        .link("dataset-2", "node-1")
        .link("node-1", "dataset-3")
        .build();

    let output = generate_project(&snapshot);
    let pipeline = output
        .get("src/demo/pipelines/__default__/pipeline.py")
        .unwrap();
    assert!(pipeline.contains(r#"inputs=["data1", "data2"]"#));
    assert!(pipeline.contains(r#"outputs="result""#));
}

#[test]
fn registry_and_settings_land_in_the_package() {
    let output = generate_project(&helpers::single_node_snapshot());
    let registry = output
        .get("src/demo_project/pipeline_registry.py")
        .unwrap();
    assert!(registry.contains("from demo_project.pipelines import __default__"));
    let settings = output.get("src/demo_project/settings.py").unwrap();
    assert!(settings.contains("DATA_LAYER_MAPPING"));
    let init = output
        .get(&format!("{PIPELINE_DIR}/__init__.py"))
        .unwrap();
    assert!(init.contains("__all__ = [\"create_pipeline\"]"));
}

#[test]
fn directory_keepers_are_empty() {
    let output = generate_project(&helpers::single_node_snapshot());
    let keepers: Vec<&str> = output
        .paths()
        .filter(|p| p.ends_with(".gitkeep"))
        .collect();
    assert_eq!(keepers.len(), 9);
    assert!(keepers.iter().all(|p| output.get(p) == Some("")));
}

#[test]
fn pyproject_names_the_package() {
    let output = generate_project(&helpers::single_node_snapshot());
    let toml = output.get("pyproject.toml").unwrap();
    assert!(toml.starts_with("[build-system]\nrequires = [\"setuptools\"]\n"));
    assert!(toml.contains("name = \"demo_project\"\n"));
    assert!(toml.contains("demo-project = \"demo_project.__main__:main\"\n"));
    assert!(toml.contains("attr = \"demo_project.__version__\""));
}
