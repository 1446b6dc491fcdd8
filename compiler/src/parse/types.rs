//! Rust types mirroring the editor's entity store.
//!
//! These types are the serde target for the snapshot JSON handed over by the
//! canvas. Node inputs/outputs are never read from here; they are derived from
//! connections in `parse::graph`.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const NODE_ID_PREFIX: &str = "node-";
pub const DATASET_ID_PREFIX: &str = "dataset-";

/// Placeholder names given to freshly dropped components.
pub const UNNAMED_NODE: &str = "Unnamed Node";
pub const UNNAMED_DATASET: &str = "Unnamed Dataset";

pub const DEFAULT_PIPELINE_NAME: &str = "__default__";

// =============================================================================
// SNAPSHOT
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub project: ProjectMetadata,
    #[serde(default, deserialize_with = "entity_list")]
    pub nodes: Vec<Node>,
    #[serde(default, deserialize_with = "entity_list")]
    pub datasets: Vec<Dataset>,
    #[serde(default, deserialize_with = "entity_list")]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub settings: ExportSettings,
}

impl Snapshot {
    pub fn new(project: ProjectMetadata) -> Self {
        Snapshot {
            project,
            nodes: Vec::new(),
            datasets: Vec::new(),
            connections: Vec::new(),
            settings: ExportSettings::default(),
        }
    }
}

/// The store keeps each collection either as a plain array or normalized as
/// `{ byId, allIds }`. Both flatten to a `Vec` in `allIds` order.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntityCollection<T> {
    List(Vec<T>),
    Normalized {
        #[serde(rename = "byId")]
        by_id: HashMap<String, T>,
        #[serde(rename = "allIds")]
        all_ids: Vec<String>,
    },
}

fn entity_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match EntityCollection::<T>::deserialize(deserializer)? {
        EntityCollection::List(items) => items,
        EntityCollection::Normalized { mut by_id, all_ids } => all_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect(),
    })
}

// =============================================================================
// PROJECT METADATA + SETTINGS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub name: String,
    #[serde(default)]
    pub python_package: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_pipeline_name")]
    pub pipeline_name: String,
}

fn default_pipeline_name() -> String {
    DEFAULT_PIPELINE_NAME.to_string()
}

impl ProjectMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        ProjectMetadata {
            name: name.into(),
            python_package: None,
            description: String::new(),
            pipeline_name: default_pipeline_name(),
        }
    }

    /// The Python package directory under `src/`. An explicit package wins,
    /// otherwise it is derived from the project name.
    pub fn package_name(&self) -> String {
        match self.python_package.as_deref().map(str::trim) {
            Some(pkg) if !pkg.is_empty() => pkg.to_string(),
            _ => derive_package_name(&self.name),
        }
    }
}

/// `my-first Project` -> `my_first_project`.
pub fn derive_package_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub kedro_version: String,
    pub python_requires: String,
    /// Annotation used for every generated function parameter.
    pub type_hint: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            kedro_version: "1.0.0".into(),
            python_requires: ">=3.9".into(),
            type_hint: "pd.DataFrame".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    DataIngestion,
    DataProcessing,
    ModelTraining,
    ModelEvaluation,
    #[default]
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub category: NodeCategory,
    pub function_code: Option<String>,
    pub description: Option<String>,
    pub parameters: Option<Map<String, Value>>,
    #[serde(default)]
    pub position: Position,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            name: name.into(),
            category: NodeCategory::default(),
            function_code: None,
            description: None,
            parameters: None,
            position: Position::default(),
        }
    }
}

// =============================================================================
// DATASETS
// =============================================================================

/// Storage/serialization formats offered by the dataset palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetType {
    // Pandas
    Csv,
    Parquet,
    Json,
    Excel,
    Feather,
    Hdf,
    SqlTable,
    SqlQuery,
    GbqTable,
    GbqQuery,
    // Spark
    SparkDataframe,
    SparkHive,
    SparkJdbc,
    DeltaTable,
    Pickle,
    // Text
    Text,
    Yaml,
    Xml,
    // Image & visualization
    Image,
    Matplotlib,
    PlotlyJson,
    Video,
    Holoviews,
    // Graph
    NetworkxJson,
    NetworkxGml,
    NetworkxGraphml,
    // Polars / Dask
    PolarsCsv,
    PolarsParquet,
    PolarsLazy,
    DaskParquet,
    DaskCsv,
    Geojson,
    // Models
    Tensorflow,
    Pytorch,
    HuggingfaceDataset,
    HuggingfaceModel,
    // Misc
    Api,
    Tracking,
    Biosequence,
    Matlab,
    IbisTable,
    Memory,
}

impl DatasetType {
    /// In-memory datasets live only for one run: no location, no catalog entry.
    pub fn is_in_memory(self) -> bool {
        self == DatasetType::Memory
    }
}

/// Conventional pipeline-stage directories under `data/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataLayer {
    #[serde(rename = "01_raw")]
    Raw,
    #[serde(rename = "02_intermediate")]
    Intermediate,
    #[serde(rename = "03_primary")]
    Primary,
    #[serde(rename = "04_feature")]
    Feature,
    #[serde(rename = "05_model_input")]
    ModelInput,
    #[serde(rename = "06_models")]
    Models,
    #[serde(rename = "07_model_output")]
    ModelOutput,
    #[serde(rename = "08_reporting")]
    Reporting,
}

impl DataLayer {
    pub const ALL: [DataLayer; 8] = [
        DataLayer::Raw,
        DataLayer::Intermediate,
        DataLayer::Primary,
        DataLayer::Feature,
        DataLayer::ModelInput,
        DataLayer::Models,
        DataLayer::ModelOutput,
        DataLayer::Reporting,
    ];

    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.dir_name() == name)
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            DataLayer::Raw => "01_raw",
            DataLayer::Intermediate => "02_intermediate",
            DataLayer::Primary => "03_primary",
            DataLayer::Feature => "04_feature",
            DataLayer::ModelInput => "05_model_input",
            DataLayer::Models => "06_models",
            DataLayer::ModelOutput => "07_model_output",
            DataLayer::Reporting => "08_reporting",
        }
    }

    /// Layer label used by kedro-viz and `DATA_LAYER_MAPPING`.
    pub fn short_name(self) -> &'static str {
        match self {
            DataLayer::Raw => "raw",
            DataLayer::Intermediate => "intermediate",
            DataLayer::Primary => "primary",
            DataLayer::Feature => "feature",
            DataLayer::ModelInput => "model_input",
            DataLayer::Models => "models",
            DataLayer::ModelOutput => "model_output",
            DataLayer::Reporting => "reporting",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub dataset_type: Option<DatasetType>,
    pub filepath: Option<String>,
    pub layer: Option<DataLayer>,
    #[serde(default)]
    pub versioned: bool,
    pub catalog_config: Option<Map<String, Value>>,
    pub description: Option<String>,
    #[serde(default)]
    pub position: Position,
}

impl Dataset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, dataset_type: DatasetType) -> Self {
        Dataset {
            id: id.into(),
            name: name.into(),
            dataset_type: Some(dataset_type),
            filepath: None,
            layer: None,
            versioned: false,
            catalog_config: None,
            description: None,
            position: Position::default(),
        }
    }

    /// Trimmed location, `None` when absent or blank.
    pub fn location(&self) -> Option<&str> {
        self.filepath
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// =============================================================================
// CONNECTIONS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
    pub label: Option<String>,
}

impl Connection {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Connection {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: Some("output".into()),
            target_handle: Some("input".into()),
            label: None,
        }
    }

    /// The bipartite meaning of this edge, or `None` for node→node,
    /// dataset→dataset, or unrecognised endpoints.
    pub fn link(&self) -> Option<Link<'_>> {
        match (Endpoint::classify(&self.source)?, Endpoint::classify(&self.target)?) {
            (Endpoint::Node(node), Endpoint::Dataset(dataset)) => {
                Some(Link::Produces { node, dataset })
            }
            (Endpoint::Dataset(dataset), Endpoint::Node(node)) => {
                Some(Link::Consumes { dataset, node })
            }
            _ => None,
        }
    }
}

/// One end of a connection. Id prefixes are only interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint<'a> {
    Node(&'a str),
    Dataset(&'a str),
}

impl<'a> Endpoint<'a> {
    pub fn classify(id: &'a str) -> Option<Self> {
        if id.starts_with(NODE_ID_PREFIX) {
            Some(Endpoint::Node(id))
        } else if id.starts_with(DATASET_ID_PREFIX) {
            Some(Endpoint::Dataset(id))
        } else {
            None
        }
    }

    pub fn id(&self) -> &'a str {
        match *self {
            Endpoint::Node(id) | Endpoint::Dataset(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link<'a> {
    /// node writes dataset
    Produces { node: &'a str, dataset: &'a str },
    /// dataset feeds node
    Consumes { dataset: &'a str, node: &'a str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_prefix() {
        assert_eq!(Endpoint::classify("node-1"), Some(Endpoint::Node("node-1")));
        assert_eq!(
            Endpoint::classify("dataset-7"),
            Some(Endpoint::Dataset("dataset-7"))
        );
        assert_eq!(Endpoint::classify("edge-1"), None);
    }

    #[test]
    fn link_rejects_same_kind_edges() {
        assert_eq!(Connection::new("c1", "node-1", "node-2").link(), None);
        assert_eq!(Connection::new("c2", "dataset-1", "dataset-2").link(), None);
        assert_eq!(
            Connection::new("c3", "node-1", "dataset-2").link(),
            Some(Link::Produces {
                node: "node-1",
                dataset: "dataset-2"
            })
        );
        assert_eq!(
            Connection::new("c4", "dataset-2", "node-1").link(),
            Some(Link::Consumes {
                dataset: "dataset-2",
                node: "node-1"
            })
        );
    }

    #[test]
    fn package_name_derivation() {
        assert_eq!(derive_package_name("my-first-project"), "my_first_project");
        assert_eq!(derive_package_name(" Sales Forecast "), "sales_forecast");

        let mut meta = ProjectMetadata::new("spaceflights-demo");
        assert_eq!(meta.package_name(), "spaceflights_demo");
        meta.python_package = Some("flights".into());
        assert_eq!(meta.package_name(), "flights");
    }

    #[test]
    fn dataset_type_tags() {
        let t: DatasetType = serde_json::from_str("\"networkx_graphml\"").unwrap();
        assert_eq!(t, DatasetType::NetworkxGraphml);
        let t: DatasetType = serde_json::from_str("\"spark_dataframe\"").unwrap();
        assert_eq!(t, DatasetType::SparkDataframe);
        assert!(DatasetType::Memory.is_in_memory());
        assert!(!DatasetType::Csv.is_in_memory());
    }

    #[test]
    fn data_layer_tags_round_trip() {
        for layer in DataLayer::ALL {
            let json = serde_json::to_string(&layer).unwrap();
            assert_eq!(json, format!("\"{}\"", layer.dir_name()));
        }
    }

    #[test]
    fn normalized_collections_follow_all_ids() {
        let json = r#"{
            "project": { "name": "demo" },
            "nodes": {
                "byId": {
                    "node-2": { "id": "node-2", "name": "second" },
                    "node-1": { "id": "node-1", "name": "first" }
                },
                "allIds": ["node-1", "node-2", "node-ghost"]
            }
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["node-1", "node-2"]);
        assert!(snapshot.datasets.is_empty());
        assert_eq!(snapshot.project.pipeline_name, DEFAULT_PIPELINE_NAME);
        assert_eq!(snapshot.settings, ExportSettings::default());
    }
}
