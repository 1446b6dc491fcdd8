//! `conf/base/catalog.yml` generation.
//!
//! One entry per persisted dataset. In-memory datasets are omitted: Kedro
//! creates a `MemoryDataset` for any name missing from the catalog.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::filepath::parse_filepath;
use super::helpers::{escape_yaml_string, infer_data_layer};
use super::writer::CodeWriter;
use crate::parse::types::{DataLayer, Dataset, DatasetType, Snapshot};

/// How a dataset type maps onto a `kedro-datasets` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KedroDataset {
    pub class: &'static str,
    /// Default file extension, empty for non-file backends.
    pub extension: &'static str,
    /// Catalog key that holds the dataset's location.
    pub location_key: &'static str,
    /// `kedro-datasets` optional-dependency group, when one exists.
    pub extra: Option<&'static str>,
}

const fn file(class: &'static str, extension: &'static str, extra: Option<&'static str>) -> KedroDataset {
    KedroDataset { class, extension, location_key: "filepath", extra }
}

const fn keyed(class: &'static str, location_key: &'static str, extra: Option<&'static str>) -> KedroDataset {
    KedroDataset { class, extension: "", location_key, extra }
}

pub fn kedro_dataset(kind: DatasetType) -> KedroDataset {
    use DatasetType::*;
    match kind {
        Csv => file("pandas.CSVDataset", ".csv", Some("pandas-csvdataset")),
        Parquet => file("pandas.ParquetDataset", ".parquet", Some("pandas-parquetdataset")),
        Json => file("pandas.JSONDataset", ".json", Some("pandas-jsondataset")),
        Excel => file("pandas.ExcelDataset", ".xlsx", Some("pandas-exceldataset")),
        Feather => file("pandas.FeatherDataset", ".feather", Some("pandas-featherdataset")),
        Hdf => file("pandas.HDFDataset", ".h5", Some("pandas-hdfdataset")),
        SqlTable => keyed("pandas.SQLTableDataset", "table_name", Some("pandas-sqltabledataset")),
        SqlQuery => keyed("pandas.SQLQueryDataset", "sql", Some("pandas-sqlquerydataset")),
        GbqTable => keyed("pandas.GBQTableDataset", "table_name", Some("pandas-gbqtabledataset")),
        GbqQuery => keyed("pandas.GBQQueryDataset", "sql", Some("pandas-gbqquerydataset")),
        SparkDataframe => file("spark.SparkDataset", ".parquet", Some("spark-sparkdataset")),
        SparkHive => keyed("spark.SparkHiveDataset", "table", Some("spark-sparkhivedataset")),
        SparkJdbc => keyed("spark.SparkJDBCDataset", "url", Some("spark-sparkjdbcdataset")),
        DeltaTable => file("pandas.DeltaTableDataset", "", Some("pandas-deltatabledataset")),
        Pickle => file("pickle.PickleDataset", ".pkl", Some("pickle-pickledataset")),
        Text => file("text.TextDataset", ".txt", None),
        Yaml => file("yaml.YAMLDataset", ".yml", Some("yaml-yamldataset")),
        Xml => file("pandas.XMLDataset", ".xml", Some("pandas-xmldataset")),
        Image => file("pillow.ImageDataset", ".png", Some("pillow-imagedataset")),
        Matplotlib => file("matplotlib.MatplotlibWriter", ".png", Some("matplotlib-matplotlibwriter")),
        PlotlyJson => file("plotly.JSONDataset", ".json", Some("plotly-jsondataset")),
        Video => file("video.VideoDataset", ".mp4", Some("video-videodataset")),
        Holoviews => file("holoviews.HoloviewsWriter", ".png", Some("holoviews-holoviewswriter")),
        NetworkxJson => file("networkx.JSONDataset", ".json", Some("networkx-jsondataset")),
        NetworkxGml => file("networkx.GMLDataset", ".gml", Some("networkx-gmldataset")),
        NetworkxGraphml => file("networkx.GraphMLDataset", ".graphml", Some("networkx-graphmldataset")),
        PolarsCsv => file("polars.CSVDataset", ".csv", Some("polars-csvdataset")),
        PolarsParquet => file("polars.EagerPolarsDataset", ".parquet", Some("polars-eagerpolarsdataset")),
        PolarsLazy => file("polars.LazyPolarsDataset", ".parquet", Some("polars-lazypolarsdataset")),
        DaskParquet => file("dask.ParquetDataset", ".parquet", Some("dask-parquetdataset")),
        DaskCsv => file("dask.CSVDataset", ".csv", Some("dask-csvdataset")),
        Geojson => file("geopandas.GeoJSONDataset", ".geojson", Some("geopandas-geojsondataset")),
        Tensorflow => file("tensorflow.TensorFlowModelDataset", ".h5", Some("tensorflow-tensorflowmodeldataset")),
        Pytorch => file("pickle.PickleDataset", ".pt", Some("pickle-pickledataset")),
        HuggingfaceDataset => keyed("huggingface.HFDataset", "dataset_name", Some("huggingface-hfdataset")),
        HuggingfaceModel => keyed(
            "huggingface.HFTransformerPipelineDataset",
            "model_name",
            Some("huggingface-hftransformerpipelinedataset"),
        ),
        Api => keyed("api.APIDataset", "url", Some("api-apidataset")),
        Tracking => file("tracking.MetricsDataset", ".json", None),
        Biosequence => file("biosequence.BioSequenceDataset", ".fasta", Some("biosequence-biosequencedataset")),
        Matlab => file("matlab.MatlabDataset", ".mat", Some("matlab-matlabdataset")),
        IbisTable => keyed("ibis.TableDataset", "table_name", None),
        Memory => keyed("MemoryDataset", "", None),
    }
}

/// Keys written by the generator itself; the same keys in a dataset's
/// extra configuration are ignored.
const RESERVED_KEYS: [&str; 12] = [
    "type", "filepath", "table_name", "table", "sql", "url", "dataset_name", "model_name",
    "versioned", "metadata", "layer", "credentials_key",
];

/// Explicit layer, else the layer directory in the location, else one
/// inferred from the dataset name.
pub fn dataset_layer(dataset: &Dataset) -> DataLayer {
    dataset
        .layer
        .or_else(|| {
            let location = dataset.location()?;
            DataLayer::from_dir_name(&parse_filepath(location).data_layer)
        })
        .unwrap_or_else(|| infer_data_layer(&dataset.name))
}

/// The location written to the catalog. File datasets without one default
/// to `data/<layer>/<name><ext>`.
pub fn dataset_location(dataset: &Dataset, spec: &KedroDataset) -> Option<String> {
    if let Some(location) = dataset.location() {
        return Some(location.to_string());
    }
    if spec.location_key != "filepath" {
        return None;
    }
    Some(format!(
        "data/{}/{}{}",
        dataset_layer(dataset).dir_name(),
        dataset.name.trim(),
        spec.extension
    ))
}

pub fn gen_catalog_yml(snapshot: &Snapshot) -> String {
    let mut w = CodeWriter::yaml();
    w.line("# Data catalog");
    w.line("#");
    w.line("# Every dataset read or written by a node is registered here. Datasets");
    w.line("# left out of this file are held in memory for the duration of a run.");
    w.line("#");
    w.line("# Documentation: https://docs.kedro.org/en/stable/catalog-data/data_catalog/");

    let mut entries = 0;
    for dataset in &snapshot.datasets {
        let name = dataset.name.trim();
        let Some(kind) = dataset.dataset_type else {
            w.blank();
            w.line(&format!("# {}: dataset type not configured", name));
            continue;
        };
        if kind.is_in_memory() {
            continue;
        }
        w.blank();
        emit_entry(dataset, kind, &mut w);
        entries += 1;
    }

    if entries == 0 {
        w.blank();
        w.line("# No persisted datasets yet.");
    }

    w.finish()
}

fn emit_entry(dataset: &Dataset, kind: DatasetType, w: &mut CodeWriter) {
    let spec = kedro_dataset(kind);

    if let Some(description) = dataset.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        for line in description.lines().map(str::trim) {
            if line.is_empty() {
                w.line("#");
            } else {
                w.line(&format!("# {}", line));
            }
        }
    }

    w.block_open(dataset.name.trim());
    w.line(&format!("type: {}", spec.class));
    if let Some(location) = dataset_location(dataset, &spec) {
        w.line(&format!("{}: {}", spec.location_key, escape_yaml_string(&location)));
    }
    if dataset.versioned {
        w.line("versioned: true");
    }

    if let Some(config) = &dataset.catalog_config {
        let extras: Map<String, Value> = config
            .iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        emit_mapping(&extras, w);
    }

    w.block_open("metadata");
    w.block_open("kedro-viz");
    w.line(&format!("layer: {}", dataset_layer(dataset).short_name()));
    w.block_close();
    w.block_close();
    w.block_close();
}

/// Render a JSON object as block-style YAML with sorted keys. Nested
/// objects become nested blocks; arrays use JSON flow syntax.
pub fn emit_mapping(map: &Map<String, Value>, w: &mut CodeWriter) {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    for key in keys {
        let value = &map[key];
        let key = escape_yaml_string(key);
        match value {
            Value::Object(inner) if !inner.is_empty() => {
                w.block_open(&key);
                emit_mapping(inner, w);
                w.block_close();
            }
            other => w.line(&format!("{}: {}", key, yaml_scalar(other))),
        }
    }
}

/// Plain scalars a YAML 1.1 loader (PyYAML) resolves to null, bool, number
/// or timestamp instead of a string.
static NON_STRING_SCALAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:~|null|Null|NULL",
        r"|true|True|TRUE|false|False|FALSE|yes|Yes|YES|no|No|NO|on|On|ON|off|Off|OFF|y|Y|n|N",
        r"|[-+]?(?:[0-9][0-9_]*)?\.?[0-9][0-9_]*(?:[eE][-+]?[0-9]+)?",
        r"|[-+]?[0-9][0-9_]*\.[0-9_]*(?:[eE][-+]?[0-9]+)?",
        r"|0x[0-9a-fA-F_]+|0o?[0-7_]+",
        r"|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN)",
        r"|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:[Tt ].*)?)$",
    ))
    .expect("valid YAML scalar pattern")
});

fn yaml_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if NON_STRING_SCALAR.is_match(s) => format!("\"{}\"", s),
        Value::String(s) => escape_yaml_string(s),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
