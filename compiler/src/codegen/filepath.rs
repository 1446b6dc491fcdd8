//! Split and join catalog file locations of the form `base/layer/file`.

use crate::parse::types::DataLayer;

pub const DEFAULT_BASE: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilepathParts {
    pub base_location: String,
    pub data_layer: String,
    pub file_name: String,
}

/// `data/01_raw/companies.csv`, `01_raw/companies.csv` and `companies.csv`
/// all parse to the same parts; missing segments take the defaults.
pub fn parse_filepath(filepath: &str) -> FilepathParts {
    let parts: Vec<&str> = filepath.trim().split('/').filter(|p| !p.is_empty()).collect();
    let (base, layer, file) = match parts.as_slice() {
        [] => (DEFAULT_BASE, DataLayer::Raw.dir_name(), String::new()),
        [file] => (DEFAULT_BASE, DataLayer::Raw.dir_name(), file.to_string()),
        [layer, file] => (DEFAULT_BASE, *layer, file.to_string()),
        [base, layer, rest @ ..] => (*base, *layer, rest.join("/")),
    };
    FilepathParts {
        base_location: base.to_string(),
        data_layer: layer.to_string(),
        file_name: file,
    }
}

/// Join location parts. Empty when there is no file name.
pub fn build_filepath(base_location: &str, data_layer: &str, file_name: &str) -> String {
    let base = match base_location.trim() {
        "" => DEFAULT_BASE,
        b => b,
    };
    let file = file_name.trim();
    if file.is_empty() {
        return String::new();
    }
    format!("{}/{}/{}", base, data_layer.trim(), file)
}

impl FilepathParts {
    pub fn to_filepath(&self) -> String {
        build_filepath(&self.base_location, &self.data_layer, &self.file_name)
    }
}
