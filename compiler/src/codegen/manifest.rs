//! `pyproject.toml` generation. Depends only on project metadata, settings
//! and which dataset backends are in use.

use std::collections::BTreeSet;

use super::ProjectContext;
use super::catalog::kedro_dataset;

/// `kedro-datasets` extras installed even when the graph uses none.
const BASE_EXTRAS: [&str; 3] = ["pandas-csvdataset", "pandas-exceldataset", "pandas-parquetdataset"];

pub fn gen_pyproject_toml(ctx: &ProjectContext<'_>) -> String {
    let project = ctx.snapshot.project.name.trim();
    let package = &ctx.package;
    let settings = &ctx.snapshot.settings;
    let version = &settings.kedro_version;

    let mut extras: BTreeSet<&str> = BASE_EXTRAS.into_iter().collect();
    extras.extend(
        ctx.snapshot
            .datasets
            .iter()
            .filter_map(|d| d.dataset_type)
            .filter_map(|kind| kedro_dataset(kind).extra),
    );
    let extras = extras.into_iter().collect::<Vec<_>>().join(", ");

    format!(
        r#"[build-system]
requires = ["setuptools"]
build-backend = "setuptools.build_meta"

[project]
requires-python = "{requires}"
name = "{package}"
readme = "README.md"
dynamic = ["version"]
dependencies = [
    "ipython>=8.10",
    "jupyterlab>=3.0",
    "notebook",
    "kedro[jupyter]~={version}",
    "kedro-datasets[{extras}]>=3.0",
    "kedro-viz>=6.7.0",
]

[project.scripts]
{project} = "{package}.__main__:main"

[project.entry-points."kedro.hooks"]

[tool.kedro]
package_name = "{package}"
project_name = "{project}"
kedro_init_version = "{version}"
tools = "['None']"
example_pipeline = "False"
source_dir = "src"

[tool.setuptools.dynamic.version]
attr = "{package}.__version__"

[tool.setuptools.packages.find]
where = ["src"]
namespaces = false
"#,
        requires = settings.python_requires,
    )
}
