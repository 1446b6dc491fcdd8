//! Name normalization and literal formatting shared by the generators.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::parse::types::DataLayer;

/// Python reserved words. Matched case-sensitively, so `none` is fine but
/// `None` is not.
pub const PYTHON_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

pub fn is_python_keyword(word: &str) -> bool {
    PYTHON_KEYWORDS.contains(&word)
}

/// Normalize a display name into a Python snake_case identifier.
///
/// Whitespace runs become one underscore, every ASCII capital gains a
/// leading underscore and is lowered, repeated underscores collapse, and
/// leading underscores are stripped. Total and idempotent.
pub fn to_snake_case(name: &str) -> String {
    let mut raw = String::with_capacity(name.len() + 4);
    let mut in_space = false;
    for c in name.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                raw.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_uppercase() {
            raw.push('_');
            raw.push(c.to_ascii_lowercase());
        } else {
            raw.extend(c.to_lowercase());
        }
    }

    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(c);
    }
    out
}

/// True when the normalized form of `name` can be used as a Python name.
pub fn is_valid_python_identifier(name: &str) -> bool {
    let ident = to_snake_case(name);
    let mut chars = ident.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !is_python_keyword(&ident)
}

/// Guess a data layer from naming conventions, falling back to raw.
pub fn infer_data_layer(name: &str) -> DataLayer {
    let lower = name.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("raw") {
        DataLayer::Raw
    } else if has("intermediate") || has("interim") {
        DataLayer::Intermediate
    } else if has("primary") || has("master") {
        DataLayer::Primary
    } else if has("feature") {
        DataLayer::Feature
    } else if has("model_input") || has("model-input") {
        DataLayer::ModelInput
    } else if has("model_output") || has("prediction") {
        DataLayer::ModelOutput
    } else if has("model") && !has("input") {
        DataLayer::Models
    } else if has("report") || has("metric") {
        DataLayer::Reporting
    } else {
        DataLayer::Raw
    }
}

/// Encode a node's dataset list the way `kedro.pipeline.Node` takes it:
/// `None`, a bare string, or a list.
pub fn format_node_io(names: &[String]) -> String {
    match names {
        [] => "None".to_string(),
        [single] => format!("\"{}\"", single),
        many => {
            let quoted: Vec<String> = many.iter().map(|n| format!("\"{}\"", n)).collect();
            format!("[{}]", quoted.join(", "))
        }
    }
}

pub fn format_function_params(inputs: &[String], type_hint: &str) -> String {
    inputs
        .iter()
        .map(|name| format!("{}: {}", to_snake_case(name), type_hint))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `Args:` entries for a generated docstring, without indentation.
pub fn format_docstring_params(inputs: &[String]) -> Vec<String> {
    inputs
        .iter()
        .map(|name| format!("{}: Input {}", to_snake_case(name), name))
        .collect()
}

/// Quote a YAML plain scalar when it contains an indicator character or
/// would otherwise be read back differently.
pub fn escape_yaml_string(value: &str) -> String {
    const SPECIAL: &[char] = &[':', '#', '[', ']', '{', '}', '|', '>', '<', '@', '`', '\n'];
    let needs_quotes = value.is_empty()
        || value.contains(SPECIAL)
        || value.trim() != value;
    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{}\"", escaped)
}

static HINT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*").expect("valid hint name pattern")
});

const TYPING_NAMES: [&str; 12] = [
    "Any", "Callable", "Dict", "Iterable", "Iterator", "List", "Literal", "Mapping", "Optional",
    "Sequence", "Tuple", "Union",
];

/// Conventional aliases for modules that type hints usually go through.
const MODULE_ALIASES: [(&str, &str); 3] = [("pd", "pandas"), ("np", "numpy"), ("pl", "polars")];

/// Import lines a parameter type hint needs at the top of `nodes.py`.
///
/// Typing names come first as one `from typing import` line, then one
/// `import` per module a dotted name goes through. Builtins need nothing.
pub fn type_hint_imports(hint: &str) -> Vec<String> {
    let mut typing = BTreeSet::new();
    let mut modules = BTreeSet::new();
    for name in HINT_NAME.find_iter(hint).map(|m| m.as_str()) {
        match name.rsplit_once('.') {
            Some((module, _)) => {
                let line = match MODULE_ALIASES.iter().find(|(alias, _)| *alias == module) {
                    Some((alias, full)) => format!("import {} as {}", full, alias),
                    None => format!("import {}", module),
                };
                modules.insert(line);
            }
            None if TYPING_NAMES.contains(&name) => {
                typing.insert(name);
            }
            None => {}
        }
    }

    let mut lines = Vec::new();
    if !typing.is_empty() {
        let names: Vec<&str> = typing.into_iter().collect();
        lines.push(format!("from typing import {}", names.join(", ")));
    }
    lines.extend(modules);
    lines
}
