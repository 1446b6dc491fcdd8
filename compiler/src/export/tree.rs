//! Nest the flat path → content map into a folder tree for previews.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileNode {
    Folder {
        name: String,
        path: String,
        children: Vec<FileNode>,
    },
    File {
        name: String,
        path: String,
        content: String,
    },
}

impl FileNode {
    pub fn name(&self) -> &str {
        match self {
            FileNode::Folder { name, .. } | FileNode::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            FileNode::Folder { path, .. } | FileNode::File { path, .. } => path,
        }
    }
}

#[derive(Default)]
struct Dir {
    folders: BTreeMap<String, Dir>,
    files: BTreeMap<String, String>,
}

/// Build the preview tree. At every level folders come first, then files,
/// each group sorted by name.
pub fn build_file_tree<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<FileNode> {
    let mut root = Dir::default();
    for (path, content) in files {
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some(file_name) = segments.pop() else {
            continue;
        };
        let mut dir = &mut root;
        for segment in segments {
            dir = dir.folders.entry(segment.to_string()).or_default();
        }
        dir.files.insert(file_name.to_string(), content.to_string());
    }
    into_nodes(root, "")
}

fn into_nodes(dir: Dir, prefix: &str) -> Vec<FileNode> {
    let join = |name: &str| {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        }
    };

    let mut nodes = Vec::with_capacity(dir.folders.len() + dir.files.len());
    for (name, sub) in dir.folders {
        let path = join(&name);
        let children = into_nodes(sub, &path);
        nodes.push(FileNode::Folder {
            name,
            path,
            children,
        });
    }
    for (name, content) in dir.files {
        nodes.push(FileNode::File {
            path: join(&name),
            name,
            content,
        });
    }
    nodes
}
