//! Table entries

use serde::Serialize;
use std::fmt;

/// One filesystem entry.
///
/// Directories carry nothing: membership is derived from the keys of the
/// table, not stored on the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Directory,
    File { content: String },
}

impl Node {
    /// Create an empty file.
    pub fn empty_file() -> Self {
        Node::File {
            content: String::new(),
        }
    }

    /// Kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Directory => NodeKind::Directory,
            Node::File { .. } => NodeKind::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File { .. })
    }
}

/// Node kind, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Directory => "Directory",
            NodeKind::File => "File",
        })
    }
}
