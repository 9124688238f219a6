//! Scene file format definitions

use assetcheck_core::{Matrix4, NodeKind, Pivot};
use serde::{Deserialize, Serialize};

/// Root structure of a scene TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub scene: SceneMetadata,
    /// Nodes in declaration order; a parent must come before its children
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeDef>,
}

/// Scene metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Definition of a node in a scene file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDef {
    /// Full path, e.g. `|table_RIG|meshes_GRP`
    pub path: String,
    pub kind: NodeKind,
    /// World matrix, identity when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Matrix4>,
    /// Rotate/scale pivot, zero when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<Pivot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryDef>,
}

/// An upstream history node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryDef {
    pub name: String,
    #[serde(default)]
    pub deformer: bool,
}

impl NodeDef {
    pub fn new(path: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            path: path.into(),
            kind,
            matrix: None,
            pivot: None,
            history: Vec::new(),
        }
    }
}

impl SceneMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

impl SceneFile {
    /// Create a new scene file
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: SceneMetadata::new(name),
            nodes: Vec::new(),
        }
    }

    /// Add a node to the scene
    pub fn add_node(&mut self, node: NodeDef) {
        self.nodes.push(node);
    }
}
