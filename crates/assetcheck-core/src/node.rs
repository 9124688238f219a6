//! References into a host scene graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the segments of a full node path (`|root|child`)
pub const PATH_SEPARATOR: char = '|';

/// Separator between a namespace and a node name (`ns:node`)
const NAMESPACE_SEPARATOR: char = ':';

/// An opaque reference to a node of the host scene graph.
///
/// The reference is the node's full path. Two references are equal when
/// their paths are equal; the checker never owns the node it points at.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRef(String);

impl NodeRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The full path this reference points at
    pub fn path(&self) -> &str {
        &self.0
    }

    /// Last path segment with any namespace removed
    pub fn short_name(&self) -> &str {
        short_name_of(&self.0)
    }

    /// Reference to a direct child of this node.
    ///
    /// Host-side path composition; the checker itself only reads paths.
    pub fn child(&self, name: &str) -> NodeRef {
        NodeRef(format!("{}{}{}", self.0, PATH_SEPARATOR, name))
    }

    /// The path prefix up to the last separator, if any
    pub fn parent_path(&self) -> Option<NodeRef> {
        let idx = self.0.rfind(PATH_SEPARATOR)?;
        if idx == 0 {
            return None;
        }
        Some(NodeRef(self.0[..idx].to_string()))
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({})", self.0)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Strip the hierarchy path and the namespace from a node path.
///
/// `|ns:table_RIG|ns:meshes_GRP` gives `meshes_GRP`.
pub fn short_name_of(path: &str) -> &str {
    let leaf = path.rsplit(PATH_SEPARATOR).next().unwrap_or(path);
    leaf.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(leaf)
}

/// Node categories of the host's type system, as seen by the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Transform,
    Mesh,
    NurbsCurve,
    Camera,
    Joint,
    ControllerShape,
    Other,
}

impl NodeKind {
    /// Transform nodes carry names that are checked against templates
    pub fn is_transform_like(self) -> bool {
        matches!(self, NodeKind::Transform)
    }

    pub fn is_joint_like(self) -> bool {
        matches!(self, NodeKind::Joint)
    }

    /// Nodes that hang under a transform and take their name from it
    pub fn is_shape(self) -> bool {
        !matches!(self, NodeKind::Transform | NodeKind::Joint)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Transform => "transform",
            NodeKind::Mesh => "mesh",
            NodeKind::NurbsCurve => "nurbs_curve",
            NodeKind::Camera => "camera",
            NodeKind::Joint => "joint",
            NodeKind::ControllerShape => "controller_shape",
            NodeKind::Other => "other",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_strips_path_and_namespace() {
        assert_eq!(short_name_of("|table_RIG|meshes_GRP"), "meshes_GRP");
        assert_eq!(short_name_of("|ns:table_RIG|ns:meshes_GRP"), "meshes_GRP");
        assert_eq!(short_name_of("a:b:pieds_GRP"), "pieds_GRP");
        assert_eq!(short_name_of("pieds_GRP"), "pieds_GRP");
    }

    #[test]
    fn test_parent_path() {
        let node = NodeRef::new("|table_RIG|meshes_GRP|LO_GRP");
        assert_eq!(
            node.parent_path(),
            Some(NodeRef::new("|table_RIG|meshes_GRP"))
        );
        assert_eq!(NodeRef::new("|table_RIG").parent_path(), None);
    }

    #[test]
    fn test_child_path() {
        let root = NodeRef::new("|table_RIG");
        assert_eq!(root.child("rig_GRP").path(), "|table_RIG|rig_GRP");
    }

    #[test]
    fn test_kind_categories() {
        assert!(NodeKind::Transform.is_transform_like());
        assert!(!NodeKind::Transform.is_shape());
        assert!(!NodeKind::Joint.is_shape());
        assert!(NodeKind::Mesh.is_shape());
        assert!(NodeKind::ControllerShape.is_shape());
    }

    #[test]
    fn test_kind_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            kind: NodeKind,
        }
        let w: Wrapper = toml::from_str("kind = \"nurbs_curve\"").unwrap();
        assert_eq!(w.kind, NodeKind::NurbsCurve);
    }
}
