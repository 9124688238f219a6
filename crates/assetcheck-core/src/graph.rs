//! Scene-graph accessor capability set supplied by the host

use crate::error::Result;
use crate::node::{NodeKind, NodeRef};
use crate::types::{Matrix4, Pivot};

/// Read access to a host scene graph.
///
/// Every query may fail; failures are host problems (a node vanished, the
/// host API threw) and propagate to the caller untouched.
///
/// Selection is host state that the pivot query depends on, so it is
/// changed through `&self`, the same way a host API handle would be used.
pub trait SceneGraph {
    /// Direct children, in host order
    fn children(&self, node: &NodeRef) -> Result<Vec<NodeRef>>;

    /// Every node below `node` (not including it), in host order
    fn descendants(&self, node: &NodeRef) -> Result<Vec<NodeRef>>;

    fn parent(&self, node: &NodeRef) -> Result<Option<NodeRef>>;

    fn kind(&self, node: &NodeRef) -> Result<NodeKind>;

    /// Namespace-stripped, path-stripped name
    fn short_name(&self, node: &NodeRef) -> Result<String> {
        Ok(node.short_name().to_string())
    }

    fn world_matrix(&self, node: &NodeRef) -> Result<Matrix4>;

    /// Pivot of the single currently selected node
    fn selected_pivot(&self) -> Result<Pivot>;

    /// Upstream construction history, DAG nodes pruned
    fn history(&self, node: &NodeRef) -> Result<Vec<NodeRef>>;

    fn is_deformer(&self, node: &NodeRef) -> Result<bool>;

    fn selection(&self) -> Result<Vec<NodeRef>>;

    fn set_selection(&self, nodes: &[NodeRef]) -> Result<()>;
}

/// Write access used by the remediation operations
pub trait SceneEditor: SceneGraph {
    /// Rename a node in place, returning its new reference
    fn rename(&mut self, node: &NodeRef, new_name: &str) -> Result<NodeRef>;

    /// Bake translate/rotate/scale so the world matrix becomes identity
    fn freeze_transform(&mut self, node: &NodeRef) -> Result<()>;

    /// Move the rotate/scale pivot to the world origin
    fn reset_pivot(&mut self, node: &NodeRef) -> Result<()>;
}

/// Replaces the host selection for its lifetime and puts the previous
/// selection back when dropped, on every exit path.
pub struct SelectionGuard<'a, G: SceneGraph + ?Sized> {
    graph: &'a G,
    previous: Vec<NodeRef>,
}

impl<'a, G: SceneGraph + ?Sized> SelectionGuard<'a, G> {
    /// Remember the current selection, then select `nodes`
    pub fn select(graph: &'a G, nodes: &[NodeRef]) -> Result<Self> {
        let previous = graph.selection()?;
        let guard = Self { graph, previous };
        guard.graph.set_selection(nodes)?;
        Ok(guard)
    }

    pub fn graph(&self) -> &G {
        self.graph
    }

    /// The selection that will be restored
    pub fn previous(&self) -> &[NodeRef] {
        &self.previous
    }
}

impl<G: SceneGraph + ?Sized> Drop for SelectionGuard<'_, G> {
    fn drop(&mut self) {
        if let Err(err) = self.graph.set_selection(&self.previous) {
            tracing::warn!(error = %err, "failed to restore selection");
        }
    }
}
