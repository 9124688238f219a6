//! History, transform and pivot checks

use assetcheck_core::{NodeRef, Result, SceneGraph, SelectionGuard};
use std::slice;

/// True when the node has upstream history that is not a deformer
pub fn has_non_deformer_history<G: SceneGraph + ?Sized>(graph: &G, node: &NodeRef) -> Result<bool> {
    for entry in graph.history(node)? {
        if !graph.is_deformer(&entry)? {
            tracing::trace!(node = %node, history = %entry, "non-deformer history");
            return Ok(true);
        }
    }
    Ok(false)
}

/// True when the world matrix differs from identity in any component
pub fn has_transform<G: SceneGraph + ?Sized>(graph: &G, node: &NodeRef) -> Result<bool> {
    let matrix = graph.world_matrix(node)?;
    Ok(!matrix.is_identity())
}

/// True when translate and orient of the pivot are both exactly zero.
///
/// The pivot is read from the host selection, so the node is selected for
/// the query and the previous selection is put back afterwards, also when
/// the query fails.
pub fn is_pivot_identity<G: SceneGraph + ?Sized>(graph: &G, node: &NodeRef) -> Result<bool> {
    let guard = SelectionGuard::select(graph, slice::from_ref(node))?;
    let pivot = guard.graph().selected_pivot()?;
    tracing::trace!(node = %node, ?pivot, "pivot");
    Ok(pivot.is_identity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetcheck_core::{
        AssetCheckError, Matrix4, NodeKind, Pivot, Vec3,
    };
    use assetcheck_scene::SceneWorld;

    /// Delegates to a world but fails every pivot query
    struct FailingPivot<'a>(&'a SceneWorld);

    impl SceneGraph for FailingPivot<'_> {
        fn children(&self, node: &NodeRef) -> Result<Vec<NodeRef>> {
            self.0.children(node)
        }
        fn descendants(&self, node: &NodeRef) -> Result<Vec<NodeRef>> {
            self.0.descendants(node)
        }
        fn parent(&self, node: &NodeRef) -> Result<Option<NodeRef>> {
            self.0.parent(node)
        }
        fn kind(&self, node: &NodeRef) -> Result<NodeKind> {
            self.0.kind(node)
        }
        fn world_matrix(&self, node: &NodeRef) -> Result<Matrix4> {
            self.0.world_matrix(node)
        }
        fn selected_pivot(&self) -> Result<Pivot> {
            Err(AssetCheckError::QueryError("pivot query failed".to_string()))
        }
        fn history(&self, node: &NodeRef) -> Result<Vec<NodeRef>> {
            self.0.history(node)
        }
        fn is_deformer(&self, node: &NodeRef) -> Result<bool> {
            self.0.is_deformer(node)
        }
        fn selection(&self) -> Result<Vec<NodeRef>> {
            self.0.selection()
        }
        fn set_selection(&self, nodes: &[NodeRef]) -> Result<()> {
            self.0.set_selection(nodes)
        }
    }

    fn world_with_group() -> (SceneWorld, NodeRef, NodeRef) {
        let mut world = SceneWorld::new();
        let root = world.add_node(None, "table_RIG", NodeKind::Transform).unwrap();
        let grp = world
            .add_node(Some(&root), "pieds_GRP", NodeKind::Transform)
            .unwrap();
        (world, root, grp)
    }

    #[test]
    fn test_history_only_deformers_passes() {
        let (mut world, _, grp) = world_with_group();
        world.add_history(&grp, "skinCluster1", true).unwrap();
        world.add_history(&grp, "blendShape1", true).unwrap();
        assert!(!has_non_deformer_history(&world, &grp).unwrap());
    }

    #[test]
    fn test_history_with_construction_node_fails() {
        let (mut world, _, grp) = world_with_group();
        world.add_history(&grp, "skinCluster1", true).unwrap();
        world.add_history(&grp, "polyBevel1", false).unwrap();
        assert!(has_non_deformer_history(&world, &grp).unwrap());
    }

    #[test]
    fn test_no_history_passes() {
        let (world, _, grp) = world_with_group();
        assert!(!has_non_deformer_history(&world, &grp).unwrap());
    }

    #[test]
    fn test_transform_identity_is_exact() {
        let (mut world, _, grp) = world_with_group();
        assert!(!has_transform(&world, &grp).unwrap());

        let mut nearly = Matrix4::IDENTITY;
        nearly.0[0] = 1.0 + f64::EPSILON;
        world.set_world_matrix(&grp, nearly).unwrap();
        assert!(has_transform(&world, &grp).unwrap());
    }

    #[test]
    fn test_zero_pivot_passes() {
        let (world, _, grp) = world_with_group();
        assert!(is_pivot_identity(&world, &grp).unwrap());
    }

    #[test]
    fn test_pivot_has_no_tolerance() {
        let (mut world, _, grp) = world_with_group();
        world
            .set_pivot(&grp, Pivot::new(Vec3::new(1e-7, 0.0, 0.0), Vec3::ZERO))
            .unwrap();
        assert!(!is_pivot_identity(&world, &grp).unwrap());

        world
            .set_pivot(&grp, Pivot::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1e-7)))
            .unwrap();
        assert!(!is_pivot_identity(&world, &grp).unwrap());
    }

    #[test]
    fn test_pivot_query_restores_selection() {
        let (world, root, grp) = world_with_group();
        world.set_selection(&[root.clone()]).unwrap();
        is_pivot_identity(&world, &grp).unwrap();
        assert_eq!(world.selection().unwrap(), vec![root]);
    }

    #[test]
    fn test_failed_pivot_query_restores_selection() {
        let (world, root, grp) = world_with_group();
        world.set_selection(&[root.clone()]).unwrap();

        let failing = FailingPivot(&world);
        let result = is_pivot_identity(&failing, &grp);

        assert!(matches!(result, Err(AssetCheckError::QueryError(_))));
        assert_eq!(world.selection().unwrap(), vec![root]);
    }

    #[test]
    fn test_empty_selection_is_restored_too() {
        let (world, _, grp) = world_with_group();
        is_pivot_identity(&world, &grp).unwrap();
        assert!(world.selection().unwrap().is_empty());
    }
}
