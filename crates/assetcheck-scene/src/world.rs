//! SceneWorld - in-memory node tree implementing the host accessor traits

use assetcheck_core::{
    AssetCheckError, Matrix4, NodeKind, NodeRef, Pivot, Result, SceneEditor, SceneGraph,
    PATH_SEPARATOR,
};
use bimap::BiMap;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Leaf name of a node, namespace included
struct Name(String);

/// Upstream history node names
struct History(Vec<NodeRef>);

/// An in-memory scene graph
///
/// Wraps hecs::World with:
/// - Full-path lookup in both directions
/// - Ordered parent/child relationships
/// - A host-style selection, stored by entity so renames keep it valid
pub struct SceneWorld {
    world: hecs::World,
    /// Bidirectional mapping: full path <-> hecs::Entity
    paths: BiMap<NodeRef, hecs::Entity>,
    /// child -> parent
    parents: HashMap<hecs::Entity, hecs::Entity>,
    /// parent -> children, in insertion order
    children: HashMap<hecs::Entity, Vec<hecs::Entity>>,
    roots: Vec<hecs::Entity>,
    /// History node names known to be deformers
    deformers: HashSet<NodeRef>,
    selection: RefCell<Vec<hecs::Entity>>,
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneWorld {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
            paths: BiMap::new(),
            parents: HashMap::new(),
            children: HashMap::new(),
            roots: Vec::new(),
            deformers: HashSet::new(),
            selection: RefCell::new(Vec::new()),
        }
    }

    /// Add a node under `parent` (or at the top level) and return its path
    pub fn add_node(
        &mut self,
        parent: Option<&NodeRef>,
        name: &str,
        kind: NodeKind,
    ) -> Result<NodeRef> {
        validate_name(name)?;

        let parent_entity = match parent {
            Some(p) => Some(self.entity(p)?),
            None => None,
        };

        let path = match parent {
            Some(p) => p.child(name),
            None => NodeRef::new(format!("{}{}", PATH_SEPARATOR, name)),
        };
        if self.paths.contains_left(&path) {
            return Err(AssetCheckError::DuplicateNode(path.to_string()));
        }

        let entity = self.world.spawn((
            Name(name.to_string()),
            kind,
            Matrix4::IDENTITY,
            Pivot::ZERO,
            History(Vec::new()),
        ));
        self.paths.insert(path.clone(), entity);

        match parent_entity {
            Some(p) => {
                self.parents.insert(entity, p);
                self.children.entry(p).or_default().push(entity);
            }
            None => self.roots.push(entity),
        }

        Ok(path)
    }

    /// Add a node from its full path; the parent must already exist
    pub fn add_path(&mut self, path: &str, kind: NodeKind) -> Result<NodeRef> {
        let trimmed = path.strip_prefix(PATH_SEPARATOR).unwrap_or(path);
        match trimmed.rsplit_once(PATH_SEPARATOR) {
            Some((parent, name)) => {
                let parent = NodeRef::new(format!("{}{}", PATH_SEPARATOR, parent));
                self.add_node(Some(&parent), name, kind)
            }
            None => self.add_node(None, trimmed, kind),
        }
    }

    /// Remove a node and everything below it
    pub fn remove_node(&mut self, node: &NodeRef) -> Result<()> {
        let entity = self.entity(node)?;
        let mut doomed = vec![entity];
        self.collect_descendants(entity, &mut doomed);

        match self.parents.remove(&entity) {
            Some(parent) => {
                if let Some(siblings) = self.children.get_mut(&parent) {
                    siblings.retain(|c| *c != entity);
                }
            }
            None => self.roots.retain(|r| *r != entity),
        }

        for e in doomed {
            self.paths.remove_by_right(&e);
            self.parents.remove(&e);
            self.children.remove(&e);
            self.selection.borrow_mut().retain(|s| *s != e);
            self.world
                .despawn(e)
                .map_err(|_| AssetCheckError::NodeNotFound(node.to_string()))?;
        }

        Ok(())
    }

    pub fn set_world_matrix(&mut self, node: &NodeRef, matrix: Matrix4) -> Result<()> {
        let entity = self.entity(node)?;
        self.insert(entity, matrix, node)
    }

    pub fn set_pivot(&mut self, node: &NodeRef, pivot: Pivot) -> Result<()> {
        let entity = self.entity(node)?;
        self.insert(entity, pivot, node)
    }

    /// Append a history node upstream of `node`
    pub fn add_history(&mut self, node: &NodeRef, name: &str, deformer: bool) -> Result<()> {
        let entity = self.entity(node)?;
        let history_node = NodeRef::new(name);
        if deformer {
            self.deformers.insert(history_node.clone());
        }
        let mut history = self
            .world
            .get::<&mut History>(entity)
            .map_err(|_| AssetCheckError::NodeNotFound(node.to_string()))?;
        history.0.push(history_node);
        Ok(())
    }

    /// Top-level nodes, in insertion order
    pub fn roots(&self) -> Vec<NodeRef> {
        self.roots.iter().filter_map(|e| self.path_of(*e)).collect()
    }

    pub fn contains(&self, node: &NodeRef) -> bool {
        self.paths.contains_left(node)
    }

    /// Get number of nodes
    pub fn node_count(&self) -> usize {
        self.paths.len()
    }

    /// Every node, parents before children
    pub fn all_nodes(&self) -> Vec<NodeRef> {
        let mut order = Vec::new();
        for root in &self.roots {
            order.push(*root);
            self.collect_descendants(*root, &mut order);
        }
        order.into_iter().filter_map(|e| self.path_of(e)).collect()
    }

    /// Whether a history node name was registered as a deformer
    pub fn is_known_deformer(&self, name: &str) -> bool {
        self.deformers.contains(&NodeRef::new(name))
    }

    fn entity(&self, node: &NodeRef) -> Result<hecs::Entity> {
        self.paths
            .get_by_left(node)
            .copied()
            .ok_or_else(|| AssetCheckError::NodeNotFound(node.to_string()))
    }

    fn path_of(&self, entity: hecs::Entity) -> Option<NodeRef> {
        self.paths.get_by_right(&entity).cloned()
    }

    fn insert<T: hecs::Component>(
        &mut self,
        entity: hecs::Entity,
        component: T,
        node: &NodeRef,
    ) -> Result<()> {
        self.world
            .insert_one(entity, component)
            .map_err(|_| AssetCheckError::NodeNotFound(node.to_string()))
    }

    fn component<T: hecs::Component + Copy>(&self, node: &NodeRef) -> Result<T> {
        let entity = self.entity(node)?;
        self.world
            .get::<&T>(entity)
            .map(|c| *c)
            .map_err(|_| AssetCheckError::NodeNotFound(node.to_string()))
    }

    /// Depth-first, pre-order
    fn collect_descendants(&self, entity: hecs::Entity, out: &mut Vec<hecs::Entity>) {
        if let Some(children) = self.children.get(&entity) {
            for child in children {
                out.push(*child);
                self.collect_descendants(*child, out);
            }
        }
    }

    /// Recompute the path of `entity` and everything below it after a rename
    fn rebuild_paths(&mut self, entity: hecs::Entity) -> Result<()> {
        let name = self
            .world
            .get::<&Name>(entity)
            .map(|n| n.0.clone())
            .map_err(|_| AssetCheckError::SceneError("node without name".to_string()))?;

        let path = match self.parents.get(&entity).and_then(|p| self.path_of(*p)) {
            Some(parent) => parent.child(&name),
            None => NodeRef::new(format!("{}{}", PATH_SEPARATOR, name)),
        };
        self.paths.insert(path, entity);

        let children = self.children.get(&entity).cloned().unwrap_or_default();
        for child in children {
            self.rebuild_paths(child)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(PATH_SEPARATOR) {
        return Err(AssetCheckError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl SceneGraph for SceneWorld {
    fn children(&self, node: &NodeRef) -> Result<Vec<NodeRef>> {
        let entity = self.entity(node)?;
        Ok(self
            .children
            .get(&entity)
            .map(|c| c.iter().filter_map(|e| self.path_of(*e)).collect())
            .unwrap_or_default())
    }

    fn descendants(&self, node: &NodeRef) -> Result<Vec<NodeRef>> {
        let entity = self.entity(node)?;
        let mut out = Vec::new();
        self.collect_descendants(entity, &mut out);
        Ok(out.into_iter().filter_map(|e| self.path_of(e)).collect())
    }

    fn parent(&self, node: &NodeRef) -> Result<Option<NodeRef>> {
        let entity = self.entity(node)?;
        Ok(self.parents.get(&entity).and_then(|p| self.path_of(*p)))
    }

    fn kind(&self, node: &NodeRef) -> Result<NodeKind> {
        self.component::<NodeKind>(node)
    }

    fn world_matrix(&self, node: &NodeRef) -> Result<Matrix4> {
        self.component::<Matrix4>(node)
    }

    fn selected_pivot(&self) -> Result<Pivot> {
        let selection = self.selection.borrow();
        match selection.as_slice() {
            [single] => self
                .world
                .get::<&Pivot>(*single)
                .map(|p| *p)
                .map_err(|_| AssetCheckError::QueryError("selected node is gone".to_string())),
            [] => Err(AssetCheckError::SelectionError(
                "pivot query needs a selected node".to_string(),
            )),
            many => Err(AssetCheckError::SelectionError(format!(
                "pivot query needs exactly one selected node, got {}",
                many.len()
            ))),
        }
    }

    fn history(&self, node: &NodeRef) -> Result<Vec<NodeRef>> {
        let entity = self.entity(node)?;
        self.world
            .get::<&History>(entity)
            .map(|h| h.0.clone())
            .map_err(|_| AssetCheckError::NodeNotFound(node.to_string()))
    }

    fn is_deformer(&self, node: &NodeRef) -> Result<bool> {
        Ok(self.deformers.contains(node))
    }

    fn selection(&self) -> Result<Vec<NodeRef>> {
        Ok(self
            .selection
            .borrow()
            .iter()
            .filter_map(|e| self.path_of(*e))
            .collect())
    }

    fn set_selection(&self, nodes: &[NodeRef]) -> Result<()> {
        let entities = nodes
            .iter()
            .map(|n| self.entity(n))
            .collect::<Result<Vec<_>>>()?;
        *self.selection.borrow_mut() = entities;
        Ok(())
    }
}

impl SceneEditor for SceneWorld {
    fn rename(&mut self, node: &NodeRef, new_name: &str) -> Result<NodeRef> {
        validate_name(new_name)?;
        let entity = self.entity(node)?;

        let target = match node.parent_path() {
            Some(parent) => parent.child(new_name),
            None => NodeRef::new(format!("{}{}", PATH_SEPARATOR, new_name)),
        };
        if target == *node {
            return Ok(target);
        }
        if self.paths.contains_left(&target) {
            return Err(AssetCheckError::DuplicateNode(target.to_string()));
        }

        self.insert(entity, Name(new_name.to_string()), node)?;
        self.rebuild_paths(entity)?;
        tracing::debug!(from = %node, to = %target, "renamed node");
        Ok(target)
    }

    fn freeze_transform(&mut self, node: &NodeRef) -> Result<()> {
        let entity = self.entity(node)?;
        let mut frozen = vec![entity];
        self.collect_descendants(entity, &mut frozen);

        for e in frozen {
            let is_transform = self
                .world
                .get::<&NodeKind>(e)
                .map(|k| !k.is_shape())
                .unwrap_or(false);
            if is_transform {
                self.insert(e, Matrix4::IDENTITY, node)?;
            }
        }
        Ok(())
    }

    fn reset_pivot(&mut self, node: &NodeRef) -> Result<()> {
        let entity = self.entity(node)?;
        self.insert(entity, Pivot::ZERO, node)
    }
}
