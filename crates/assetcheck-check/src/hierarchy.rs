//! Required group layout under an asset root

use assetcheck_core::{NodeRef, Result, SceneGraph};
use std::collections::BTreeMap;

pub const MESHES_GROUP: &str = "meshes_GRP";
pub const RIG_GROUP: &str = "rig_GRP";
pub const BONES_GROUP: &str = "bones_GRP";

/// Resolution groups under `meshes_GRP`, in the order buffers are compared
pub const RESOLUTION_GROUPS: [&str; 3] = ["LO_GRP", "MI_GRP", "HI_GRP"];

/// A required group and the groups required directly beneath it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaGroup {
    pub name: &'static str,
    pub children: &'static [SchemaGroup],
}

impl SchemaGroup {
    pub const fn leaf(name: &'static str) -> Self {
        Self {
            name,
            children: &[],
        }
    }
}

const TECHNICAL_GROUPS: [SchemaGroup; 4] = [
    SchemaGroup::leaf("ALL_GRP"),
    SchemaGroup::leaf("HI_GRP"),
    SchemaGroup::leaf("MI_GRP"),
    SchemaGroup::leaf("LO_GRP"),
];

const MESHES_GROUPS: [SchemaGroup; 4] = [
    SchemaGroup::leaf("HI_GRP"),
    SchemaGroup::leaf("MI_GRP"),
    SchemaGroup::leaf("LO_GRP"),
    SchemaGroup {
        name: "Technical_GRP",
        children: &TECHNICAL_GROUPS,
    },
];

/// Every group a publishable asset must contain, relative to its root
pub const ASSET_SCHEMA: [SchemaGroup; 3] = [
    SchemaGroup {
        name: MESHES_GROUP,
        children: &MESHES_GROUPS,
    },
    SchemaGroup::leaf(RIG_GROUP),
    SchemaGroup::leaf(BONES_GROUP),
];

/// Schema groups resolved against one asset root.
///
/// Keys are schema paths joined with `/`, e.g. `meshes_GRP/Technical_GRP/LO_GRP`.
/// A group whose parent is missing is itself missing.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSchema {
    groups: BTreeMap<String, Option<NodeRef>>,
}

impl ResolvedSchema {
    pub fn get(&self, schema_path: &str) -> Option<&NodeRef> {
        self.groups.get(schema_path).and_then(Option::as_ref)
    }

    /// Schema paths that did not resolve
    pub fn missing(&self) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|(_, node)| node.is_none())
            .map(|(path, _)| path.as_str())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.groups.values().all(Option::is_some)
    }

    /// The resolved `meshes_GRP`, `rig_GRP` and `bones_GRP`
    pub fn top_groups(&self) -> Vec<&NodeRef> {
        ASSET_SCHEMA.iter().filter_map(|g| self.get(g.name)).collect()
    }

    /// Resolution groups under `meshes_GRP`, in comparison order, with
    /// `None` for the ones that are missing
    pub fn resolution_groups(&self) -> Vec<(&'static str, Option<&NodeRef>)> {
        RESOLUTION_GROUPS
            .iter()
            .map(|&name| (name, self.get(&format!("{}/{}", MESHES_GROUP, name))))
            .collect()
    }
}

/// Checks that the required groups exist as direct children
pub struct HierarchyValidator;

impl HierarchyValidator {
    pub fn resolve<G: SceneGraph + ?Sized>(graph: &G, root: &NodeRef) -> Result<ResolvedSchema> {
        let mut resolved = ResolvedSchema::default();
        resolve_level(graph, Some(root), &ASSET_SCHEMA, "", &mut resolved)?;
        Ok(resolved)
    }

    /// True when every schema group resolves
    pub fn validate<G: SceneGraph + ?Sized>(graph: &G, root: &NodeRef) -> Result<bool> {
        let resolved = Self::resolve(graph, root)?;
        if !resolved.is_complete() {
            tracing::debug!(root = %root, missing = ?resolved.missing(), "incomplete hierarchy");
        }
        Ok(resolved.is_complete())
    }
}

fn resolve_level<G: SceneGraph + ?Sized>(
    graph: &G,
    parent: Option<&NodeRef>,
    groups: &[SchemaGroup],
    prefix: &str,
    resolved: &mut ResolvedSchema,
) -> Result<()> {
    for group in groups {
        let node = match parent {
            Some(parent) => find_group(graph, parent, group.name)?,
            None => None,
        };

        let path = if prefix.is_empty() {
            group.name.to_string()
        } else {
            format!("{}/{}", prefix, group.name)
        };

        resolve_level(graph, node.as_ref(), group.children, &path, resolved)?;
        resolved.groups.insert(path, node);
    }
    Ok(())
}

/// Direct transform child of `parent` whose short name is `name`
fn find_group<G: SceneGraph + ?Sized>(graph: &G, parent: &NodeRef, name: &str) -> Result<Option<NodeRef>> {
    for child in graph.children(parent)? {
        if graph.kind(&child)?.is_transform_like() && graph.short_name(&child)? == name {
            return Ok(Some(child));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetcheck_core::NodeKind;
    use assetcheck_scene::SceneWorld;

    const SCHEMA_PATHS: [&str; 11] = [
        "|table_RIG|meshes_GRP",
        "|table_RIG|meshes_GRP|HI_GRP",
        "|table_RIG|meshes_GRP|MI_GRP",
        "|table_RIG|meshes_GRP|LO_GRP",
        "|table_RIG|meshes_GRP|Technical_GRP",
        "|table_RIG|meshes_GRP|Technical_GRP|ALL_GRP",
        "|table_RIG|meshes_GRP|Technical_GRP|HI_GRP",
        "|table_RIG|meshes_GRP|Technical_GRP|MI_GRP",
        "|table_RIG|meshes_GRP|Technical_GRP|LO_GRP",
        "|table_RIG|rig_GRP",
        "|table_RIG|bones_GRP",
    ];

    fn asset(skip: &[&str]) -> (SceneWorld, NodeRef) {
        let mut world = SceneWorld::new();
        let root = world.add_path("|table_RIG", NodeKind::Transform).unwrap();
        for path in SCHEMA_PATHS {
            if skip.iter().any(|s| path.starts_with(s)) {
                continue;
            }
            world.add_path(path, NodeKind::Transform).unwrap();
        }
        (world, root)
    }

    #[test]
    fn test_complete_hierarchy() {
        let (world, root) = asset(&[]);
        let resolved = HierarchyValidator::resolve(&world, &root).unwrap();
        assert!(resolved.is_complete());
        assert_eq!(resolved.top_groups().len(), 3);
        assert_eq!(
            resolved.get("meshes_GRP/Technical_GRP/ALL_GRP").unwrap().path(),
            "|table_RIG|meshes_GRP|Technical_GRP|ALL_GRP"
        );
        assert!(HierarchyValidator::validate(&world, &root).unwrap());
    }

    #[test]
    fn test_missing_group() {
        let (world, root) = asset(&["|table_RIG|bones_GRP"]);
        let resolved = HierarchyValidator::resolve(&world, &root).unwrap();
        assert_eq!(resolved.missing(), vec!["bones_GRP"]);
        assert!(!HierarchyValidator::validate(&world, &root).unwrap());
    }

    #[test]
    fn test_missing_parent_hides_children() {
        let (world, root) = asset(&["|table_RIG|meshes_GRP|Technical_GRP"]);
        let resolved = HierarchyValidator::resolve(&world, &root).unwrap();
        assert_eq!(resolved.missing().len(), 5);
        assert!(resolved.get("meshes_GRP/Technical_GRP/LO_GRP").is_none());
    }

    #[test]
    fn test_lookup_is_direct_children_only() {
        let mut world = SceneWorld::new();
        let root = world.add_path("|table_RIG", NodeKind::Transform).unwrap();
        world.add_path("|table_RIG|extra_GRP", NodeKind::Transform).unwrap();
        world
            .add_path("|table_RIG|extra_GRP|rig_GRP", NodeKind::Transform)
            .unwrap();

        let resolved = HierarchyValidator::resolve(&world, &root).unwrap();
        assert!(resolved.get(RIG_GROUP).is_none());
    }

    #[test]
    fn test_namespaced_groups_resolve() {
        let mut world = SceneWorld::new();
        let root = world.add_path("|ns:table_RIG", NodeKind::Transform).unwrap();
        world.add_path("|ns:table_RIG|ns:rig_GRP", NodeKind::Transform).unwrap();

        let resolved = HierarchyValidator::resolve(&world, &root).unwrap();
        assert_eq!(resolved.get(RIG_GROUP).unwrap().path(), "|ns:table_RIG|ns:rig_GRP");
    }

    #[test]
    fn test_resolution_groups_in_order() {
        let (world, root) = asset(&["|table_RIG|meshes_GRP|MI_GRP"]);
        let resolved = HierarchyValidator::resolve(&world, &root).unwrap();
        let groups = resolved.resolution_groups();
        let names: Vec<_> = groups.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, RESOLUTION_GROUPS);
        assert!(groups[0].1.is_some());
        assert!(groups[1].1.is_none());
    }
}
