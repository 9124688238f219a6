//! Scene saving to TOML files

use crate::format::{HistoryDef, NodeDef, SceneFile, SceneMetadata};
use crate::world::SceneWorld;
use assetcheck_core::{NodeRef, Pivot, Result, SceneGraph, SelectionGuard};
use std::fs;
use std::path::Path;

/// Save a world to a scene file under the given scene metadata
pub fn save_scene<P: AsRef<Path>>(
    path: P,
    world: &SceneWorld,
    metadata: &SceneMetadata,
) -> Result<()> {
    let content = save_scene_string(world, metadata)?;
    fs::write(path, content)?;
    Ok(())
}

/// Save a world to a TOML string
pub fn save_scene_string(world: &SceneWorld, metadata: &SceneMetadata) -> Result<String> {
    let scene_file = world_to_scene_file(world, metadata)?;
    let content = toml::to_string_pretty(&scene_file)?;
    Ok(content)
}

/// Convert a SceneWorld to a SceneFile, parents first
pub fn world_to_scene_file(world: &SceneWorld, metadata: &SceneMetadata) -> Result<SceneFile> {
    let mut scene = SceneFile {
        scene: metadata.clone(),
        nodes: Vec::new(),
    };

    for node in world.all_nodes() {
        let matrix = world.world_matrix(&node)?;
        let history = world
            .history(&node)?
            .into_iter()
            .map(|h| HistoryDef {
                deformer: world.is_known_deformer(h.path()),
                name: h.path().to_string(),
            })
            .collect();

        let mut def = NodeDef::new(node.path(), world.kind(&node)?);
        def.matrix = (!matrix.is_identity()).then_some(matrix);
        def.pivot = node_pivot(world, &node)?;
        def.history = history;
        scene.add_node(def);
    }

    Ok(scene)
}

fn node_pivot(world: &SceneWorld, node: &NodeRef) -> Result<Option<Pivot>> {
    let guard = SelectionGuard::select(world, std::slice::from_ref(node))?;
    let pivot = guard.graph().selected_pivot()?;
    Ok((!pivot.is_identity()).then_some(pivot))
}
