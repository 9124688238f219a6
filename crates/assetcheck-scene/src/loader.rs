//! Scene loading from TOML files

use crate::format::SceneFile;
use crate::world::SceneWorld;
use assetcheck_core::Result;
use std::fs;
use std::path::Path;

/// Load a scene from a TOML file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<(SceneWorld, SceneFile)> {
    let content = fs::read_to_string(path)?;
    load_scene_string(&content)
}

/// Load a scene from a TOML string
pub fn load_scene_string(content: &str) -> Result<(SceneWorld, SceneFile)> {
    let scene_file: SceneFile = toml::from_str(content)?;
    let mut world = SceneWorld::new();

    for def in &scene_file.nodes {
        let node = world.add_path(&def.path, def.kind)?;

        if let Some(matrix) = def.matrix {
            world.set_world_matrix(&node, matrix)?;
        }
        if let Some(pivot) = def.pivot {
            world.set_pivot(&node, pivot)?;
        }
        for entry in &def.history {
            world.add_history(&node, &entry.name, entry.deformer)?;
        }
    }

    tracing::debug!(
        scene = %scene_file.scene.name,
        nodes = world.node_count(),
        "loaded scene"
    );

    Ok((world, scene_file))
}
