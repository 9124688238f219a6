//! assetcheck Scene - In-memory scene graph and TOML scene files
//!
//! `SceneWorld` implements the host accessor traits on top of hecs so the
//! checker can run without a DCC application. Scene files describe a node
//! tree in TOML and can be loaded into a world and saved back.

mod format;
mod loader;
mod saver;
mod world;

pub use format::{HistoryDef, NodeDef, SceneFile, SceneMetadata};
pub use loader::{load_scene, load_scene_string};
pub use saver::{save_scene, save_scene_string, world_to_scene_file};
pub use world::SceneWorld;
