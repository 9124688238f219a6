//! assetcheck Core - Foundational types for the asset checker
//!
//! This crate provides the types every other assetcheck crate depends on:
//! - `NodeRef`, `NodeKind` - References into a host scene graph
//! - `Vec3`, `Matrix4`, `Pivot` - Spatial types
//! - `SceneGraph`, `SceneEditor` - The accessor capability set a host supplies
//! - `SelectionGuard` - Scoped selection save/restore
//! - Error types and Result alias

mod error;
mod graph;
mod node;
mod types;

pub use error::{AssetCheckError, Result};
pub use graph::{SceneEditor, SceneGraph, SelectionGuard};
pub use node::{short_name_of, NodeKind, NodeRef, PATH_SEPARATOR};
pub use types::{Matrix4, Pivot, Vec3};
