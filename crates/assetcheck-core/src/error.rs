//! Error types for assetcheck

use thiserror::Error;

/// The main error type for assetcheck operations
///
/// Rule violations found while validating an asset are not errors; they are
/// reported as records. This type covers failures of the scene graph itself
/// and of loading files.
#[derive(Debug, Error)]
pub enum AssetCheckError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Node has no parent: {0}")]
    NoParent(String),

    #[error("Duplicate node path: {0}")]
    DuplicateNode(String),

    #[error("Invalid node name: {0}")]
    InvalidName(String),

    #[error("Scene query failed: {0}")]
    QueryError(String),

    #[error("Selection error: {0}")]
    SelectionError(String),

    #[error("Scene error: {0}")]
    SceneError(String),

    #[error("Policy load error: {0}")]
    PolicyLoadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for assetcheck operations
pub type Result<T> = std::result::Result<T, AssetCheckError>;

impl From<toml::de::Error> for AssetCheckError {
    fn from(err: toml::de::Error) -> Self {
        AssetCheckError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for AssetCheckError {
    fn from(err: toml::ser::Error) -> Self {
        AssetCheckError::TomlSerError(err.to_string())
    }
}
