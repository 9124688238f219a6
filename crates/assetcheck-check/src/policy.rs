//! Per-deployment check policy

use crate::naming::{is_digits, NAME_DELIMITER, SIDES};
use crate::registry::type_tags;
use crate::types::{Category, StructuralChecks};
use assetcheck_core::{AssetCheckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Resolution tags accepted when no policy says otherwise
pub const DEFAULT_RESOLUTIONS: [&str; 3] = ["low", "mid", "high"];

/// Vocabulary settings shared by every category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingPolicy {
    pub resolutions: Vec<String>,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            resolutions: DEFAULT_RESOLUTIONS.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Structural checks enabled for each category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryChecks {
    pub group: StructuralChecks,
    pub buffer: StructuralChecks,
    pub mesh: StructuralChecks,
    pub controller: StructuralChecks,
    pub camera: StructuralChecks,
    pub joint: StructuralChecks,
}

impl CategoryChecks {
    pub fn get(&self, category: Category) -> StructuralChecks {
        match category {
            Category::Group => self.group,
            Category::Buffer => self.buffer,
            Category::Mesh => self.mesh,
            Category::Controller => self.controller,
            Category::Camera => self.camera,
            Category::Joint => self.joint,
        }
    }
}

/// Check policy loaded from TOML.
///
/// The default enables no structural check on any category.
/// [`CheckPolicy::legacy`] matches the older single-class checker, which
/// looked at history on meshes and at transforms and pivots on groups and
/// buffers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckPolicy {
    pub naming: NamingPolicy,
    pub checks: CategoryChecks,
}

impl CheckPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn legacy() -> Self {
        let spatial = StructuralChecks {
            history: false,
            transform: true,
            pivot: true,
        };
        Self {
            naming: NamingPolicy {
                resolutions: ["low", "mid", "high", "sculpt"]
                    .iter()
                    .map(|r| r.to_string())
                    .collect(),
            },
            checks: CategoryChecks {
                group: spatial,
                buffer: spatial,
                mesh: StructuralChecks {
                    history: true,
                    ..StructuralChecks::NONE
                },
                ..CategoryChecks::default()
            },
        }
    }

    /// Load a policy from a TOML file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::load_string(&content)
    }

    /// Load a policy from a TOML string
    pub fn load_string(content: &str) -> Result<Self> {
        let policy: CheckPolicy = toml::from_str(content).map_err(|e| {
            AssetCheckError::PolicyLoadError(format!("Failed to parse policy TOML: {}", e))
        })?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn checks_for(&self, category: Category) -> StructuralChecks {
        self.checks.get(category)
    }

    fn validate(&self) -> Result<()> {
        if self.naming.resolutions.is_empty() {
            return Err(AssetCheckError::PolicyLoadError(
                "naming.resolutions must not be empty".to_string(),
            ));
        }
        for tag in &self.naming.resolutions {
            if let Some(reason) = resolution_tag_problem(tag) {
                return Err(AssetCheckError::PolicyLoadError(format!(
                    "invalid resolution tag '{}': {}",
                    tag, reason
                )));
            }
        }
        Ok(())
    }
}

/// Why `tag` could never classify as a resolution token, if it couldn't
fn resolution_tag_problem(tag: &str) -> Option<&'static str> {
    if tag.is_empty() {
        Some("empty")
    } else if tag.contains(NAME_DELIMITER) {
        Some("contains the name delimiter")
    } else if SIDES.contains(&tag) {
        Some("already a side marker")
    } else if is_digits(tag) {
        Some("digits classify as instance numbers")
    } else if Category::ALL
        .into_iter()
        .any(|category| type_tags(category).contains(&tag))
    {
        Some("already a type tag")
    } else {
        None
    }
}
