//! assetcheck Check - Technical check of published assets
//!
//! This crate validates a scene-graph asset against the studio convention:
//! node names are tokenized and matched against per-category templates,
//! node content and transforms are checked per category, the asset must
//! carry the fixed group schema, and buffers must match across resolutions.
//! Violations are collected in a report; only host failures are errors.

mod buffers;
mod evaluator;
mod fixer;
mod hierarchy;
mod name_rules;
mod naming;
mod policy;
mod registry;
mod report;
mod structural;
mod types;

pub use buffers::{collect_buffers, is_populated, BufferConsistencyValidator, BUFFER_SUFFIX};
pub use evaluator::{validate_asset, AssetValidator};
pub use fixer::{freeze_transform, rename_shape_to_match_parent, zero_pivot, AssetFixer, FixAction, FixReport};
pub use hierarchy::{
    HierarchyValidator, ResolvedSchema, SchemaGroup, ASSET_SCHEMA, BONES_GROUP, MESHES_GROUP,
    RESOLUTION_GROUPS, RIG_GROUP,
};
pub use name_rules::{NameIssue, NamePart, NameRules, Requirement};
pub use naming::{
    split_name, trailing_type_tag, NodeNameData, Template, Token, TokenKind, Vocabulary,
    INSTANCE_NUMBER_WIDTH, NAME_DELIMITER, SIDES,
};
pub use policy::{CategoryChecks, CheckPolicy, NamingPolicy, DEFAULT_RESOLUTIONS};
pub use registry::ValidatorRegistry;
pub use report::{ErrorKind, ValidationError, ValidationReport};
pub use structural::{has_non_deformer_history, has_transform, is_pivot_identity};
pub use types::{Category, ContentRule, StructuralChecks, ValidatorDescriptor};
