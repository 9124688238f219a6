//! Validator descriptor definitions

use crate::name_rules::{NameIssue, NameRules};
use crate::naming::{NodeNameData, Template, TokenKind, Vocabulary, INSTANCE_NUMBER_WIDTH};
use assetcheck_core::{NodeKind, NodeRef, Result, SceneGraph};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Node categories, one validator each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Group,
    Buffer,
    Mesh,
    Controller,
    Camera,
    Joint,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Group,
        Category::Buffer,
        Category::Mesh,
        Category::Controller,
        Category::Camera,
        Category::Joint,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Group => "group",
            Category::Buffer => "buffer",
            Category::Mesh => "mesh",
            Category::Controller => "controller",
            Category::Camera => "camera",
            Category::Joint => "joint",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraint on the direct children of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRule {
    /// Every child is a transform or a joint
    TransformsOrJoints,
    /// Every child is a transform; no children is fine
    TransformsOnly,
    /// At least one child, and all meshes or all curves
    UniformGeometry,
    /// At least one controller shape among the children
    HasControllerShape,
    /// Every child is a camera shape
    CamerasOnly,
    Unconstrained,
}

impl ContentRule {
    pub fn evaluate<G: SceneGraph + ?Sized>(&self, graph: &G, node: &NodeRef) -> Result<bool> {
        if *self == ContentRule::Unconstrained {
            return Ok(true);
        }

        let kinds = graph
            .children(node)?
            .iter()
            .map(|child| graph.kind(child))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.accepts(&kinds))
    }

    /// Decide from the kinds of the direct children
    pub fn accepts(&self, kinds: &[NodeKind]) -> bool {
        match self {
            ContentRule::TransformsOrJoints => kinds
                .iter()
                .all(|k| k.is_transform_like() || k.is_joint_like()),
            ContentRule::TransformsOnly => kinds.iter().all(|k| k.is_transform_like()),
            ContentRule::UniformGeometry => {
                !kinds.is_empty()
                    && (kinds.iter().all(|k| *k == NodeKind::Mesh)
                        || kinds.iter().all(|k| *k == NodeKind::NurbsCurve))
            }
            ContentRule::HasControllerShape => kinds.contains(&NodeKind::ControllerShape),
            ContentRule::CamerasOnly => kinds.iter().all(|k| *k == NodeKind::Camera),
            ContentRule::Unconstrained => true,
        }
    }
}

/// Which structural checks run for a category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralChecks {
    pub history: bool,
    pub transform: bool,
    pub pivot: bool,
}

impl StructuralChecks {
    pub const NONE: Self = Self {
        history: false,
        transform: false,
        pivot: false,
    };
}

/// Everything needed to validate one category of node
#[derive(Debug, Clone)]
pub struct ValidatorDescriptor {
    pub category: Category,
    pub vocabulary: Vocabulary,
    pub templates: BTreeSet<Template>,
    pub name_rules: NameRules,
    pub content: ContentRule,
    pub checks: StructuralChecks,
}

impl ValidatorDescriptor {
    pub fn handles_tag(&self, tag: &str) -> bool {
        self.vocabulary.is_type_tag(tag)
    }

    /// The name is valid iff its template is one of the allowed templates
    pub fn accepts_name(&self, short_name: &str) -> bool {
        self.templates
            .contains(&self.vocabulary.template_of(short_name))
    }

    /// Human-readable reasons a name is rejected; empty when accepted
    pub fn explain_name(&self, short_name: &str) -> Vec<String> {
        if self.accepts_name(short_name) {
            return Vec::new();
        }

        let tokens = self.vocabulary.tokenize(short_name);
        let mut reasons: Vec<String> = self
            .name_rules
            .issues(&NodeNameData::from_tokens(&tokens))
            .iter()
            .map(NameIssue::to_string)
            .collect();

        for token in &tokens {
            if token.kind == TokenKind::Undefined {
                reasons.push(format!(
                    "'{}' is not a {}-digit instance number",
                    token.value, INSTANCE_NUMBER_WIDTH
                ));
            }
        }

        let name_tokens = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::NodeName)
            .count();
        if name_tokens > 1 {
            reasons.push(format!(
                "contains {} name tokens; the base name must not contain '_'",
                name_tokens
            ));
        }

        let template = self.vocabulary.template_of(short_name);
        reasons.push(format!(
            "template {} is not one of the {} templates",
            template, self.category
        ));
        reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NodeKind::*;

    #[test]
    fn test_group_content() {
        let rule = ContentRule::TransformsOrJoints;
        assert!(rule.accepts(&[]));
        assert!(rule.accepts(&[Transform, Joint]));
        assert!(!rule.accepts(&[Transform, Mesh]));
    }

    #[test]
    fn test_buffer_content() {
        let rule = ContentRule::TransformsOnly;
        assert!(rule.accepts(&[]));
        assert!(rule.accepts(&[Transform]));
        assert!(!rule.accepts(&[Joint]));
    }

    #[test]
    fn test_mesh_content_is_uniform_and_non_empty() {
        let rule = ContentRule::UniformGeometry;
        assert!(!rule.accepts(&[]));
        assert!(rule.accepts(&[Mesh, Mesh]));
        assert!(rule.accepts(&[NurbsCurve]));
        assert!(!rule.accepts(&[Mesh, NurbsCurve]));
        assert!(!rule.accepts(&[Mesh, Transform]));
    }

    #[test]
    fn test_controller_and_camera_content() {
        assert!(ContentRule::HasControllerShape.accepts(&[NurbsCurve, ControllerShape]));
        assert!(!ContentRule::HasControllerShape.accepts(&[NurbsCurve]));
        assert!(ContentRule::CamerasOnly.accepts(&[Camera]));
        assert!(!ContentRule::CamerasOnly.accepts(&[Camera, Mesh]));
        assert!(ContentRule::Unconstrained.accepts(&[Mesh, Joint]));
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Category::Controller.to_string(), "controller");
        assert_eq!(Category::ALL.len(), 6);
    }
}
