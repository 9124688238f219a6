//! Remediation for the error kinds that have a mechanical fix

use crate::evaluator::expected_shape_name;
use crate::report::{ErrorKind, ValidationError, ValidationReport};
use assetcheck_core::{short_name_of, AssetCheckError, NodeRef, Result, SceneEditor, PATH_SEPARATOR};

/// Rename a shape to `<parent>Shape`, or `<parent>ShapeOrig` for an
/// intermediate `...Orig` shape. The namespace of the shape is kept.
pub fn rename_shape_to_match_parent<E: SceneEditor + ?Sized>(
    editor: &mut E,
    node: &NodeRef,
) -> Result<NodeRef> {
    let parent = editor
        .parent(node)?
        .ok_or_else(|| AssetCheckError::NoParent(node.to_string()))?;
    let parent_name = editor.short_name(&parent)?;
    let shape_name = editor.short_name(node)?;
    let new_name = with_namespace_of(node, &expected_shape_name(&parent_name, &shape_name));
    editor.rename(node, &new_name)
}

/// Bake the transforms of a node so its world matrix is identity
pub fn freeze_transform<E: SceneEditor + ?Sized>(editor: &mut E, node: &NodeRef) -> Result<()> {
    editor.freeze_transform(node)
}

/// Move the pivot of a node to the origin
pub fn zero_pivot<E: SceneEditor + ?Sized>(editor: &mut E, node: &NodeRef) -> Result<()> {
    editor.reset_pivot(node)
}

fn with_namespace_of(node: &NodeRef, name: &str) -> String {
    let leaf = node
        .path()
        .rsplit(PATH_SEPARATOR)
        .next()
        .unwrap_or(node.path());
    match leaf.rsplit_once(':') {
        Some((namespace, _)) => format!("{}:{}", namespace, name),
        None => name.to_string(),
    }
}

/// A single fix action that was or would be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixAction {
    pub node: NodeRef,
    pub kind: ErrorKind,
    pub description: String,
}

/// Report of fix operations
#[derive(Debug, Default)]
pub struct FixReport {
    pub actions: Vec<FixAction>,
    /// Errors left untouched: kinds without a fix, or fixes that could not apply
    pub remaining: usize,
}

impl FixReport {
    pub fn fixed(&self) -> usize {
        self.actions.len()
    }
}

/// Applies the remediation matching each fixable error in a report
#[derive(Debug, Default, Clone, Copy)]
pub struct AssetFixer;

impl AssetFixer {
    pub fn new() -> Self {
        Self
    }

    /// What [`AssetFixer::fix`] would do, without touching the scene
    pub fn plan(&self, report: &ValidationReport) -> Vec<FixAction> {
        report.errors.iter().filter_map(planned_action).collect()
    }

    /// Apply every fixable error in `report`.
    ///
    /// A shape rename that would collide with an existing sibling is
    /// skipped and counted as remaining. Any other editor failure aborts.
    pub fn fix<E: SceneEditor + ?Sized>(
        &self,
        editor: &mut E,
        report: &ValidationReport,
    ) -> Result<FixReport> {
        let mut fixes = FixReport::default();

        for error in &report.errors {
            let Some(mut action) = planned_action(error) else {
                fixes.remaining += 1;
                continue;
            };

            match error.kind {
                ErrorKind::ShapeName => match rename_shape_to_match_parent(editor, &error.node) {
                    Ok(renamed) => {
                        action.description = format!("renamed to {}", short_name_of(renamed.path()));
                    }
                    Err(AssetCheckError::DuplicateNode(existing)) => {
                        tracing::warn!(node = %error.node, %existing, "shape rename skipped");
                        fixes.remaining += 1;
                        continue;
                    }
                    Err(err) => return Err(err),
                },
                ErrorKind::Transform => freeze_transform(editor, &error.node)?,
                ErrorKind::Pivot => zero_pivot(editor, &error.node)?,
                _ => {
                    fixes.remaining += 1;
                    continue;
                }
            }

            tracing::debug!(node = %action.node, kind = %action.kind, "applied fix");
            fixes.actions.push(action);
        }

        Ok(fixes)
    }
}

fn planned_action(error: &ValidationError) -> Option<FixAction> {
    let description = match error.kind {
        ErrorKind::ShapeName => {
            let parent = error.node.parent_path()?;
            let shape_name = error.node.short_name();
            format!(
                "rename to {}",
                expected_shape_name(parent.short_name(), shape_name)
            )
        }
        ErrorKind::Transform => "freeze transforms".to_string(),
        ErrorKind::Pivot => "reset pivot to the origin".to_string(),
        _ => return None,
    };

    Some(FixAction {
        node: error.node.clone(),
        kind: error.kind,
        description,
    })
}
