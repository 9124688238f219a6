//! Asset validation pass

use crate::buffers::BufferConsistencyValidator;
use crate::hierarchy::HierarchyValidator;
use crate::naming::trailing_type_tag;
use crate::registry::ValidatorRegistry;
use crate::report::{ErrorKind, ValidationError, ValidationReport};
use crate::structural::{has_non_deformer_history, has_transform, is_pivot_identity};
use crate::types::ValidatorDescriptor;
use assetcheck_core::{AssetCheckError, NodeRef, Result, SceneGraph};

/// Shape suffixes accepted after the parent's short name
const SHAPE_SUFFIXES: [&str; 2] = ["Shape", "ShapeOrig"];

/// Validates an asset against a validator registry
pub struct AssetValidator<'a, G: SceneGraph + ?Sized> {
    graph: &'a G,
    registry: &'a ValidatorRegistry,
}

impl<'a, G: SceneGraph + ?Sized> AssetValidator<'a, G> {
    /// Create a new validator
    pub fn new(graph: &'a G, registry: &'a ValidatorRegistry) -> Self {
        Self { graph, registry }
    }

    /// Run the hierarchy and buffer checks on `root`, then every per-node
    /// check on the content of the meshes, rig and bones groups.
    ///
    /// Rule violations end up in the report; accessor failures are returned
    /// as errors and abort the pass.
    pub fn validate_asset(&self, root: &NodeRef) -> Result<ValidationReport> {
        let mut report = ValidationReport::new();
        let schema = HierarchyValidator::resolve(self.graph, root)?;

        if !schema.is_complete() {
            let missing = schema.missing().iter().map(|m| format!("missing {}", m)).collect();
            report.push(ValidationError::new(root.clone(), ErrorKind::Hierarchy).with_detail(missing));
        }

        let mismatches = BufferConsistencyValidator::check(self.graph, &schema)?;
        if !mismatches.is_empty() {
            let detail = mismatches
                .iter()
                .map(|g| format!("{} differs from the first populated resolution", g))
                .collect();
            report.push(ValidationError::new(root.clone(), ErrorKind::Buffers).with_detail(detail));
        }

        let mut content = Vec::new();
        for group in schema.top_groups() {
            content.extend(self.graph.descendants(group)?);
        }
        tracing::debug!(root = %root, nodes = content.len(), "validating asset content");

        self.validate_nodes(&content, &mut report)?;
        Ok(report)
    }

    pub fn validate_nodes(&self, nodes: &[NodeRef], report: &mut ValidationReport) -> Result<()> {
        for node in nodes {
            self.validate_node(node, report)?;
        }
        Ok(())
    }

    /// Shapes get the shape-name check; every other node is dispatched on
    /// its trailing type tag.
    pub fn validate_node(&self, node: &NodeRef, report: &mut ValidationReport) -> Result<()> {
        if self.graph.kind(node)?.is_shape() {
            return self.check_shape_name(node, report);
        }

        let short_name = self.graph.short_name(node)?;
        let Some(descriptor) = self.registry.resolve(&short_name) else {
            let tag = trailing_type_tag(&short_name, self.registry.resolutions()).unwrap_or("");
            tracing::debug!(node = %node, tag, "no validator for tag");
            report.push(
                ValidationError::new(node.clone(), ErrorKind::Name)
                    .with_detail(vec![format!("no validator for type tag '{}'", tag)]),
            );
            return Ok(());
        };

        tracing::debug!(node = %node, category = %descriptor.category, "dispatch");
        self.check_descriptor(node, &short_name, descriptor, report)
    }

    fn check_shape_name(&self, node: &NodeRef, report: &mut ValidationReport) -> Result<()> {
        let parent = self
            .graph
            .parent(node)?
            .ok_or_else(|| AssetCheckError::NoParent(node.to_string()))?;
        let parent_name = self.graph.short_name(&parent)?;
        let name = self.graph.short_name(node)?;

        let matches = SHAPE_SUFFIXES
            .iter()
            .any(|suffix| name.strip_prefix(parent_name.as_str()) == Some(*suffix));
        tracing::debug!(node = %node, parent = %parent_name, matches, "shape checked against parent");

        if !matches {
            report.push(ValidationError::new(node.clone(), ErrorKind::ShapeName));
        }
        Ok(())
    }

    fn check_descriptor(
        &self,
        node: &NodeRef,
        short_name: &str,
        descriptor: &ValidatorDescriptor,
        report: &mut ValidationReport,
    ) -> Result<()> {
        if !descriptor.accepts_name(short_name) {
            report.push(
                ValidationError::new(node.clone(), ErrorKind::Name)
                    .with_detail(descriptor.explain_name(short_name)),
            );
        }

        if !descriptor.content.evaluate(self.graph, node)? {
            report.push(ValidationError::new(node.clone(), ErrorKind::Content));
        }

        let checks = descriptor.checks;
        if checks.history && has_non_deformer_history(self.graph, node)? {
            report.push(ValidationError::new(node.clone(), ErrorKind::History));
        }
        if checks.transform && has_transform(self.graph, node)? {
            report.push(ValidationError::new(node.clone(), ErrorKind::Transform));
        }
        if checks.pivot && !is_pivot_identity(self.graph, node)? {
            report.push(ValidationError::new(node.clone(), ErrorKind::Pivot));
        }
        Ok(())
    }
}

/// Validate the asset under `root` with a registry built for this session
pub fn validate_asset<G: SceneGraph + ?Sized>(
    graph: &G,
    root: &NodeRef,
    registry: &ValidatorRegistry,
) -> Result<ValidationReport> {
    AssetValidator::new(graph, registry).validate_asset(root)
}

/// The name a shape under `parent_name` is expected to have
pub(crate) fn expected_shape_name(parent_name: &str, shape_name: &str) -> String {
    let suffix = if shape_name.ends_with("Orig") {
        SHAPE_SUFFIXES[1]
    } else {
        SHAPE_SUFFIXES[0]
    };
    format!("{}{}", parent_name, suffix)
}
