//! Cross-resolution buffer consistency

use crate::hierarchy::{HierarchyValidator, ResolvedSchema};
use assetcheck_core::{NodeRef, Result, SceneGraph};

/// Short-name suffix of buffer nodes
pub const BUFFER_SUFFIX: &str = "_BUF";

/// Buffer transforms below `group`, as paths relative to it, sorted
pub fn collect_buffers<G: SceneGraph + ?Sized>(graph: &G, group: &NodeRef) -> Result<Vec<String>> {
    let mut buffers = Vec::new();
    for node in graph.descendants(group)? {
        if !graph.kind(&node)?.is_transform_like() {
            continue;
        }
        if !graph.short_name(&node)?.ends_with(BUFFER_SUFFIX) {
            continue;
        }
        let relative = node
            .path()
            .strip_prefix(group.path())
            .unwrap_or(node.path())
            .to_string();
        buffers.push(relative);
    }
    buffers.sort();
    Ok(buffers)
}

/// Compares buffer sets of the `LO_GRP`, `MI_GRP` and `HI_GRP` groups.
///
/// Groups without a transform child are skipped. The first populated
/// group sets the baseline; while the baseline is still empty the next
/// populated group replaces it instead of being compared, so a leading
/// group with content but no buffers never fails the check.
pub struct BufferConsistencyValidator;

impl BufferConsistencyValidator {
    /// Resolution groups whose buffers differ from the baseline
    pub fn check<G: SceneGraph + ?Sized>(graph: &G, schema: &ResolvedSchema) -> Result<Vec<NodeRef>> {
        let mut baseline: Vec<String> = Vec::new();
        let mut mismatches = Vec::new();

        for (name, group) in schema.resolution_groups() {
            let Some(group) = group else {
                continue;
            };
            if !is_populated(graph, group)? {
                tracing::trace!(group = name, "empty resolution group skipped");
                continue;
            }

            let buffers = collect_buffers(graph, group)?;
            if baseline.is_empty() {
                baseline = buffers;
            } else if buffers != baseline {
                tracing::debug!(group = name, ?buffers, ?baseline, "buffer mismatch");
                mismatches.push(group.clone());
            }
        }

        Ok(mismatches)
    }

    /// True when every populated resolution group has the same buffers
    pub fn validate<G: SceneGraph + ?Sized>(graph: &G, root: &NodeRef) -> Result<bool> {
        let schema = HierarchyValidator::resolve(graph, root)?;
        Ok(Self::check(graph, &schema)?.is_empty())
    }
}

/// Whether a resolution group takes part in the comparison: it needs at
/// least one transform child
pub fn is_populated<G: SceneGraph + ?Sized>(graph: &G, group: &NodeRef) -> Result<bool> {
    for child in graph.children(group)? {
        if graph.kind(&child)?.is_transform_like() {
            return Ok(true);
        }
    }
    Ok(false)
}
