//! Validation report types

use assetcheck_core::NodeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The rule a validation error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Hierarchy,
    Buffers,
    Name,
    ShapeName,
    Content,
    History,
    Transform,
    Pivot,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::Hierarchy,
        ErrorKind::Buffers,
        ErrorKind::Name,
        ErrorKind::ShapeName,
        ErrorKind::Content,
        ErrorKind::History,
        ErrorKind::Transform,
        ErrorKind::Pivot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Hierarchy => "hierarchy",
            ErrorKind::Buffers => "buffers",
            ErrorKind::Name => "name",
            ErrorKind::ShapeName => "shapeName",
            ErrorKind::Content => "content",
            ErrorKind::History => "history",
            ErrorKind::Transform => "transform",
            ErrorKind::Pivot => "pivot",
        }
    }

    /// Whether [`crate::AssetFixer`] can repair this kind
    pub fn has_auto_fix(self) -> bool {
        matches!(
            self,
            ErrorKind::ShapeName | ErrorKind::Transform | ErrorKind::Pivot
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub node: NodeRef,
    pub kind: ErrorKind,
    /// Why a name was rejected; empty for the other kinds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detail: Vec<String>,
}

impl ValidationError {
    pub fn new(node: NodeRef, kind: ErrorKind) -> Self {
        Self {
            node,
            kind,
            detail: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: Vec<String>) -> Self {
        self.detail = detail;
        self
    }

    /// The user-facing message for this error
    pub fn message(&self) -> String {
        let node = &self.node;
        match self.kind {
            ErrorKind::Hierarchy => format!("The hierarchy of {} is not valid.", node),
            ErrorKind::Buffers => format!(
                "The asset {} has different buffers in all resolutions.",
                node
            ),
            ErrorKind::Name => format!("The name of {} is invalid.", node),
            ErrorKind::ShapeName => format!("The shape name of {} is invalid.", node),
            ErrorKind::Content => format!("The content of {} is invalid.", node),
            ErrorKind::History => format!(
                "The node {} has history that should be deleted.",
                node
            ),
            ErrorKind::Transform => format!(
                "The node {} has transforms that should be frozen.",
                node
            ),
            ErrorKind::Pivot => format!("The pivot of {} is not identity.", node),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Every error found in one validation pass, in traversal order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if the asset passed every rule
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Count errors of one kind
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }

    pub fn by_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    /// `(node, kind)` pairs with their multiplicity, ignoring order and detail
    pub fn kind_multiset(&self) -> BTreeMap<(NodeRef, ErrorKind), usize> {
        let mut set = BTreeMap::new();
        for error in &self.errors {
            *set.entry((error.node.clone(), error.kind)).or_insert(0) += 1;
        }
        set
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            return "No errors found.".to_string();
        }

        let counts: Vec<String> = ErrorKind::ALL
            .iter()
            .filter_map(|&kind| match self.count(kind) {
                0 => None,
                n => Some(format!("{} {}", n, kind)),
            })
            .collect();

        format!("{} error(s): {}", self.errors.len(), counts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(path: &str, kind: ErrorKind) -> ValidationError {
        ValidationError::new(NodeRef::new(path), kind)
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert_eq!(report.summary(), "No errors found.");
    }

    #[test]
    fn test_counts_and_summary() {
        let mut report = ValidationReport::new();
        report.push(error("|a_RIG", ErrorKind::Hierarchy));
        report.push(error("|a_RIG|x_GRP", ErrorKind::Name));
        report.push(error("|a_RIG|y_GRP", ErrorKind::Name));

        assert!(!report.is_valid());
        assert_eq!(report.len(), 3);
        assert_eq!(report.count(ErrorKind::Name), 2);
        assert_eq!(report.by_kind(ErrorKind::Hierarchy).count(), 1);
        assert_eq!(report.summary(), "3 error(s): 1 hierarchy, 2 name");
    }

    #[test]
    fn test_multiset_ignores_order_and_detail() {
        let mut first = ValidationReport::new();
        first.push(error("|a", ErrorKind::Name).with_detail(vec!["x".into()]));
        first.push(error("|b", ErrorKind::Pivot));

        let mut second = ValidationReport::new();
        second.push(error("|b", ErrorKind::Pivot));
        second.push(error("|a", ErrorKind::Name));

        assert_ne!(first, second);
        assert_eq!(first.kind_multiset(), second.kind_multiset());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            error("|table_RIG", ErrorKind::Buffers).message(),
            "The asset |table_RIG has different buffers in all resolutions."
        );
        assert_eq!(
            error("|a|b_GRP", ErrorKind::Pivot).to_string(),
            "The pivot of |a|b_GRP is not identity."
        );
    }

    #[test]
    fn test_kind_serializes_camel_case() {
        #[derive(Serialize)]
        struct Wrapper {
            kind: ErrorKind,
        }
        let out = toml::to_string(&Wrapper {
            kind: ErrorKind::ShapeName,
        })
        .unwrap();
        assert_eq!(out.trim(), "kind = \"shapeName\"");
    }
}
