//! Per-part presence rules for node names

use crate::naming::NodeNameData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a name part must, must not, or may appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Required,
    Unrequired,
    Optional,
}

impl Requirement {
    /// Check a part that occurs `count` times
    pub fn allows(self, count: usize) -> bool {
        match self {
            Requirement::Required => count > 0,
            Requirement::Unrequired => count == 0,
            Requirement::Optional => true,
        }
    }
}

/// The parts a name is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamePart {
    Side,
    Name,
    InstanceNumber,
    Type,
    Resolution,
}

impl NamePart {
    fn label(self) -> &'static str {
        match self {
            NamePart::Side => "a side",
            NamePart::Name => "a name",
            NamePart::InstanceNumber => "an instance number",
            NamePart::Type => "a type",
            NamePart::Resolution => "a resolution",
        }
    }
}

/// One violated presence rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameIssue {
    pub part: NamePart,
    pub requirement: Requirement,
}

impl fmt::Display for NameIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.requirement {
            Requirement::Unrequired => write!(f, "must not contain {}", self.part.label()),
            _ => write!(f, "must contain {}", self.part.label()),
        }
    }
}

/// Presence rules for each name part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRules {
    pub side: Requirement,
    pub name: Requirement,
    pub instance_number: Requirement,
    pub type_tag: Requirement,
    pub resolution: Requirement,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            side: Requirement::Optional,
            name: Requirement::Required,
            instance_number: Requirement::Optional,
            type_tag: Requirement::Required,
            resolution: Requirement::Optional,
        }
    }
}

impl NameRules {
    pub fn with_resolution(mut self, resolution: Requirement) -> Self {
        self.resolution = resolution;
        self
    }

    /// Every rule the name data breaks, in part order
    pub fn issues(&self, data: &NodeNameData) -> Vec<NameIssue> {
        let checks = [
            (NamePart::Side, self.side, data.side.len()),
            (NamePart::Name, self.name, data.name.len()),
            (
                NamePart::InstanceNumber,
                self.instance_number,
                data.instance_number.len(),
            ),
            (NamePart::Type, self.type_tag, data.type_tag.len()),
            (NamePart::Resolution, self.resolution, data.resolution.len()),
        ];

        checks
            .into_iter()
            .filter(|(_, requirement, count)| !requirement.allows(*count))
            .map(|(part, requirement, _)| NameIssue { part, requirement })
            .collect()
    }
}
