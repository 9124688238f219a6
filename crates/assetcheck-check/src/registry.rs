//! Validator registry: one descriptor per category, looked up by type tag

use crate::name_rules::{NameRules, Requirement};
use crate::naming::{trailing_type_tag, Template, TokenKind, Vocabulary};
use crate::policy::CheckPolicy;
use crate::types::{Category, ContentRule, ValidatorDescriptor};
use std::collections::BTreeSet;

/// Registry of validator descriptors for one validation session
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    descriptors: Vec<ValidatorDescriptor>,
    resolutions: Vec<String>,
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new(&CheckPolicy::default())
    }
}

impl ValidatorRegistry {
    /// Build the descriptor table for a policy
    pub fn new(policy: &CheckPolicy) -> Self {
        let resolutions = policy.naming.resolutions.clone();
        let descriptors = Category::ALL
            .into_iter()
            .map(|category| descriptor(category, policy, &resolutions))
            .collect();

        Self {
            descriptors,
            resolutions,
        }
    }

    /// Registry with the default policy
    pub fn standard() -> Self {
        Self::default()
    }

    /// Get all descriptors
    pub fn all(&self) -> &[ValidatorDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, category: Category) -> Option<&ValidatorDescriptor> {
        self.descriptors.iter().find(|d| d.category == category)
    }

    /// The descriptor whose type tags contain `tag`
    pub fn lookup(&self, tag: &str) -> Option<&ValidatorDescriptor> {
        self.descriptors.iter().find(|d| d.handles_tag(tag))
    }

    /// Resolve the validator for a short name from its trailing type tag
    pub fn resolve(&self, short_name: &str) -> Option<&ValidatorDescriptor> {
        trailing_type_tag(short_name, self.resolutions.as_slice()).and_then(|tag| self.lookup(tag))
    }

    pub fn resolutions(&self) -> &[String] {
        &self.resolutions
    }

    /// Get the number of descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

pub(crate) fn type_tags(category: Category) -> &'static [&'static str] {
    match category {
        Category::Group => &["GRP"],
        Category::Buffer => &["BUF"],
        Category::Mesh => &["MSH"],
        Category::Controller => &["CON"],
        Category::Camera => &["CAM"],
        Category::Joint => &["JNT"],
    }
}

fn content_rule(category: Category) -> ContentRule {
    match category {
        Category::Group => ContentRule::TransformsOrJoints,
        Category::Buffer => ContentRule::TransformsOnly,
        Category::Mesh => ContentRule::UniformGeometry,
        Category::Controller => ContentRule::HasControllerShape,
        Category::Camera => ContentRule::CamerasOnly,
        Category::Joint => ContentRule::Unconstrained,
    }
}

/// `{NODE_NAME}_{TYPE}` with optional side prefix and instance number
fn base_templates() -> Vec<Template> {
    use TokenKind::*;
    vec![
        Template::new([NodeName, Type]),
        Template::new([NodeName, InstanceNumber, Type]),
        Template::new([Side, NodeName, Type]),
        Template::new([Side, NodeName, InstanceNumber, Type]),
    ]
}

fn descriptor(category: Category, policy: &CheckPolicy, resolutions: &[String]) -> ValidatorDescriptor {
    let mesh = category == Category::Mesh;

    let templates: BTreeSet<Template> = base_templates()
        .into_iter()
        .map(|t| if mesh { t.with(TokenKind::Resolution) } else { t })
        .collect();

    let resolution = if mesh {
        Requirement::Required
    } else {
        Requirement::Unrequired
    };

    ValidatorDescriptor {
        category,
        vocabulary: Vocabulary::new(type_tags(category).iter().copied(), resolutions.iter().cloned()),
        templates,
        name_rules: NameRules::default().with_resolution(resolution),
        content: content_rule(category),
        checks: policy.checks_for(category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::INSTANCE_NUMBER_WIDTH;
    use TokenKind::*;

    /// Build a name with one literal per token kind
    fn literal_name(template: &Template, type_tag: &str) -> String {
        template
            .kinds()
            .iter()
            .map(|kind| match kind {
                Side => "L".to_string(),
                InstanceNumber => "0".repeat(INSTANCE_NUMBER_WIDTH),
                Type => type_tag.to_string(),
                Resolution => "low".to_string(),
                NodeName => "piedTable".to_string(),
                Undefined => "12".to_string(),
            })
            .collect::<Vec<_>>()
            .join("_")
    }

    #[test]
    fn test_every_template_round_trips() {
        let registry = ValidatorRegistry::standard();
        for descriptor in registry.all() {
            let tag = descriptor.vocabulary.type_tags().next().unwrap();
            for template in &descriptor.templates {
                let name = literal_name(template, tag);
                assert_eq!(
                    &descriptor.vocabulary.template_of(&name),
                    template,
                    "{} did not round-trip for {}",
                    name,
                    descriptor.category
                );
                assert!(descriptor.accepts_name(&name));
            }
        }
    }

    #[test]
    fn test_no_kind_repeats_within_a_template() {
        let registry = ValidatorRegistry::standard();
        for descriptor in registry.all() {
            for template in &descriptor.templates {
                let unique: BTreeSet<_> = template.kinds().iter().collect();
                assert_eq!(unique.len(), template.len());
            }
        }
    }

    #[test]
    fn test_lookup_by_tag() {
        let registry = ValidatorRegistry::standard();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.lookup("GRP").unwrap().category, Category::Group);
        assert_eq!(registry.lookup("BUF").unwrap().category, Category::Buffer);
        assert_eq!(registry.lookup("MSH").unwrap().category, Category::Mesh);
        assert_eq!(registry.lookup("CON").unwrap().category, Category::Controller);
        assert_eq!(registry.lookup("CAM").unwrap().category, Category::Camera);
        assert_eq!(registry.lookup("JNT").unwrap().category, Category::Joint);
        assert!(registry.lookup("RIG").is_none());
        assert!(registry.lookup("XYZ").is_none());
    }

    #[test]
    fn test_resolve_skips_resolution_tag() {
        let registry = ValidatorRegistry::standard();
        let mesh = registry.resolve("L_piedTable_000_MSH_low").unwrap();
        assert_eq!(mesh.category, Category::Mesh);
        assert!(registry.resolve("piedTable").is_none());
    }

    #[test]
    fn test_documented_name_scenarios() {
        let registry = ValidatorRegistry::standard();

        let mesh = registry.get(Category::Mesh).unwrap();
        assert_eq!(
            mesh.vocabulary.template_of("L_piedTable_000_MSH_low"),
            Template::new([Side, NodeName, InstanceNumber, Type, Resolution])
        );
        assert!(mesh.accepts_name("L_piedTable_000_MSH_low"));

        let group = registry.get(Category::Group).unwrap();
        assert_eq!(
            group.vocabulary.template_of("pieds_GRP"),
            Template::new([NodeName, Type])
        );
        assert!(group.accepts_name("pieds_GRP"));

        let buffer = registry.get(Category::Buffer).unwrap();
        assert_eq!(
            buffer.vocabulary.template_of("Table_Leg_BUF"),
            Template::new([NodeName, NodeName, Type])
        );
        assert!(!buffer.accepts_name("Table_Leg_BUF"));
    }

    #[test]
    fn test_mesh_requires_resolution_and_groups_reject_it() {
        let registry = ValidatorRegistry::standard();
        let mesh = registry.get(Category::Mesh).unwrap();
        assert!(!mesh.accepts_name("piedTable_MSH"));
        let group = registry.get(Category::Group).unwrap();
        assert!(!group.accepts_name("pieds_GRP_low"));
    }

    #[test]
    fn test_explain_rejected_name() {
        let registry = ValidatorRegistry::standard();
        let buffer = registry.get(Category::Buffer).unwrap();
        let reasons = buffer.explain_name("Table_Leg_BUF");
        assert!(reasons.iter().any(|r| r.contains("2 name tokens")));
        assert!(buffer.explain_name("Leg_BUF").is_empty());

        let mesh = registry.get(Category::Mesh).unwrap();
        let reasons = mesh.explain_name("leg_12_MSH");
        assert!(reasons.contains(&"must contain a resolution".to_string()));
        assert!(reasons.iter().any(|r| r.contains("'12'")));
    }

    #[test]
    fn test_policy_flows_into_descriptors() {
        let registry = ValidatorRegistry::new(&CheckPolicy::legacy());
        assert!(registry.get(Category::Mesh).unwrap().checks.history);
        assert!(registry.get(Category::Group).unwrap().checks.pivot);
        assert!(!registry.get(Category::Camera).unwrap().checks.transform);

        let mesh = registry.get(Category::Mesh).unwrap();
        assert!(mesh.accepts_name("piedTable_MSH_sculpt"));
        assert_eq!(
            registry.resolve("piedTable_MSH_sculpt").unwrap().category,
            Category::Mesh
        );
    }

    #[test]
    fn test_default_policy_rejects_sculpt() {
        let registry = ValidatorRegistry::standard();
        assert!(registry.resolve("piedTable_MSH_sculpt").is_none());
    }
}
