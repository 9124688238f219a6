//! Name classification command

use super::load_policy;
use anyhow::{anyhow, Result};
use assetcheck_check::{Category, ValidatorDescriptor, ValidatorRegistry};

pub fn run(name: &str, category: Option<&str>, policy: Option<&str>, legacy: bool) -> Result<()> {
    let registry = ValidatorRegistry::new(&load_policy(policy, legacy)?);
    let descriptor = pick_descriptor(&registry, name, category)?;

    println!("Name:     {}", name);
    println!("Category: {}", descriptor.category);
    println!();

    let tokens = descriptor.vocabulary.tokenize(name);
    let width = tokens.iter().map(|t| t.value.len()).max().unwrap_or(0);
    for token in &tokens {
        println!("  {:<width$}  {}", token.value, token.kind.placeholder(), width = width);
    }

    println!();
    println!("Template: {}", descriptor.vocabulary.template_of(name));

    let reasons = descriptor.explain_name(name);
    if reasons.is_empty() {
        println!("Accepted by the {} validator.", descriptor.category);
    } else {
        println!("Rejected by the {} validator:", descriptor.category);
        for reason in reasons {
            println!("  - {}", reason);
        }
        println!();
        println!("Allowed templates:");
        for template in &descriptor.templates {
            println!("  {}", template);
        }
    }

    Ok(())
}

fn pick_descriptor<'a>(
    registry: &'a ValidatorRegistry,
    name: &str,
    category: Option<&str>,
) -> Result<&'a ValidatorDescriptor> {
    match category {
        Some(requested) => {
            let category = Category::ALL
                .into_iter()
                .find(|c| c.as_str() == requested)
                .ok_or_else(|| anyhow!("Unknown category '{}'", requested))?;
            registry
                .get(category)
                .ok_or_else(|| anyhow!("No validator for category '{}'", category))
        }
        None => registry.resolve(name).ok_or_else(|| {
            anyhow!(
                "No validator handles the type tag of '{}'; pass --category to pick one",
                name
            )
        }),
    }
}
