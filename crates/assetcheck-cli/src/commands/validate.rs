//! Asset validation command

use super::load_policy;
use anyhow::{anyhow, Result};
use assetcheck_check::{
    collect_buffers, is_populated, validate_asset, AssetFixer, HierarchyValidator,
    ValidationReport, ValidatorRegistry,
};
use assetcheck_core::NodeRef;
use assetcheck_scene::{load_scene, save_scene, SceneWorld};

pub struct ValidateArgs {
    pub scene: String,
    pub root: Option<String>,
    pub policy: Option<String>,
    pub legacy: bool,
    pub fix: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub format: String,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let policy = load_policy(args.policy.as_deref(), args.legacy)?;
    let registry = ValidatorRegistry::new(&policy);

    let (mut world, scene_file) = load_scene(&args.scene)?;
    let root = resolve_root(&world, args.root.as_deref())?;
    tracing::debug!(scene = %args.scene, root = %root, "loaded scene");

    if args.verbose {
        print_buffers(&world, &root)?;
    }

    let report = validate_asset(&world, &root, &registry)?;
    let fixer = AssetFixer::new();

    if args.dry_run {
        print_report(&report, &args.format);
        let plan = fixer.plan(&report);
        println!();
        if plan.is_empty() {
            println!("No fixes would be applied.");
        } else {
            println!("Dry run: {} fix(es) would be applied:", plan.len());
            for action in &plan {
                println!("  [{}] {}: {}", action.kind, action.node, action.description);
            }
        }
    } else if args.fix {
        let fixes = fixer.fix(&mut world, &report)?;

        println!("Fix results:");
        for action in &fixes.actions {
            println!("  [{}] {}: {}", action.kind, action.node, action.description);
        }

        if !fixes.actions.is_empty() {
            save_scene(&args.scene, &world, &scene_file.scene)?;
            println!("\nScene saved to {}", args.scene);
        }

        let after = validate_asset(&world, &root, &registry)?;
        println!();
        print_report(&after, &args.format);
        if !after.is_valid() {
            std::process::exit(1);
        }
        return Ok(());
    } else {
        print_report(&report, &args.format);
    }

    if !report.is_valid() {
        std::process::exit(1);
    }

    Ok(())
}

fn resolve_root(world: &SceneWorld, root: Option<&str>) -> Result<NodeRef> {
    match root {
        Some(path) => {
            let node = NodeRef::new(path);
            if !world.contains(&node) {
                return Err(anyhow!("Asset root '{}' not found in scene", path));
            }
            Ok(node)
        }
        None => world
            .roots()
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Scene has no nodes")),
    }
}

fn print_buffers(world: &SceneWorld, root: &NodeRef) -> Result<()> {
    for line in buffer_lines(world, root)? {
        println!("{}", line);
    }
    println!();
    Ok(())
}

/// One header line per resolution group followed by its buffers
fn buffer_lines(world: &SceneWorld, root: &NodeRef) -> Result<Vec<String>> {
    let schema = HierarchyValidator::resolve(world, root)?;
    let mut lines = Vec::new();
    for (name, group) in schema.resolution_groups() {
        let Some(group) = group else {
            lines.push(format!("{} (missing)", name));
            continue;
        };
        let buffers = collect_buffers(world, group)?;
        let empty = if is_populated(world, group)? { "" } else { ", empty" };
        lines.push(format!("{} ({} buffer(s){}):", name, buffers.len(), empty));
        lines.extend(buffers.into_iter().map(|buffer| format!("  {}", buffer)));
    }
    Ok(lines)
}

fn print_report(report: &ValidationReport, format: &str) {
    if format == "json" {
        print_report_json(report);
    } else {
        print_report_text(report);
    }
}

fn print_report_text(report: &ValidationReport) {
    if report.is_valid() {
        println!("All checks passed.");
        return;
    }

    println!("{}", report.summary());
    println!();

    for error in &report.errors {
        let fix_marker = if error.kind.has_auto_fix() { " [fixable]" } else { "" };
        println!("  [{}] {}{}", error.kind, error.message(), fix_marker);
        for detail in &error.detail {
            println!("      {}", detail);
        }
    }
}

fn print_report_json(report: &ValidationReport) {
    let errors: Vec<serde_json::Value> = report
        .errors
        .iter()
        .map(|e| {
            serde_json::json!({
                "node": e.node,
                "kind": e.kind,
                "message": e.message(),
                "detail": e.detail,
                "has_auto_fix": e.kind.has_auto_fix(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "valid": report.is_valid(),
        "summary": report.summary(),
        "count": report.len(),
        "errors": errors,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(err) => tracing::warn!(error = %err, "failed to render JSON report"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetcheck_core::NodeKind;

    #[test]
    fn test_root_defaults_to_first_top_level_node() {
        let mut world = SceneWorld::new();
        world.add_path("|table_RIG", NodeKind::Transform).unwrap();
        world.add_path("|chair_RIG", NodeKind::Transform).unwrap();

        assert_eq!(resolve_root(&world, None).unwrap().path(), "|table_RIG");
        assert_eq!(
            resolve_root(&world, Some("|chair_RIG")).unwrap().path(),
            "|chair_RIG"
        );
        assert!(resolve_root(&world, Some("|lamp_RIG")).is_err());
    }

    #[test]
    fn test_empty_scene_has_no_root() {
        assert!(resolve_root(&SceneWorld::new(), None).is_err());
    }

    #[test]
    fn test_group_with_only_a_shape_is_listed_as_empty() {
        let mut world = SceneWorld::new();
        world.add_path("|table_RIG", NodeKind::Transform).unwrap();
        world.add_path("|table_RIG|meshes_GRP", NodeKind::Transform).unwrap();
        world.add_path("|table_RIG|meshes_GRP|LO_GRP", NodeKind::Transform).unwrap();
        world.add_path("|table_RIG|meshes_GRP|LO_GRP|leg_BUF", NodeKind::Transform).unwrap();
        world.add_path("|table_RIG|meshes_GRP|MI_GRP", NodeKind::Transform).unwrap();
        world.add_path("|table_RIG|meshes_GRP|MI_GRP|strayShape", NodeKind::Mesh).unwrap();

        let lines = buffer_lines(&world, &NodeRef::new("|table_RIG")).unwrap();
        assert!(lines.contains(&"LO_GRP (1 buffer(s)):".to_string()));
        assert!(lines.contains(&"  |leg_BUF".to_string()));
        assert!(lines.contains(&"MI_GRP (0 buffer(s), empty):".to_string()));
        assert!(lines.contains(&"HI_GRP (missing)".to_string()));
    }
}
