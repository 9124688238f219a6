//! assetcheck CLI - validate asset scene graphs before publish

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{tokens, validate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "assetcheck")]
#[command(about = "Naming and structure checks for published assets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an asset in a scene file
    Validate {
        /// Path to scene file
        scene: String,

        /// Full path of the asset root (defaults to the first top-level node)
        #[arg(long)]
        root: Option<String>,

        /// Path to a check policy TOML file
        #[arg(long, conflicts_with = "legacy")]
        policy: Option<String>,

        /// Use the older checker's policy (history on meshes, transforms and
        /// pivots on groups and buffers, sculpt resolution)
        #[arg(long)]
        legacy: bool,

        /// Apply fixes and save the scene
        #[arg(long)]
        fix: bool,

        /// Show the fixes that would be applied without saving
        #[arg(long, conflicts_with = "fix")]
        dry_run: bool,

        /// Print the buffers of each resolution group
        #[arg(long)]
        verbose: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show how a name is tokenized and classified
    Tokens {
        /// Short node name
        name: String,

        /// Validator category (group, buffer, mesh, controller, camera, joint)
        #[arg(long)]
        category: Option<String>,

        /// Path to a check policy TOML file
        #[arg(long, conflicts_with = "legacy")]
        policy: Option<String>,

        /// Accept the sculpt resolution
        #[arg(long)]
        legacy: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            scene,
            root,
            policy,
            legacy,
            fix,
            dry_run,
            verbose,
            format,
        } => validate::run(validate::ValidateArgs {
            scene,
            root,
            policy,
            legacy,
            fix,
            dry_run,
            verbose,
            format,
        }),
        Commands::Tokens {
            name,
            category,
            policy,
            legacy,
        } => tokens::run(&name, category.as_deref(), policy.as_deref(), legacy),
    }
}
