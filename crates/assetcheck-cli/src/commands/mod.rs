//! CLI command implementations

pub mod tokens;
pub mod validate;

use anyhow::Result;
use assetcheck_check::CheckPolicy;

/// The policy selected by the `--policy` and `--legacy` flags
pub fn load_policy(path: Option<&str>, legacy: bool) -> Result<CheckPolicy> {
    let policy = match path {
        Some(path) => CheckPolicy::load_file(path)?,
        None if legacy => CheckPolicy::legacy(),
        None => CheckPolicy::default(),
    };
    Ok(policy)
}
