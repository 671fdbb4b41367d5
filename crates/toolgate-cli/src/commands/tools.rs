//! `toolgate tools` command.

use clap::Args;

use toolgate_config::GateConfig;
use toolgate_rbac::{Authorizer, PolicyAuthorizer};

use crate::shared;

/// List catalog tools.
#[derive(Debug, Args)]
pub struct ToolsArgs {
    /// Catalog file (defaults to `catalog.path`).
    #[arg(long)]
    pub catalog: Option<String>,
}

/// Executes the tools command.
pub fn execute(args: &ToolsArgs, config: &GateConfig) -> anyhow::Result<()> {
    let specs = shared::load_catalog(config, args.catalog.as_deref())?;
    if specs.is_empty() {
        println!("No tools in catalog.");
        return Ok(());
    }

    let authorizer = PolicyAuthorizer::new(config.policy.clone());
    println!("{:<20} {:<12} {:<8} DESCRIPTION", "NAME", "ROLE", "ALLOWED");
    for spec in &specs {
        let allowed = authorizer.is_allowed(&spec.required_role, &spec.name);
        println!(
            "{:<20} {:<12} {:<8} {}",
            spec.name.as_str(),
            spec.required_role.as_str(),
            if allowed { "yes" } else { "no" },
            spec.description
        );
    }
    println!("\n{} tool(s)", specs.len());
    Ok(())
}
