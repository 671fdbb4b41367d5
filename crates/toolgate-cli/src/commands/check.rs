//! `toolgate check` command.
//!
//! Validates the loaded config against the catalog: every tool must have
//! a handler, and the policy should neither leave tools unreachable nor
//! name tools that do not exist.

use std::collections::BTreeSet;

use clap::Args;

use toolgate_config::GateConfig;
use toolgate_rbac::{Authorizer, PolicyAuthorizer};
use toolgate_types::ToolSpec;

use crate::{builtins, output, shared};

/// Validate config, catalog and policy.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Catalog file (defaults to `catalog.path`).
    #[arg(long)]
    pub catalog: Option<String>,
}

/// Findings from [`review`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Findings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Executes the check command.
pub fn execute(args: &CheckArgs, config: &GateConfig) -> anyhow::Result<()> {
    output::print_success("config loaded");
    let specs = shared::load_catalog(config, args.catalog.as_deref())?;
    output::print_success(&format!("catalog parsed ({} tool(s))", specs.len()));

    let findings = review(config, &specs);
    for warning in &findings.warnings {
        output::print_warning(warning);
    }
    for error in &findings.errors {
        output::print_error(error);
    }
    if !findings.errors.is_empty() {
        anyhow::bail!("check failed with {} error(s)", findings.errors.len());
    }
    output::print_success("all tools bound; policy consistent");
    Ok(())
}

/// Cross-checks catalog, handlers and policy.
pub fn review(config: &GateConfig, specs: &[ToolSpec]) -> Findings {
    let mut findings = Findings::default();
    let authorizer = PolicyAuthorizer::new(config.policy.clone());
    let catalog: BTreeSet<&str> = specs.iter().map(|s| s.name.as_str()).collect();

    for spec in specs {
        if !builtins::NAMES.contains(&spec.name.as_str()) {
            findings
                .errors
                .push(format!("tool '{}' has no handler", spec.name));
        }
        if config.policy.role(spec.required_role.as_str()).is_none() {
            findings.warnings.push(format!(
                "tool '{}' requires role '{}', which has no policy entry",
                spec.name, spec.required_role
            ));
        } else if !authorizer.is_allowed(&spec.required_role, &spec.name) {
            findings.warnings.push(format!(
                "tool '{}' is not allowed for its role '{}'",
                spec.name, spec.required_role
            ));
        }
    }

    for (role, policy) in config.policy.roles() {
        for tool in policy.allow.iter().chain(policy.deny.iter()) {
            if !catalog.contains(tool.as_str()) {
                findings.warnings.push(format!(
                    "policy for role '{role}' names unknown tool '{tool}'"
                ));
            }
        }
    }
    findings
}
