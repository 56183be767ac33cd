//! `bplan plan`: Resolve a variant and display its build steps.

use buildplan_common::config::BuildPlanConfig;
use buildplan_resolver::resolve;
use clap::Args;

use crate::output::format_step;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Variant name (defaults to the configured default variant).
    pub variant: Option<String>,
}

/// Executes the `plan` command.
///
/// Resolves the variant and prints one numbered line per step followed
/// by the plan digest.
///
/// # Errors
///
/// Returns an error if the variant is unknown or fails validation.
pub fn execute(args: &PlanArgs, config: &BuildPlanConfig) -> anyhow::Result<()> {
    let catalog = super::load_catalog(config)?;
    let name = args.variant.as_deref().unwrap_or(&config.default_variant);
    let plan = resolve(catalog.get(name)?)?;

    println!("Build plan for: {}", plan.variant);
    println!("{}", "\u{2550}".repeat(35));
    println!();
    for (i, step) in plan.steps.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, format_step(step));
    }
    println!();
    println!("  {} step(s), digest {}", plan.steps.len(), plan.digest()?.short());
    Ok(())
}
