//! `bplan check`: Validate a variant against the build context.

use buildplan_common::config::BuildPlanConfig;
use buildplan_resolver::context::check_context;
use buildplan_resolver::resolve;
use clap::Args;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Variant name (defaults to the configured default variant).
    pub variant: Option<String>,
}

/// Executes the `check` command.
///
/// Resolves the variant first, then verifies every source mount exists in
/// the build context.
///
/// # Errors
///
/// Returns an error on the first failed check.
pub fn execute(args: &CheckArgs, config: &BuildPlanConfig) -> anyhow::Result<()> {
    let catalog = super::load_catalog(config)?;
    let name = args.variant.as_deref().unwrap_or(&config.default_variant);
    let variant = catalog.get(name)?;

    let _ = resolve(variant)?;
    check_context(variant, &config.context_dir)?;

    println!("{name}: ok");
    Ok(())
}
