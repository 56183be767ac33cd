//! `bplan list`: Show the available variants.

use buildplan_common::config::BuildPlanConfig;
use clap::Args;

use crate::output::format_port;

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print names only.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Executes the `list` command.
///
/// # Errors
///
/// Returns an error if the variants file cannot be loaded.
pub fn execute(args: &ListArgs, config: &BuildPlanConfig) -> anyhow::Result<()> {
    let catalog = super::load_catalog(config)?;
    tracing::info!(count = catalog.len(), "listing variants");

    if args.quiet {
        for name in catalog.names() {
            println!("{name}");
        }
        return Ok(());
    }

    println!("{:<24}{:<22}{:<8}ENTRYPOINT", "NAME", "BASE IMAGE", "PORT");
    for variant in catalog.iter() {
        let marker = if variant.name == config.default_variant {
            "*"
        } else {
            ""
        };
        println!(
            "{:<24}{:<22}{:<8}{}",
            format!("{}{marker}", variant.name),
            variant.base_image,
            format_port(variant.exposed_port),
            variant.entrypoint.join(" ")
        );
    }
    Ok(())
}
