//! CLI command definitions and dispatch.

pub mod check;
pub mod list;
pub mod plan;
pub mod render;

use std::path::PathBuf;

use buildplan_common::config::BuildPlanConfig;
use buildplan_common::constants::{DEFAULT_CONTEXT_DIR, DEFAULT_VARIANT};
use buildplan_resolver::Catalog;
use buildplan_resolver::loader::load_variants;
use clap::{Parser, Subcommand};

/// bplan: resolve and render container build variants.
#[derive(Parser, Debug)]
#[command(name = "bplan", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// YAML/JSON file with extra or overriding variants.
    #[arg(long, global = true, env = "BUILDPLAN_VARIANTS")]
    pub variants_file: Option<PathBuf>,

    /// Build context directory that source mounts are copied from.
    #[arg(long, global = true, env = "BUILDPLAN_CONTEXT", default_value = DEFAULT_CONTEXT_DIR)]
    pub context: PathBuf,

    /// Variant used when a command names none.
    #[arg(long, global = true, env = "BUILDPLAN_DEFAULT_VARIANT", default_value = DEFAULT_VARIANT)]
    pub default_variant: String,

    /// Output syntax for `render`.
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        env = "BUILDPLAN_FORMAT",
        default_value_t = render::FormatArg::Dockerfile
    )]
    pub format: render::FormatArg,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available variants.
    List(list::ListArgs),
    /// Resolve a variant and print its build steps.
    Plan(plan::PlanArgs),
    /// Resolve a variant and render it as a Dockerfile or JSON.
    Render(render::RenderArgs),
    /// Resolve a variant and verify its source mounts exist in the context.
    Check(check::CheckArgs),
}

impl Cli {
    /// Builds the tool configuration from global flags.
    #[must_use]
    pub fn config(&self) -> BuildPlanConfig {
        BuildPlanConfig {
            variants_file: self.variants_file.clone(),
            context_dir: self.context.clone(),
            default_variant: self.default_variant.clone(),
            format: self.format.into(),
        }
    }
}

/// Builds the catalog: built-ins, overridden by the variants file if any.
///
/// # Errors
///
/// Returns an error if the variants file cannot be loaded.
pub fn load_catalog(config: &BuildPlanConfig) -> anyhow::Result<Catalog> {
    let mut catalog = Catalog::with_builtins();
    if let Some(path) = config.effective_variants_file() {
        catalog.merge(load_variants(&path)?);
    }
    Ok(catalog)
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config();
    match cli.command {
        Command::List(args) => list::execute(&args, &config),
        Command::Plan(args) => plan::execute(&args, &config),
        Command::Render(args) => render::execute(&args, &config),
        Command::Check(args) => check::execute(&args, &config),
    }
}
