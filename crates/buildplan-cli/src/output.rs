//! Formatted output helpers for CLI commands.

use buildplan_resolver::BuildStep;

/// Formats an optional port for table output.
#[must_use]
pub fn format_port(port: Option<u32>) -> String {
    port.map_or_else(|| "-".to_string(), |p| p.to_string())
}

/// Formats a plan step as a single human-readable line.
#[must_use]
pub fn format_step(step: &BuildStep) -> String {
    match step {
        BuildStep::BaseImage { image } => format!("base image     {image}"),
        BuildStep::InstallSystemPackages { packages } => {
            format!("system pkgs    {}", packages.join(", "))
        }
        BuildStep::Workdir { path } => format!("workdir        {path}"),
        BuildStep::Copy { host, container } => format!("copy           {host} -> {container}"),
        BuildStep::InstallDependency { dependency } => format!("pip install    {dependency}"),
        BuildStep::SetEnv { key, value } => format!("env            {key}={value}"),
        BuildStep::Expose { port } => format!("expose         {port}"),
        BuildStep::Entrypoint { argv } => format!("entrypoint     {}", argv.join(" ")),
    }
}
