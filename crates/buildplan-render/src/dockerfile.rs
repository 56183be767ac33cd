//! Dockerfile rendering.

use std::fmt::Write as _;

use buildplan_common::constants::APP_NAME;
use buildplan_common::error::{BuildPlanError, Result};
use buildplan_resolver::{BuildPlan, BuildStep};

use crate::PlanRenderer;

/// Renders plans as Dockerfile instructions, one instruction per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerfileRenderer;

impl PlanRenderer for DockerfileRenderer {
    fn render(&self, plan: &BuildPlan) -> Result<String> {
        tracing::debug!(variant = %plan.variant, "rendering Dockerfile");
        let mut out = format!("# Generated by {APP_NAME} for variant \"{}\"\n", plan.variant);
        for step in &plan.steps {
            out.push_str(&instruction(step)?);
            out.push('\n');
        }
        Ok(out)
    }
}

fn instruction(step: &BuildStep) -> Result<String> {
    let line = match step {
        BuildStep::BaseImage { image } => format!("FROM {}", single_line("FROM", image)?),
        BuildStep::InstallSystemPackages { packages } => {
            let mut words = Vec::with_capacity(packages.len());
            for package in packages {
                words.push(shell_word(single_line("RUN", package)?));
            }
            format!(
                "RUN apt-get update \\\n && apt-get install -y --no-install-recommends {} \\\n && rm -rf /var/lib/apt/lists/*",
                words.join(" ")
            )
        }
        BuildStep::Workdir { path } => {
            let path = single_line("WORKDIR", path)?;
            if needs_quoting(path) {
                format!("WORKDIR {}", serde_json::to_string(path)?)
            } else {
                format!("WORKDIR {path}")
            }
        }
        BuildStep::Copy { host, container } => {
            if needs_quoting(host) || needs_quoting(container) {
                format!("COPY {}", serde_json::to_string(&[host, container])?)
            } else {
                format!("COPY {host} {container}")
            }
        }
        BuildStep::InstallDependency { dependency } => {
            let mut line = String::from("RUN pip install --no-cache-dir");
            for arg in dependency.pip_args() {
                let _ = write!(line, " {}", shell_word(single_line("RUN", &arg)?));
            }
            line
        }
        BuildStep::SetEnv { key, value } => {
            let key = single_line("ENV", key)?;
            if needs_quoting(value) || value.is_empty() {
                format!("ENV {key}={}", serde_json::to_string(value)?)
            } else {
                format!("ENV {key}={value}")
            }
        }
        BuildStep::Expose { port } => format!("EXPOSE {port}"),
        BuildStep::Entrypoint { argv } => format!("CMD {}", serde_json::to_string(argv)?),
    };
    Ok(line)
}

fn needs_quoting(value: &str) -> bool {
    value.chars().any(|c| c.is_whitespace() || c.is_control() || c == '"')
}

/// Returns `value` unchanged if it cannot end the instruction it is
/// written into. Values outside JSON form must not carry control
/// characters: a newline would start a new instruction.
fn single_line<'a>(instruction: &str, value: &'a str) -> Result<&'a str> {
    if value.chars().any(char::is_control) {
        return Err(BuildPlanError::Parse {
            message: format!("{instruction} argument {value:?} contains a control character"),
        });
    }
    Ok(value)
}

fn shell_word(arg: &str) -> String {
    if needs_quoting(arg) || arg.contains(['$', '\'', '\\', ';', '&', '|', '<', '>']) {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_string()
    }
}
