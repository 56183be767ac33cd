//! `bplan render`: Render a resolved variant as a Dockerfile or JSON.

use std::path::PathBuf;

use buildplan_common::config::{BuildPlanConfig, OutputFormat};
use buildplan_common::error::BuildPlanError;
use buildplan_render::renderer_for;
use buildplan_resolver::resolve;
use clap::{Args, ValueEnum};

/// Output syntax accepted by the global `--format` flag.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Dockerfile instructions.
    Dockerfile,
    /// Pretty-printed JSON.
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Dockerfile => Self::Dockerfile,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Arguments for the `render` command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Variant name (defaults to the configured default variant).
    pub variant: Option<String>,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Executes the `render` command.
///
/// # Errors
///
/// Returns an error if the variant is unknown, fails validation, or the
/// output file cannot be written.
pub fn execute(args: &RenderArgs, config: &BuildPlanConfig) -> anyhow::Result<()> {
    let catalog = super::load_catalog(config)?;
    let name = args.variant.as_deref().unwrap_or(&config.default_variant);
    let plan = resolve(catalog.get(name)?)?;

    let rendered = renderer_for(config.format).render(&plan)?;

    if let Some(ref out_path) = args.output {
        std::fs::write(out_path, &rendered).map_err(|source| BuildPlanError::Io {
            path: out_path.clone(),
            source,
        })?;
        tracing::info!(variant = %plan.variant, path = %out_path.display(), "plan rendered");
        println!("Rendered {} -> {}", plan.variant, out_path.display());
    } else {
        print!("{rendered}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_writes_dockerfile_to_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("Dockerfile");
        let args = RenderArgs {
            variant: Some("split-packages".into()),
            output: Some(out.clone()),
        };
        let config = BuildPlanConfig {
            context_dir: dir.path().to_path_buf(),
            ..BuildPlanConfig::default()
        };
        execute(&args, &config).expect("render");

        let content = std::fs::read_to_string(&out).expect("read");
        assert!(content.starts_with("# Generated by buildplan"));
        assert!(content.contains("ENV PYTHONPATH=/app/src"));
    }

    #[test]
    fn render_rejects_invalid_file_variant() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("buildplan.yaml"),
            "variants:\n  - { name: broken, baseImage: python:3.12-slim, pythonPath: /src, entrypoint: [python] }\n",
        )
        .expect("write");
        let config = BuildPlanConfig {
            context_dir: dir.path().to_path_buf(),
            format: OutputFormat::Json,
            ..BuildPlanConfig::default()
        };
        let args = RenderArgs {
            variant: Some("broken".into()),
            output: Some(dir.path().join("out.json")),
        };
        let err = execute(&args, &config).unwrap_err();
        assert!(err.to_string().contains("sourceMounts"), "got: {err}");
        assert!(!dir.path().join("out.json").exists());
    }

    #[test]
    fn render_uses_configured_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("plan.json");
        let config = BuildPlanConfig {
            context_dir: dir.path().to_path_buf(),
            format: OutputFormat::Json,
            ..BuildPlanConfig::default()
        };
        let args = RenderArgs {
            variant: None,
            output: Some(out.clone()),
        };
        execute(&args, &config).expect("render");

        let content = std::fs::read_to_string(&out).expect("read");
        let plan: serde_json::Value = serde_json::from_str(&content).expect("json");
        assert_eq!(plan["variant"], "fastmcp-pinned");
    }

    #[test]
    fn write_failure_names_output_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("missing").join("Dockerfile");
        let config = BuildPlanConfig {
            context_dir: dir.path().to_path_buf(),
            ..BuildPlanConfig::default()
        };
        let args = RenderArgs {
            variant: None,
            output: Some(out.clone()),
        };
        let err = execute(&args, &config).unwrap_err();
        let io = err.downcast_ref::<BuildPlanError>().expect("workspace error");
        assert!(matches!(io, BuildPlanError::Io { path, .. } if *path == out));
        assert!(err.to_string().contains("missing"), "got: {err}");
    }

    #[test]
    fn format_arg_maps_to_output_format() {
        assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from(FormatArg::Dockerfile),
            OutputFormat::Dockerfile
        );
    }
}
