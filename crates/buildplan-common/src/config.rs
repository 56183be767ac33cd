//! Tool configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Output syntax for a rendered plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Dockerfile instructions.
    #[default]
    Dockerfile,
    /// Pretty-printed JSON of the plan.
    Json,
}

/// Root configuration for a buildplan invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildPlanConfig {
    /// Optional YAML/JSON file with additional or overriding variants.
    pub variants_file: Option<PathBuf>,
    /// Directory `hostPath`s are resolved against.
    pub context_dir: PathBuf,
    /// Variant used when none is named.
    pub default_variant: String,
    /// Default output syntax for `render`.
    pub format: OutputFormat,
}

impl Default for BuildPlanConfig {
    fn default() -> Self {
        Self {
            variants_file: None,
            context_dir: PathBuf::from(crate::constants::DEFAULT_CONTEXT_DIR),
            default_variant: crate::constants::DEFAULT_VARIANT.to_string(),
            format: OutputFormat::default(),
        }
    }
}

impl BuildPlanConfig {
    /// Returns the variants file to load, if any.
    ///
    /// An explicit `variants_file` always wins. Otherwise the default
    /// `buildplan.yaml` inside the build context is used when it exists.
    #[must_use]
    pub fn effective_variants_file(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.variants_file {
            return Some(path.clone());
        }
        let fallback = self
            .context_dir
            .join(crate::constants::DEFAULT_VARIANTS_FILE);
        fallback.is_file().then_some(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_current_directory() {
        let config = BuildPlanConfig::default();
        assert_eq!(config.context_dir, PathBuf::from("."));
        assert_eq!(config.default_variant, "fastmcp-pinned");
        assert_eq!(config.format, OutputFormat::Dockerfile);
    }

    #[test]
    fn explicit_variants_file_wins() {
        let config = BuildPlanConfig {
            variants_file: Some(PathBuf::from("/nonexistent/custom.yaml")),
            ..BuildPlanConfig::default()
        };
        assert_eq!(
            config.effective_variants_file(),
            Some(PathBuf::from("/nonexistent/custom.yaml"))
        );
    }

    #[test]
    fn fallback_variants_file_requires_existence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = BuildPlanConfig {
            context_dir: dir.path().to_path_buf(),
            ..BuildPlanConfig::default()
        };
        assert!(config.effective_variants_file().is_none());

        std::fs::write(dir.path().join("buildplan.yaml"), "variants: []\n").expect("write");
        assert_eq!(
            config.effective_variants_file(),
            Some(dir.path().join("buildplan.yaml"))
        );
    }

    #[test]
    fn output_format_serializes_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Json).expect("serialize");
        assert_eq!(json, "\"json\"");
    }
}
