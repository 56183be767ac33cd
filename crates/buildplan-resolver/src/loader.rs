//! Loading variants from YAML or JSON files.
//!
//! A variants file holds a single top-level `variants` list:
//!
//! ```yaml
//! variants:
//!   - name: jira-dev
//!     baseImage: python:3.12-slim
//!     sourceMounts:
//!       - { hostPath: src, containerPath: /src }
//!     pythonDependencies: [/src/mcp_jira]
//!     pythonPath: /src
//!     exposedPort: 8001
//!     entrypoint: [python, -m, mcp_jira.main]
//! ```

use std::collections::HashSet;
use std::path::Path;

use buildplan_common::error::{BuildPlanError, Result};
use serde::{Deserialize, Serialize};

use crate::variant::BuildVariant;

/// Supported variants file syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl FileFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns a parse error for missing or unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(BuildPlanError::Parse {
                message: format!(
                    "cannot infer variants file format from {} (expected .yaml, .yml, or .json)",
                    path.display()
                ),
            }),
        }
    }
}

/// On-disk shape of a variants file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantFile {
    /// Variants declared in the file.
    #[serde(default)]
    pub variants: Vec<BuildVariant>,
}

/// Parses variants from file contents in the given format.
///
/// # Errors
///
/// Returns an error if the document is malformed or declares the same
/// variant name twice.
pub fn parse_variants(content: &str, format: FileFormat) -> Result<Vec<BuildVariant>> {
    let file: VariantFile = match format {
        FileFormat::Yaml => serde_yaml::from_str(content)?,
        FileFormat::Json => serde_json::from_str(content)?,
    };
    check_duplicate_names(&file.variants)?;
    Ok(file.variants)
}

/// Reads and parses a variants file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension,
/// or fails to parse.
pub fn load_variants(path: &Path) -> Result<Vec<BuildVariant>> {
    tracing::info!(path = %path.display(), "loading variants file");
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| BuildPlanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let variants = parse_variants(&content, format)?;
    tracing::info!(count = variants.len(), "variants loaded");
    Ok(variants)
}

fn check_duplicate_names(variants: &[BuildVariant]) -> Result<()> {
    let mut seen = HashSet::new();
    for variant in variants {
        if !seen.insert(variant.name.as_str()) {
            return Err(BuildPlanError::Parse {
                message: format!("duplicate variant name: \"{}\"", variant.name),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::PythonDependency;

    const YAML: &str = r"
variants:
  - name: jira-dev
    baseImage: python:3.12-slim
    sourceMounts:
      - { hostPath: src, containerPath: /src }
    systemPackages: [curl]
    pythonDependencies:
      - -r /src/requirements.txt
      - /src/mcp_jira
    pythonPath: /src
    exposedPort: 8001
    entrypoint: [python, -m, mcp_jira.main]
";

    #[test]
    fn parse_yaml_variants() {
        let variants = parse_variants(YAML, FileFormat::Yaml).expect("parse");
        assert_eq!(variants.len(), 1);
        let v = &variants[0];
        assert_eq!(v.name, "jira-dev");
        assert!(v.system_packages.contains("curl"));
        assert_eq!(
            v.python_dependencies[0],
            PythonDependency::Requirements("/src/requirements.txt".into())
        );
    }

    #[test]
    fn parse_json_variants() {
        let json = r#"{"variants": [{
            "name": "sf",
            "baseImage": "python:3.12-slim",
            "sourceMounts": [{"hostPath": "src", "containerPath": "/app/src"}],
            "pythonPath": "/app/src",
            "entrypoint": ["python", "-m", "mcp_salesforce.main"]
        }]}"#;
        let variants = parse_variants(json, FileFormat::Json).expect("parse");
        assert_eq!(variants[0].name, "sf");
        assert!(variants[0].exposed_port.is_none());
    }

    #[test]
    fn empty_document_yields_no_variants() {
        let variants = parse_variants("variants: []\n", FileFormat::Yaml).expect("parse");
        assert!(variants.is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let yaml = r"
variants:
  - { name: a, baseImage: img, pythonPath: /src }
  - { name: a, baseImage: img, pythonPath: /src }
";
        let err = parse_variants(yaml, FileFormat::Yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate variant name"), "got: {err}");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(parse_variants("variants: [ {name: ", FileFormat::Yaml).is_err());
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            FileFormat::from_path(Path::new("v.yml")).expect("yml"),
            FileFormat::Yaml
        );
        assert_eq!(
            FileFormat::from_path(Path::new("v.json")).expect("json"),
            FileFormat::Json
        );
        assert!(FileFormat::from_path(Path::new("v.toml")).is_err());
        assert!(FileFormat::from_path(Path::new("variants")).is_err());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("buildplan.yaml");
        std::fs::write(&path, YAML).expect("write");
        let variants = load_variants(&path).expect("load");
        assert_eq!(variants.len(), 1);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = load_variants(Path::new("/nonexistent/buildplan.yaml")).unwrap_err();
        assert!(matches!(err, BuildPlanError::Io { .. }), "got: {err}");
        assert!(err.to_string().contains("/nonexistent/buildplan.yaml"));
    }
}
