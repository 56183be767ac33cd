//! The `BuildVariant` data model.
//!
//! A variant is one complete, named way of building the service image.
//! Variants are plain data; they are validated only by [`crate::resolve`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use buildplan_common::error::BuildPlanError;
use buildplan_common::types::ContainerPath;
use serde::{Deserialize, Serialize};

/// A single source copy from the build context into the image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMount {
    /// Path relative to the build context.
    pub host_path: String,
    /// Destination inside the image.
    pub container_path: String,
}

impl SourceMount {
    /// Creates a mount copying `host_path` to `container_path`.
    #[must_use]
    pub fn new(host_path: impl Into<String>, container_path: impl Into<String>) -> Self {
        Self {
            host_path: host_path.into(),
            container_path: container_path.into(),
        }
    }
}

/// One entry of a variant's python dependency list.
///
/// Parsed from the textual forms accepted in variant files:
/// - `-r <path>` or `--requirement <path>`: a requirements file,
/// - `/abs/path`, `./rel/path`, or `file://<path>`: a local path install,
/// - `name@version` or `name==version`: a pinned package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PythonDependency {
    /// A requirements file inside the image.
    Requirements(String),
    /// A package directory inside the image, installed with `pip install <path>`.
    LocalPath(String),
    /// A package fetched from the index at an exact version.
    Pinned {
        /// Distribution name.
        name: String,
        /// Exact version.
        version: String,
    },
}

impl PythonDependency {
    /// Returns the normalized install target for local path dependencies.
    ///
    /// Relative paths are resolved against `base` (the variant's working
    /// directory). Other dependency kinds have no local target.
    #[must_use]
    pub fn local_target(&self, base: &str) -> Option<ContainerPath> {
        match self {
            Self::LocalPath(path) => Some(ContainerPath::resolve(base, path)),
            Self::Requirements(_) | Self::Pinned { .. } => None,
        }
    }

    /// Returns the argument list passed to `pip install` for this entry.
    #[must_use]
    pub fn pip_args(&self) -> Vec<String> {
        match self {
            Self::Requirements(path) => vec!["-r".into(), path.clone()],
            Self::LocalPath(path) => vec![path.clone()],
            Self::Pinned { name, version } => vec![format!("{name}=={version}")],
        }
    }
}

fn is_distribution_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn non_empty(value: &str, what: &str, input: &str) -> Result<String, BuildPlanError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BuildPlanError::Parse {
            message: format!("dependency \"{input}\" has an empty {what}"),
        });
    }
    Ok(value.to_string())
}

impl FromStr for PythonDependency {
    type Err = BuildPlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        if let Some(rest) = input
            .strip_prefix("-r ")
            .or_else(|| input.strip_prefix("--requirement "))
        {
            return Ok(Self::Requirements(non_empty(rest, "requirements path", s)?));
        }
        if let Some(rest) = input.strip_prefix("file://") {
            return Ok(Self::LocalPath(non_empty(rest, "local path", s)?));
        }
        if input.starts_with('/') || input.starts_with('.') {
            return Ok(Self::LocalPath(input.to_string()));
        }

        let pinned = input
            .split_once("==")
            .or_else(|| input.split_once('@'))
            .map(|(name, version)| (name.trim(), version.trim()));
        if let Some((name, version)) = pinned {
            if !is_distribution_name(name) {
                return Err(BuildPlanError::Parse {
                    message: format!("dependency \"{s}\" has an invalid package name \"{name}\""),
                });
            }
            return Ok(Self::Pinned {
                name: name.to_string(),
                version: non_empty(version, "version", s)?,
            });
        }

        Err(BuildPlanError::Parse {
            message: format!(
                "dependency \"{s}\" is not a requirements file (-r PATH), a local path, or a pinned package (NAME@VERSION)"
            ),
        })
    }
}

impl TryFrom<String> for PythonDependency {
    type Error = BuildPlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PythonDependency> for String {
    fn from(dep: PythonDependency) -> Self {
        dep.to_string()
    }
}

impl fmt::Display for PythonDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requirements(path) => write!(f, "-r {path}"),
            Self::LocalPath(path) => write!(f, "{path}"),
            Self::Pinned { name, version } => write!(f, "{name}@{version}"),
        }
    }
}

/// A named, complete set of parameters for building one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildVariant {
    /// Variant identifier, e.g. `fastmcp-pinned`.
    pub name: String,
    /// Base image reference, e.g. `python:3.12-slim`.
    pub base_image: String,
    /// Ordered source copies.
    #[serde(default)]
    pub source_mounts: Vec<SourceMount>,
    /// OS packages installed before any python dependency.
    #[serde(default)]
    pub system_packages: BTreeSet<String>,
    /// Ordered python dependency specifiers.
    #[serde(default)]
    pub python_dependencies: Vec<PythonDependency>,
    /// Absolute path assigned to `PYTHONPATH`.
    pub python_path: String,
    /// Working directory inside the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workdir: Option<String>,
    /// Port declared as exposed. Wider than `u16` so bad input reaches validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposed_port: Option<u32>,
    /// Container command tokens.
    #[serde(default)]
    pub entrypoint: Vec<String>,
}

impl BuildVariant {
    /// Directory relative container paths are resolved against.
    #[must_use]
    pub fn base_dir(&self) -> ContainerPath {
        ContainerPath::resolve("/", self.workdir.as_deref().unwrap_or("/"))
    }

    /// Normalized container roots of every source mount, in declaration order.
    #[must_use]
    pub fn mount_roots(&self) -> Vec<ContainerPath> {
        let base = self.base_dir();
        self.source_mounts
            .iter()
            .map(|m| ContainerPath::resolve(base.as_str(), &m.container_path))
            .collect()
    }
}
