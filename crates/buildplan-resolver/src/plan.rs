//! Build plans: the ordered, syntax-agnostic output of resolution.

use buildplan_common::error::Result;
use buildplan_common::types::Sha256Hash;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::variant::PythonDependency;

/// One step of a build plan.
///
/// Steps carry everything a renderer needs; no step refers back to the
/// variant it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildStep {
    /// Select the base image.
    BaseImage {
        /// Image reference.
        image: String,
    },
    /// Install OS packages.
    InstallSystemPackages {
        /// Package names, sorted.
        packages: Vec<String>,
    },
    /// Set the working directory.
    Workdir {
        /// Directory inside the image.
        path: String,
    },
    /// Copy a path from the build context.
    Copy {
        /// Source, relative to the build context.
        host: String,
        /// Destination inside the image.
        container: String,
    },
    /// Install one python dependency.
    InstallDependency {
        /// The dependency to install.
        dependency: PythonDependency,
    },
    /// Assign an environment variable.
    SetEnv {
        /// Variable name.
        key: String,
        /// Variable value.
        value: String,
    },
    /// Declare an exposed port.
    Expose {
        /// Port number, already range-checked.
        port: u16,
    },
    /// Declare the container command.
    Entrypoint {
        /// Command tokens.
        argv: Vec<String>,
    },
}

/// A validated, ordered sequence of build steps for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Name of the variant this plan was resolved from.
    pub variant: String,
    /// Steps in execution order.
    pub steps: Vec<BuildStep>,
}

impl BuildPlan {
    /// Returns the value assigned to `key` by a `SetEnv` step, if any.
    #[must_use]
    pub fn env(&self, key: &str) -> Option<&str> {
        self.steps.iter().find_map(|step| match step {
            BuildStep::SetEnv { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Returns every exposed port, in step order.
    #[must_use]
    pub fn exposed_ports(&self) -> Vec<u16> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                BuildStep::Expose { port } => Some(*port),
                _ => None,
            })
            .collect()
    }

    /// Returns the entrypoint tokens, if declared.
    #[must_use]
    pub fn entrypoint(&self) -> Option<&[String]> {
        self.steps.iter().find_map(|step| match step {
            BuildStep::Entrypoint { argv } => Some(argv.as_slice()),
            _ => None,
        })
    }

    /// Computes the SHA-256 digest of the plan's JSON form.
    ///
    /// Structurally identical plans always share a digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be serialized.
    pub fn digest(&self) -> Result<Sha256Hash> {
        let bytes = serde_json::to_vec(self)?;
        let hex = format!("{:x}", Sha256::digest(&bytes));
        tracing::debug!(variant = %self.variant, digest = %hex, "computed plan digest");
        Sha256Hash::from_hex(hex)
    }
}
