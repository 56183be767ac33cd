//! Unified error types for the buildplan workspace.
//!
//! [`ConfigError`] is the resolver's validation taxonomy. Every variant is a
//! deterministic, non-retryable configuration error detected before any
//! build step runs. [`BuildPlanError`] wraps it together with the I/O and
//! parsing failures of the surrounding tooling.

use std::path::PathBuf;

use thiserror::Error;

/// A violated build variant invariant.
///
/// Each variant names the offending field and carries the value that
/// failed, so the configuration author can fix the input and re-resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The variant declares no source copy operations.
    #[error("variant \"{variant}\": sourceMounts is empty, nothing would be copied into the image")]
    NoSourceMount {
        /// Name of the offending variant.
        variant: String,
    },

    /// A local-path dependency lies outside every declared mount.
    #[error(
        "variant \"{variant}\": pythonDependencies entry \"{dependency}\" installs from {target}, which is not under any sourceMounts containerPath"
    )]
    DanglingDependencyPath {
        /// Name of the offending variant.
        variant: String,
        /// The dependency specifier as written.
        dependency: String,
        /// The normalized install target inside the image.
        target: String,
    },

    /// `pythonPath` is not absolute or does not cover a local install target.
    #[error("variant \"{variant}\": pythonPath \"{python_path}\" {reason}")]
    PythonPathMismatch {
        /// Name of the offending variant.
        variant: String,
        /// The declared python path.
        python_path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// The entrypoint is empty or does not start with a runnable executable.
    #[error("variant \"{variant}\": invalid entrypoint: {reason}")]
    InvalidEntrypoint {
        /// Name of the offending variant.
        variant: String,
        /// Why the entrypoint was rejected.
        reason: String,
    },

    /// The exposed port is outside `1..=65535`.
    #[error("variant \"{variant}\": exposedPort {port} is outside 1..=65535")]
    PortOutOfRange {
        /// Name of the offending variant.
        variant: String,
        /// The rejected port value.
        port: u32,
    },

    /// The base image reference is empty or malformed.
    #[error("variant \"{variant}\": invalid baseImage \"{image}\"")]
    InvalidBaseImage {
        /// Name of the offending variant.
        variant: String,
        /// The rejected image reference.
        image: String,
    },

    /// A field holds characters that cannot appear in a rendered build file.
    #[error("variant \"{variant}\": {field} value {value:?} contains {reason}")]
    UnsafeValue {
        /// Name of the offending variant.
        variant: String,
        /// Field holding the value.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Which kind of character was found.
        reason: &'static str,
    },
}

impl ConfigError {
    /// Returns the name of the field whose invariant was violated.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NoSourceMount { .. } => "sourceMounts",
            Self::DanglingDependencyPath { .. } => "pythonDependencies",
            Self::PythonPathMismatch { .. } => "pythonPath",
            Self::InvalidEntrypoint { .. } => "entrypoint",
            Self::PortOutOfRange { .. } => "exposedPort",
            Self::InvalidBaseImage { .. } => "baseImage",
            Self::UnsafeValue { field, .. } => *field,
        }
    }
}

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum BuildPlanError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Input text could not be interpreted.
    #[error("parse error: {message}")]
    Parse {
        /// Description of what failed to parse.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// A variant failed validation.
    #[error(transparent)]
    Resolve(#[from] ConfigError),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// YAML deserialization failed.
    #[error("YAML error: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BuildPlanError>;
