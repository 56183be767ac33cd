//! Domain primitive types used across the buildplan workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An absolute, lexically normalized POSIX path inside a container image.
///
/// Container paths are always `/`-separated regardless of the host OS, so
/// they are handled as strings rather than `std::path::Path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerPath(String);

impl ContainerPath {
    /// Resolves `raw` against `base` and normalizes the result.
    ///
    /// Absolute inputs ignore `base`. `.` segments and empty segments are
    /// dropped; `..` pops one segment and never climbs above `/`.
    #[must_use]
    pub fn resolve(base: &str, raw: &str) -> Self {
        let joined = if raw.starts_with('/') {
            raw.to_string()
        } else {
            format!("{base}/{raw}")
        };

        let mut segments: Vec<&str> = Vec::new();
        for segment in joined.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    let _ = segments.pop();
                }
                other => segments.push(other),
            }
        }
        Self(format!("/{}", segments.join("/")))
    }

    /// Returns `true` if `self` equals `ancestor` or lies beneath it.
    ///
    /// Comparison is per path segment: `/srcx` is not under `/src`.
    #[must_use]
    pub fn is_under(&self, ancestor: &Self) -> bool {
        if ancestor.0 == "/" {
            return true;
        }
        self.0 == ancestor.0
            || self
                .0
                .strip_prefix(&ancestor.0)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SHA-256 hash digest used to fingerprint build plans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sha256Hash(String);

impl Sha256Hash {
    /// Creates a hash from a hex-encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid 64-character hex string.
    pub fn from_hex(hex: impl Into<String>) -> crate::error::Result<Self> {
        let hex = hex.into();
        if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(crate::error::BuildPlanError::Parse {
                message: format!("invalid SHA-256 hex string: {hex}"),
            });
        }
        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// Returns the hex-encoded hash string.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Returns the first 12 hex characters, for display.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_absolute_ignores_base() {
        let path = ContainerPath::resolve("/app", "/src/mcp_jira");
        assert_eq!(path.as_str(), "/src/mcp_jira");
    }

    #[test]
    fn resolve_relative_joins_base() {
        let path = ContainerPath::resolve("/app", "./src/mcp_common");
        assert_eq!(path.as_str(), "/app/src/mcp_common");
    }

    #[test]
    fn resolve_collapses_dot_segments() {
        let path = ContainerPath::resolve("/", "/app//src/../lib/./x/");
        assert_eq!(path.as_str(), "/app/lib/x");
    }

    #[test]
    fn resolve_parent_never_climbs_above_root() {
        let path = ContainerPath::resolve("/", "/../../etc");
        assert_eq!(path.as_str(), "/etc");
    }

    #[test]
    fn resolve_dot_is_base() {
        assert_eq!(ContainerPath::resolve("/app", ".").as_str(), "/app");
        assert_eq!(ContainerPath::resolve("/", ".").as_str(), "/");
    }

    #[test]
    fn is_under_matches_whole_segments() {
        let src = ContainerPath::resolve("/", "/src");
        assert!(ContainerPath::resolve("/", "/src").is_under(&src));
        assert!(ContainerPath::resolve("/", "/src/mcp_jira").is_under(&src));
        assert!(!ContainerPath::resolve("/", "/srcx/mcp_jira").is_under(&src));
        assert!(!ContainerPath::resolve("/", "/app/src").is_under(&src));
    }

    #[test]
    fn everything_is_under_root() {
        let root = ContainerPath::resolve("/", "/");
        assert!(ContainerPath::resolve("/", "/anything").is_under(&root));
    }

    #[test]
    fn sha256_from_valid_hex() {
        let hex = "A".repeat(64);
        let hash = Sha256Hash::from_hex(hex).expect("valid hash");
        assert_eq!(hash.as_hex(), "a".repeat(64));
        assert_eq!(hash.short(), "aaaaaaaaaaaa");
        assert!(hash.to_string().starts_with("sha256:"));
    }

    #[test]
    fn sha256_rejects_wrong_length() {
        assert!(Sha256Hash::from_hex("abc").is_err());
    }

    #[test]
    fn sha256_rejects_non_hex() {
        assert!(Sha256Hash::from_hex("z".repeat(64)).is_err());
    }
}
