//! Named variant catalog.
//!
//! Variants are selected by name. The catalog starts from the built-in
//! variants for the MCP services and can be extended or overridden by
//! variants loaded from a file.

use std::collections::BTreeMap;

use buildplan_common::constants::{
    DEFAULT_BASE_IMAGE, FASTMCP_PINNED_VERSION, JIRA_ALT_PORT, JIRA_SSE_PORT, SALESFORCE_SSE_PORT,
};
use buildplan_common::error::{BuildPlanError, Result};

use crate::builder::VariantBuilder;
use crate::variant::{BuildVariant, PythonDependency};

/// A set of build variants keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    variants: BTreeMap<String, BuildVariant>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the built-in variants.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.merge(builtin_variants());
        catalog
    }

    /// Inserts a variant, returning the one it replaced.
    pub fn insert(&mut self, variant: BuildVariant) -> Option<BuildVariant> {
        self.variants.insert(variant.name.clone(), variant)
    }

    /// Inserts every variant; later entries replace earlier ones by name.
    pub fn merge(&mut self, variants: impl IntoIterator<Item = BuildVariant>) {
        for variant in variants {
            if let Some(old) = self.insert(variant) {
                tracing::debug!(variant = %old.name, "variant overridden");
            }
        }
    }

    /// Looks up a variant by name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` listing the available names.
    pub fn get(&self, name: &str) -> Result<&BuildVariant> {
        self.variants
            .get(name)
            .ok_or_else(|| BuildPlanError::NotFound {
                kind: "variant",
                id: format!("{name} (available: {})", self.names().join(", ")),
            })
    }

    /// Returns the variant names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.variants.keys().map(String::as_str).collect()
    }

    /// Iterates over variants in name order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildVariant> {
        self.variants.values()
    }

    /// Returns the number of variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Returns `true` if the catalog holds no variants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

fn python_module(module: &str) -> [String; 3] {
    ["python".into(), "-m".into(), format!("{module}.main")]
}

/// Returns the built-in variants.
///
/// Each one reproduces one of the service's historical packaging layouts,
/// with paths arranged so that it resolves cleanly.
#[must_use]
pub fn builtin_variants() -> Vec<BuildVariant> {
    vec![
        // Whole project copied and installed as one package.
        VariantBuilder::new("package-install")
            .base_image(DEFAULT_BASE_IMAGE)
            .workdir("/app")
            .mount(".", "/app")
            .dependency(PythonDependency::LocalPath(".".into()))
            .python_path("/app")
            .port(JIRA_SSE_PORT)
            .entrypoint(python_module("mcp_jira"))
            .build(),
        VariantBuilder::new("src-copy-requirements")
            .workdir("/app")
            .mount("requirements.txt", "/app/requirements.txt")
            .mount("src", "/app/src")
            .dependency(PythonDependency::Requirements(
                "/app/requirements.txt".into(),
            ))
            .python_path("/app/src")
            .port(JIRA_SSE_PORT)
            .entrypoint(python_module("mcp_jira"))
            .build(),
        VariantBuilder::new("fastmcp-pinned")
            .workdir("/src")
            .mount("src", "/src")
            .dependency(PythonDependency::Pinned {
                name: "fastmcp".into(),
                version: FASTMCP_PINNED_VERSION.into(),
            })
            .dependency(PythonDependency::LocalPath("/src/mcp_jira".into()))
            .python_path("/src")
            .port(JIRA_ALT_PORT)
            .entrypoint(python_module("mcp_jira"))
            .build(),
        VariantBuilder::new("split-packages")
            .workdir("/app")
            .system_package("build-essential")
            .mount("src/mcp_common", "/app/src/mcp_common")
            .mount("src/mcp_jira", "/app/src/mcp_jira")
            .dependency(PythonDependency::LocalPath("/app/src/mcp_common".into()))
            .dependency(PythonDependency::LocalPath("/app/src/mcp_jira".into()))
            .python_path("/app/src")
            .port(JIRA_ALT_PORT)
            .entrypoint(python_module("mcp_jira"))
            .build(),
        VariantBuilder::new("salesforce")
            .workdir("/app")
            .mount("src/mcp_common", "/app/src/mcp_common")
            .mount("src/mcp_salesforce", "/app/src/mcp_salesforce")
            .dependency(PythonDependency::LocalPath("/app/src/mcp_common".into()))
            .dependency(PythonDependency::LocalPath(
                "/app/src/mcp_salesforce".into(),
            ))
            .python_path("/app/src")
            .port(SALESFORCE_SSE_PORT)
            .entrypoint(python_module("mcp_salesforce"))
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;

    #[test]
    fn builtins_are_named_and_sorted() {
        let catalog = Catalog::with_builtins();
        assert_eq!(
            catalog.names(),
            vec![
                "fastmcp-pinned",
                "package-install",
                "salesforce",
                "split-packages",
                "src-copy-requirements",
            ]
        );
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn every_builtin_resolves() {
        for variant in Catalog::with_builtins().iter() {
            let plan = resolve(variant)
                .unwrap_or_else(|e| panic!("builtin {} failed: {e}", variant.name));
            assert_eq!(plan.env("PYTHONPATH"), Some(variant.python_path.as_str()));
        }
    }

    #[test]
    fn builtin_ports_follow_service_conventions() {
        let catalog = Catalog::with_builtins();
        let port = |name: &str| catalog.get(name).expect(name).exposed_port;
        assert_eq!(port("package-install"), Some(8100));
        assert_eq!(port("fastmcp-pinned"), Some(8001));
        assert_eq!(port("salesforce"), Some(8200));
    }

    #[test]
    fn unknown_variant_lists_available_names() {
        let catalog = Catalog::with_builtins();
        let err = catalog.get("ghost").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ghost"), "got: {msg}");
        assert!(msg.contains("split-packages"), "got: {msg}");
    }

    #[test]
    fn merge_overrides_by_name() {
        let mut catalog = Catalog::with_builtins();
        let custom = VariantBuilder::new("fastmcp-pinned")
            .mount("src", "/src")
            .python_path("/src")
            .port(9000)
            .entrypoint(["python"])
            .build();
        catalog.merge([custom]);
        assert_eq!(catalog.len(), 5);
        assert_eq!(
            catalog.get("fastmcp-pinned").expect("present").exposed_port,
            Some(9000)
        );
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.get("anything").is_err());
    }
}
