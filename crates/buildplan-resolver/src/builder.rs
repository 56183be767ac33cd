//! Fluent API for assembling build variants in code.

use std::collections::BTreeSet;

use buildplan_common::error::Result;

use crate::variant::{BuildVariant, PythonDependency, SourceMount};

/// Builder for a [`BuildVariant`].
///
/// The builder only assembles data. Invariants are checked later by
/// [`crate::resolve`], so a builder can describe a broken variant on purpose.
#[derive(Debug)]
pub struct VariantBuilder {
    name: String,
    base_image: String,
    source_mounts: Vec<SourceMount>,
    system_packages: BTreeSet<String>,
    python_dependencies: Vec<PythonDependency>,
    python_path: String,
    workdir: Option<String>,
    exposed_port: Option<u32>,
    entrypoint: Vec<String>,
}

impl VariantBuilder {
    /// Creates a builder for the given variant name with the default base image.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_image: buildplan_common::constants::DEFAULT_BASE_IMAGE.to_string(),
            source_mounts: Vec::new(),
            system_packages: BTreeSet::new(),
            python_dependencies: Vec::new(),
            python_path: String::new(),
            workdir: None,
            exposed_port: None,
            entrypoint: Vec::new(),
        }
    }

    /// Sets the base image reference.
    #[must_use]
    pub fn base_image(mut self, image: impl Into<String>) -> Self {
        self.base_image = image.into();
        self
    }

    /// Adds a source copy from the build context into the image.
    #[must_use]
    pub fn mount(mut self, host: impl Into<String>, container: impl Into<String>) -> Self {
        self.source_mounts.push(SourceMount::new(host, container));
        self
    }

    /// Adds an OS package.
    #[must_use]
    pub fn system_package(mut self, package: impl Into<String>) -> Self {
        let _ = self.system_packages.insert(package.into());
        self
    }

    /// Adds an already-parsed python dependency.
    #[must_use]
    pub fn dependency(mut self, dep: PythonDependency) -> Self {
        self.python_dependencies.push(dep);
        self
    }

    /// Parses and adds a python dependency specifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the specifier is not a requirements file, a local
    /// path, or a pinned package.
    pub fn dependency_spec(self, spec: &str) -> Result<Self> {
        Ok(self.dependency(spec.parse()?))
    }

    /// Sets the path assigned to `PYTHONPATH`.
    #[must_use]
    pub fn python_path(mut self, path: impl Into<String>) -> Self {
        self.python_path = path.into();
        self
    }

    /// Sets the working directory inside the image.
    #[must_use]
    pub fn workdir(mut self, path: impl Into<String>) -> Self {
        self.workdir = Some(path.into());
        self
    }

    /// Sets the exposed port.
    #[must_use]
    pub const fn port(mut self, port: u32) -> Self {
        self.exposed_port = Some(port);
        self
    }

    /// Sets the entrypoint tokens.
    #[must_use]
    pub fn entrypoint<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entrypoint = argv.into_iter().map(Into::into).collect();
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> BuildVariant {
        BuildVariant {
            name: self.name,
            base_image: self.base_image,
            source_mounts: self.source_mounts,
            system_packages: self.system_packages,
            python_dependencies: self.python_dependencies,
            python_path: self.python_path,
            workdir: self.workdir,
            exposed_port: self.exposed_port,
            entrypoint: self.entrypoint,
        }
    }
}
