//! # buildplan-resolver
//!
//! Turns named build variants into validated build plans.
//!
//! Handles:
//! - **Variant**: the `BuildVariant` data model and dependency specifiers.
//! - **Builder**: fluent construction of variants in code.
//! - **Resolver**: fail-fast invariant checks and plan assembly.
//! - **Plan**: ordered, syntax-agnostic build steps with a content digest.
//! - **Catalog**: built-in variants plus file overrides, selected by name.
//! - **Loader**: YAML/JSON variant files.
//! - **Context**: host-side existence checks against a build context.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod builder;
pub mod catalog;
pub mod context;
pub mod loader;
pub mod plan;
pub mod resolver;
pub mod variant;

pub use builder::VariantBuilder;
pub use catalog::Catalog;
pub use plan::{BuildPlan, BuildStep};
pub use resolver::resolve;
pub use variant::{BuildVariant, PythonDependency, SourceMount};
