//! # buildplan-render
//!
//! Turns a resolved `BuildPlan` into text a build executor understands.
//! Rendering never re-validates: plans reaching this crate already passed
//! the resolver.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod dockerfile;
pub mod json;

use buildplan_common::config::OutputFormat;
use buildplan_common::error::Result;
use buildplan_resolver::BuildPlan;

pub use dockerfile::DockerfileRenderer;
pub use json::JsonRenderer;

/// A target build syntax.
pub trait PlanRenderer {
    /// Renders the plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be encoded in this syntax.
    fn render(&self, plan: &BuildPlan) -> Result<String>;
}

/// Returns the renderer for an output format.
#[must_use]
pub fn renderer_for(format: OutputFormat) -> Box<dyn PlanRenderer> {
    match format {
        OutputFormat::Dockerfile => Box::new(DockerfileRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
