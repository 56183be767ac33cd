//! JSON rendering for external executors.

use buildplan_common::error::Result;
use buildplan_resolver::BuildPlan;

use crate::PlanRenderer;

/// Renders plans as pretty-printed JSON with a trailing newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl PlanRenderer for JsonRenderer {
    fn render(&self, plan: &BuildPlan) -> Result<String> {
        tracing::debug!(variant = %plan.variant, "rendering JSON");
        let mut out = serde_json::to_string_pretty(plan)?;
        out.push('\n');
        Ok(out)
    }
}
