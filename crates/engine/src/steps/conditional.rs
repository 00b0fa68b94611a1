//! Conditional step. Reports the outcome and the selected branch label; it
//! does not skip or reorder later steps.

use promptchain_types::StepOutput;
use serde_json::Value;
use tracing::debug;

use crate::{model::StepConfig, resolve::ExecutionContext, workflow::condition_syntax::evaluate_condition};

/// Evaluates `condition` and reports `{condition_met, branch}`.
///
/// A missing or malformed condition is simply false.
pub(super) fn execute(config: &StepConfig, context: &ExecutionContext) -> StepOutput {
    let condition_met = config
        .get("condition")
        .and_then(Value::as_str)
        .map(|condition| evaluate_condition(condition, context))
        .unwrap_or(false);

    let label_key = if condition_met { "if_true" } else { "if_false" };
    let branch = config.get(label_key).cloned().unwrap_or(Value::Null);
    debug!(condition_met, branch = %branch, "condition evaluated");

    let mut output = StepOutput::new();
    output.insert("condition_met".into(), Value::Bool(condition_met));
    output.insert("branch".into(), branch);
    output
}
