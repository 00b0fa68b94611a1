//! Iterative refinement step.

use promptchain_types::StepOutput;
use serde_json::Value;
use tracing::debug;

use super::{count_setting, optional_text, required_text};
use crate::{
    collaborator::{RefinementRequest, RunEnvironment},
    error::StepError,
    model::StepConfig,
    resolve::ExecutionContext,
};

/// Refines `input` on `topic` for at most `max_iters` cycles and reports
/// `{final_response, quality, iterations}`.
///
/// The resolved input is both the question and the initial prompt.
pub(super) fn execute(config: &StepConfig, context: &ExecutionContext, environment: &RunEnvironment) -> Result<StepOutput, StepError> {
    let input = required_text(config, "input", context)?;
    let topic = optional_text(config, "topic", context).unwrap_or_else(|| environment.config.default_topic.clone());
    let max_iterations = count_setting(config, "max_iters", context)?.unwrap_or(environment.config.default_max_iters);
    debug!(topic = %topic, max_iterations, "refining text");

    let refinement = environment.collaborators.refiner.iterate(RefinementRequest {
        topic: &topic,
        question: &input,
        initial_prompt: &input,
        max_iterations,
    })?;

    let mut output = StepOutput::new();
    output.insert("final_response".into(), Value::String(refinement.final_response));
    output.insert("quality".into(), Value::from(refinement.final_quality));
    output.insert("iterations".into(), Value::from(refinement.total_iterations));
    Ok(output)
}
