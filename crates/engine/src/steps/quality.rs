//! Quality scoring step.

use promptchain_types::StepOutput;
use serde_json::{Map as JsonMap, Value};

use super::{number_setting, required_text};
use crate::{collaborator::RunEnvironment, error::StepError, model::StepConfig, resolve::ExecutionContext};

/// Scores `input` and reports `{total_score, breakdown, passed}` where
/// `passed` is `total_score >= min_score`.
pub(super) fn execute(config: &StepConfig, context: &ExecutionContext, environment: &RunEnvironment) -> Result<StepOutput, StepError> {
    let input = required_text(config, "input", context)?;
    let min_score = number_setting(config, "min_score", context)?.unwrap_or(environment.config.default_min_score);

    let assessment = environment.collaborators.scorer.score(&input)?;

    let breakdown: JsonMap<String, Value> = assessment
        .breakdown
        .into_iter()
        .map(|(dimension, score)| (dimension, Value::from(score)))
        .collect();

    let mut output = StepOutput::new();
    output.insert("total_score".into(), Value::from(assessment.total));
    output.insert("breakdown".into(), Value::Object(breakdown));
    output.insert("passed".into(), Value::Bool(assessment.total >= min_score));
    Ok(output)
}
