//! Content retrieval step.

use promptchain_types::StepOutput;
use serde_json::Value;
use tracing::debug;

use super::required_text;
use crate::{collaborator::RunEnvironment, error::StepError, model::StepConfig, resolve::ExecutionContext};

/// Fetches `url` and reports `{success, content, metadata}`.
///
/// A harvester that answers with `success = false` is a normal outcome; only
/// an error returned by the harvester fails the step.
pub(super) fn execute(config: &StepConfig, context: &ExecutionContext, environment: &RunEnvironment) -> Result<StepOutput, StepError> {
    let url = required_text(config, "url", context)?;
    debug!(url = %url, "harvesting content");

    let harvested = environment.collaborators.harvester.extract(&url)?;

    let mut output = StepOutput::new();
    output.insert("success".into(), Value::Bool(harvested.success));
    output.insert("content".into(), Value::String(harvested.content));
    output.insert("metadata".into(), Value::Object(harvested.metadata));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::test_support::environment;
    use serde_json::json;

    #[test]
    fn resolves_url_from_inputs() {
        let context = ExecutionContext::with_inputs(json!({"url": "https://example.com"}).as_object().cloned().unwrap());
        let config = json!({"url": "{{inputs.url}}"}).as_object().cloned().unwrap();

        let output = execute(&config, &context, &environment()).expect("harvest succeeds");
        assert_eq!(output["success"], true);
        assert_eq!(output["content"], "content of https://example.com");
        assert_eq!(output["metadata"]["url"], "https://example.com");
    }

    #[test]
    fn harvester_error_fails_the_step() {
        let context = ExecutionContext::default();
        let config = json!({"url": "fail://nowhere"}).as_object().cloned().unwrap();

        let error = execute(&config, &context, &environment()).expect_err("harvest fails");
        assert!(matches!(error, StepError::Collaborator(_)));
        assert!(error.to_string().contains("could not reach"));
    }

    #[test]
    fn missing_url_fails_the_step() {
        let error = execute(&StepConfig::new(), &ExecutionContext::default(), &environment()).expect_err("no url");
        assert!(matches!(error, StepError::MissingConfig { key: "url" }));
    }
}
