//! Chain builder: accumulates steps and materializes workflows.
//!
//! Steps are kept in insertion order. A step without an explicit identifier is
//! named `{type}_{index}` where `type` is the name it was added under and
//! `index` is its zero-based position in the chain, so default names cannot
//! collide with each other. Loading a definition document replays the same
//! accumulation over the document's steps in document order.

use std::{fs, path::Path};

use promptchain_types::{WorkflowDefinition, validate_definition};
use tracing::debug;
use uuid::Uuid;

use super::{document::parse_definition, registry::StepRegistry};
use crate::{
    error::ConfigurationError,
    model::{Step, StepConfig, Workflow},
    resolve::INPUTS_KEY,
};

/// Accumulates step specifications and builds [`Workflow`] values.
#[derive(Debug, Clone)]
pub struct ChainBuilder {
    registry: StepRegistry,
    steps: Vec<Step>,
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new(StepRegistry::default())
    }
}

impl ChainBuilder {
    /// Creates an empty builder resolving type names through `registry`.
    pub fn new(registry: StepRegistry) -> Self {
        Self {
            registry,
            steps: Vec::new(),
        }
    }

    /// Appends a step and returns its identifier.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::UnknownStepType`] when `step_type` is not registered
    /// - [`ConfigurationError::InvalidStepId`] when the identifier is `inputs` or contains `.`
    /// - [`ConfigurationError::DuplicateStepId`] when the identifier is already taken
    pub fn add_step(&mut self, step_type: &str, config: StepConfig, step_id: Option<&str>) -> Result<String, ConfigurationError> {
        let kind = self.registry.lookup(step_type).ok_or_else(|| ConfigurationError::UnknownStepType {
            step_type: step_type.to_string(),
        })?;

        let identifier = match step_id {
            Some(explicit) => explicit.to_string(),
            None => format!("{step_type}_{}", self.steps.len()),
        };
        check_identifier(&identifier)?;
        if self.steps.iter().any(|step| step.id() == identifier) {
            return Err(ConfigurationError::DuplicateStepId { id: identifier });
        }

        debug!(step_id = %identifier, step_type = %kind, "step added to chain");
        self.steps.push(Step::new(identifier.clone(), kind, config));
        Ok(identifier)
    }

    /// Steps accumulated so far.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Materializes a workflow with a freshly generated identifier.
    ///
    /// The builder keeps its steps, so building twice yields two workflows with
    /// equal step lists and distinct identifiers.
    pub fn build(&self, name: impl Into<String>, description: impl Into<String>) -> Workflow {
        Workflow::new(Uuid::new_v4().to_string(), name.into(), description.into(), self.steps.clone())
    }

    /// Builds a workflow from a definition document.
    ///
    /// Accumulation starts from an empty chain that shares this builder's
    /// registry; steps already added to `self` are not included.
    pub fn load_definition(&self, definition: &WorkflowDefinition) -> Result<Workflow, ConfigurationError> {
        validate_definition(definition).map_err(ConfigurationError::InvalidDocument)?;

        let mut chain = ChainBuilder::new(self.registry.clone());
        for step in &definition.steps {
            chain.add_step(&step.r#type, step.config.clone(), step.id.as_deref())?;
        }

        Ok(chain.build(definition.name.clone(), definition.description.clone().unwrap_or_default()))
    }

    /// Parses a YAML or JSON document and builds a workflow from it.
    pub fn load_str(&self, document: &str) -> Result<Workflow, ConfigurationError> {
        let definition = parse_definition(document)?;
        self.load_definition(&definition)
    }

    /// Reads a YAML or JSON document from disk and builds a workflow from it.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Workflow, ConfigurationError> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&document)
    }
}

/// Step outputs live beside `inputs` in the context and are addressed by
/// dotted paths, so an identifier may neither shadow `inputs` nor contain `.`.
fn check_identifier(identifier: &str) -> Result<(), ConfigurationError> {
    let reason = if identifier == INPUTS_KEY {
        "reserved for run inputs"
    } else if identifier.contains('.') {
        "must not contain '.'"
    } else {
        return Ok(());
    };
    Err(ConfigurationError::InvalidStepId {
        id: identifier.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StepKind;
    use serde_json::json;

    fn config(value: serde_json::Value) -> StepConfig {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn default_identifiers_use_type_and_index() {
        let mut builder = ChainBuilder::default();
        let first = builder.add_step("harvest_web", config(json!({"url": "https://a"})), None).unwrap();
        let second = builder.add_step("harvest_web", config(json!({"url": "https://b"})), None).unwrap();
        assert_eq!(first, "harvest_web_0");
        assert_eq!(second, "harvest_web_1");
    }

    #[test]
    fn explicit_identifiers_are_kept() {
        let mut builder = ChainBuilder::default();
        builder.add_step("harvest_web", StepConfig::new(), None).unwrap();
        let id = builder.add_step("security_scan", StepConfig::new(), Some("gate")).unwrap();
        assert_eq!(id, "gate");
        assert_eq!(builder.steps()[1].kind(), StepKind::SecurityScan);
    }

    #[test]
    fn aliases_name_default_identifiers() {
        let mut builder = ChainBuilder::default();
        builder.add_step("harvest_web", StepConfig::new(), None).unwrap();
        let id = builder.add_step("iterate", StepConfig::new(), None).unwrap();
        assert_eq!(id, "iterate_1");
        assert_eq!(builder.steps()[1].kind(), StepKind::Iterate);
    }

    #[test]
    fn unknown_type_is_a_configuration_error() {
        let mut builder = ChainBuilder::default();
        let error = builder.add_step("shell_exec", StepConfig::new(), None).expect_err("unknown type");
        assert!(matches!(error, ConfigurationError::UnknownStepType { ref step_type } if step_type == "shell_exec"));
        assert!(builder.is_empty());
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let mut builder = ChainBuilder::default();
        builder.add_step("conditional", StepConfig::new(), Some("conditional_1")).unwrap();
        let error = builder.add_step("conditional", StepConfig::new(), None).expect_err("collision");
        assert!(matches!(error, ConfigurationError::DuplicateStepId { ref id } if id == "conditional_1"));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn inputs_identifier_is_reserved() {
        let mut builder = ChainBuilder::default();
        let error = builder
            .add_step("harvest_web", config(json!({"url": "https://x"})), Some("inputs"))
            .expect_err("reserved id");
        assert!(matches!(error, ConfigurationError::InvalidStepId { ref id, .. } if id == "inputs"));
        assert!(builder.is_empty());
    }

    #[test]
    fn dotted_identifier_is_rejected() {
        let mut builder = ChainBuilder::default();
        let error = builder.add_step("harvest_web", StepConfig::new(), Some("fetch.page")).expect_err("dotted id");
        assert!(matches!(error, ConfigurationError::InvalidStepId { ref id, .. } if id == "fetch.page"));
        assert!(builder.is_empty());
    }

    #[test]
    fn load_definition_rejects_reserved_identifier() {
        let document = "name: shadow\nsteps:\n  - id: inputs\n    type: harvest_web\n    config:\n      url: https://x\n";
        let error = ChainBuilder::default().load_str(document).expect_err("reserved id");
        assert!(matches!(error, ConfigurationError::InvalidStepId { ref id, .. } if id == "inputs"));
    }

    #[test]
    fn build_generates_distinct_identifiers() {
        let mut builder = ChainBuilder::default();
        builder.add_step("harvest_web", StepConfig::new(), None).unwrap();
        let first = builder.build("pipeline", "");
        let second = builder.build("pipeline", "");
        assert_ne!(first.id(), second.id());
        assert_eq!(first.steps(), second.steps());
        assert_eq!(first.name(), "pipeline");
    }

    #[test]
    fn load_definition_rejects_unknown_types() {
        let document = "name: bad\nsteps:\n  - type: teleport\n    config: {}\n";
        let error = ChainBuilder::default().load_str(document).expect_err("unknown type");
        assert!(matches!(error, ConfigurationError::UnknownStepType { .. }));
    }

    #[test]
    fn load_definition_rejects_blank_name() {
        let document = "name: ''\nsteps: []\n";
        let error = ChainBuilder::default().load_str(document).expect_err("blank name");
        assert!(matches!(error, ConfigurationError::InvalidDocument(_)));
    }

    #[test]
    fn load_definition_ignores_existing_chain() {
        let mut builder = ChainBuilder::default();
        builder.add_step("harvest_web", StepConfig::new(), None).unwrap();
        let workflow = builder
            .load_str("name: fresh\nsteps:\n  - type: quality_score\n    config:\n      input: x\n")
            .unwrap();
        assert_eq!(workflow.steps().len(), 1);
        assert_eq!(workflow.steps()[0].id(), "quality_score_0");
    }

    #[test]
    fn load_file_reports_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let error = ChainBuilder::default()
            .load_file(temp_dir.path().join("missing.yaml"))
            .expect_err("missing file");
        assert!(matches!(error, ConfigurationError::Io { .. }));
    }
}
