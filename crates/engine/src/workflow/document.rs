//! Conversion between built workflows and definition documents.
//!
//! Documents are read as YAML, which also accepts JSON. Export writes every
//! step with its identifier and canonical type name, so a document exported
//! from a workflow loads back into an equal step sequence.

use chrono::Utc;
use promptchain_types::{WorkflowDefinition, WorkflowStepDefinition};

use crate::{error::ConfigurationError, model::Workflow};

/// Format version written to exported documents.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Parses a YAML or JSON definition document.
pub fn parse_definition(document: &str) -> Result<WorkflowDefinition, ConfigurationError> {
    serde_yaml::from_str(document).map_err(ConfigurationError::Parse)
}

impl Workflow {
    /// Exports the workflow as a definition document.
    pub fn export(&self) -> WorkflowDefinition {
        WorkflowDefinition {
            name: self.name().to_string(),
            description: Some(self.description().to_string()).filter(|description| !description.is_empty()),
            version: Some(DOCUMENT_VERSION.to_string()),
            created_at: Some(Utc::now().to_rfc3339()),
            steps: self
                .steps()
                .iter()
                .map(|step| WorkflowStepDefinition {
                    id: Some(step.id().to_string()),
                    r#type: step.kind().as_str().to_string(),
                    config: step.config().clone(),
                })
                .collect(),
        }
    }

    /// Exports the workflow as a YAML document.
    pub fn export_yaml(&self) -> Result<String, ConfigurationError> {
        serde_yaml::to_string(&self.export()).map_err(ConfigurationError::Serialize)
    }

    /// Exports the workflow as a pretty-printed JSON document.
    pub fn export_json(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }
}
