//! Error taxonomy for building and running workflows.
//!
//! Configuration problems surface from the chain builder and never during a
//! run. Step errors are produced inside `execute` and are always absorbed by the
//! run loop into an `error` log entry; they never escape `Workflow::run`.

use std::path::PathBuf;

use thiserror::Error;

/// Raised while building or loading a workflow.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The step type name is not present in the builder's registry.
    #[error("unknown step type: {step_type}")]
    UnknownStepType { step_type: String },

    /// Two steps in one chain share an identifier.
    #[error("duplicate step identifier: {id}")]
    DuplicateStepId { id: String },

    /// The identifier can never be addressed by a `{{step_id.field}}` reference.
    #[error("invalid step identifier '{id}': {reason}")]
    InvalidStepId { id: String, reason: &'static str },

    /// The definition document is structurally invalid.
    #[error("invalid workflow document: {0}")]
    InvalidDocument(String),

    /// The definition document could not be parsed.
    #[error("failed to parse workflow document: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// The workflow could not be rendered as YAML.
    #[error("failed to serialize workflow document: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// The workflow could not be rendered as JSON.
    #[error("failed to serialize workflow document as JSON: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// The definition file could not be read.
    #[error("failed to read workflow file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Raised by a step while executing.
#[derive(Debug, Error)]
pub enum StepError {
    /// A config key the step requires is absent.
    #[error("missing required config '{key}'")]
    MissingConfig { key: &'static str },

    /// A config value could not be interpreted after resolution.
    #[error("invalid config '{key}': {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    /// The external collaborator failed.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
