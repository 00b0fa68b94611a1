//! # Promptchain Engine
//!
//! The Promptchain Engine builds, serializes, and executes linear prompt
//! pipelines. A workflow is an ordered list of typed steps; each step reads
//! its configuration, substitutes `{{path}}` references against the outputs of
//! earlier steps, calls an external collaborator, and publishes its own output
//! for the steps after it.
//!
//! ## Key Features
//!
//! - **Chain Building**: Assemble workflows step by step through [`ChainBuilder`]
//! - **Variable Resolution**: Dotted `{{step_id.field}}` references into the run's context
//! - **Halting Policy**: Runs stop on the first failing step or on an unsafe security scan
//! - **Definition Documents**: Export to and load from YAML or JSON
//!
//! ## Usage
//!
//! ```rust
//! use promptchain_engine::{ChainBuilder, ExecutionContext, resolve};
//! use serde_json::json;
//!
//! let mut builder = ChainBuilder::default();
//! let harvest = builder.add_step("harvest_web", json!({"url": "{{inputs.url}}"}).as_object().cloned().unwrap_or_default(), None)?;
//! builder.add_step("security_scan", json!({"input": format!("{{{{{harvest}.content}}}}")}).as_object().cloned().unwrap_or_default(), None)?;
//!
//! let workflow = builder.build("research", "Harvest then scan");
//! assert_eq!(workflow.steps().len(), 2);
//! assert!(workflow.unresolved_references().is_empty());
//!
//! let context = ExecutionContext::with_inputs(json!({"url": "https://example.com"}).as_object().cloned().unwrap_or_default());
//! assert_eq!(resolve("Fetch {{inputs.url}}", &context), "Fetch https://example.com");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **`model`**: Steps, step kinds, and built workflows
//! - **`resolve`**: Execution context and reference substitution
//! - **`workflow`**: Registry, builder, documents, and condition grammar
//! - **`executor`**: The run loop, execution log, and cancellation
//! - **`collaborator`**: Traits for the services steps delegate to

use std::path::Path;

pub mod collaborator;
pub mod config;
pub mod error;
pub mod executor;
pub mod model;
pub mod resolve;
mod steps;
pub mod templates;
pub mod workflow;

// Re-export commonly used types for convenience
pub use collaborator::{
    Collaborators, ContentHarvester, HarvestedContent, IterativeRefiner, QualityAssessment, QualityScorer, Refinement, RefinementRequest,
    RunEnvironment, SecurityIssue, SecurityReport, SecurityScanner,
};
pub use config::EngineConfig;
pub use error::{ConfigurationError, StepError};
pub use executor::{CancellationToken, ExecutionLog};
pub use model::{Step, StepConfig, StepKind, Workflow};
pub use promptchain_types::{LogEntry, LogEntryStatus, RunReport, RunStatus, StepOutcome, StepOutput, WorkflowDefinition, WorkflowStepDefinition};
pub use resolve::{ExecutionContext, interpolate_value, resolve};
pub use templates::extract_variables;
pub use workflow::builder::ChainBuilder;
pub use workflow::condition_syntax::evaluate_condition;
pub use workflow::references::UnresolvedReference;
pub use workflow::registry::StepRegistry;

/// Loads a workflow definition file using the default step registry.
///
/// YAML and JSON are both accepted regardless of the file extension, since
/// every JSON document is also valid YAML.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse as a
/// workflow definition, or names a step type the default registry lacks.
///
/// # Examples
///
/// ```rust
/// use promptchain_engine::load_workflow_file;
///
/// let temp_dir = tempfile::tempdir()?;
/// let workflow_path = temp_dir.path().join("scan.yaml");
/// std::fs::write(&workflow_path, r#"
/// name: "scan-only"
/// steps:
///   - type: security_scan
///     config:
///       input: "{{inputs.prompt}}"
/// "#)?;
///
/// let workflow = load_workflow_file(&workflow_path)?;
/// assert_eq!(workflow.name(), "scan-only");
/// assert_eq!(workflow.steps()[0].id(), "security_scan_0");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_workflow_file(file_path: impl AsRef<Path>) -> Result<Workflow, ConfigurationError> {
    ChainBuilder::default().load_file(file_path)
}
