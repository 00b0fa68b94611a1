//! Shared type definitions for promptchain workflows.
//!
//! These types describe the data that crosses the engine boundary: the workflow
//! definition document used for load/export, the execution log, and the report
//! returned from a run. They carry no execution behaviour.

pub mod run;
pub mod workflow;

pub use run::{LogEntry, LogEntryStatus, RunReport, RunStatus, StepOutcome, StepOutput, StatusTransitionError};
pub use workflow::{WorkflowDefinition, WorkflowStepDefinition, validation::validate_definition};
