//! Run lifecycle types: status state machine, execution log entries, and the
//! final run report.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use thiserror::Error;

/// Output mapping produced by a single step.
pub type StepOutput = JsonMap<String, JsonValue>;

/// Lifecycle status of a workflow run.
///
/// A run starts `Pending`, moves to `Running` once, and ends in exactly one of
/// the terminal states. Terminal states are never left.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Run created but no step has been attempted.
    #[default]
    Pending,
    /// Steps are executing.
    Running,
    /// Every step executed successfully.
    Completed,
    /// A security scan reported unsafe content; remaining steps were not run.
    Halted,
    /// A step raised an error; remaining steps were not run.
    Failed,
    /// Cancellation was observed at a step boundary.
    Cancelled,
}

/// Raised when a status change would violate the run state machine.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid run status transition from {from:?} to {to:?}")]
pub struct StatusTransitionError {
    pub from: RunStatus,
    pub to: RunStatus,
}

impl RunStatus {
    /// Returns true when no further transition is allowed.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Halted | Self::Failed | Self::Cancelled)
    }

    /// Lowercase label used in logs and rendered reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Halted => "halted",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Applies a transition, rejecting anything other than
    /// `Pending -> Running` and `Running -> <terminal>`.
    pub fn transition(self, next: RunStatus) -> Result<RunStatus, StatusTransitionError> {
        let allowed = match (self, next) {
            (Self::Pending, Self::Running) => true,
            (Self::Running, terminal) => terminal.is_terminal(),
            _ => false,
        };
        if allowed {
            Ok(next)
        } else {
            Err(StatusTransitionError { from: self, to: next })
        }
    }
}

/// Outcome recorded for an attempted step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogEntryStatus {
    Success,
    Error,
}

/// Either the output a step produced or the message of the error it raised.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Output(StepOutput),
    Error(String),
}

/// One execution log record. Written once per attempted step, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    /// Identifier of the attempted step.
    pub step_id: String,
    /// Registered type name of the attempted step.
    pub step_type: String,
    /// Success or error.
    pub status: LogEntryStatus,
    /// Wall-clock time spent in the step.
    pub duration_seconds: f64,
    /// Output on success, error message on failure.
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

impl LogEntry {
    /// Builds a success entry carrying the step output.
    pub fn success(step_id: impl Into<String>, step_type: impl Into<String>, duration_seconds: f64, output: StepOutput) -> Self {
        Self {
            step_id: step_id.into(),
            step_type: step_type.into(),
            status: LogEntryStatus::Success,
            duration_seconds,
            outcome: StepOutcome::Output(output),
        }
    }

    /// Builds an error entry carrying the error message.
    pub fn error(step_id: impl Into<String>, step_type: impl Into<String>, duration_seconds: f64, message: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            step_type: step_type.into(),
            status: LogEntryStatus::Error,
            duration_seconds,
            outcome: StepOutcome::Error(message.into()),
        }
    }

    /// Output of a successful step.
    pub fn output(&self) -> Option<&StepOutput> {
        match &self.outcome {
            StepOutcome::Output(output) => Some(output),
            StepOutcome::Error(_) => None,
        }
    }

    /// Error message of a failed step.
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            StepOutcome::Output(_) => None,
            StepOutcome::Error(message) => Some(message.as_str()),
        }
    }
}

/// Final report of a workflow run, returned for every terminal status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    /// Identifier of the workflow that ran.
    pub workflow_id: String,
    /// Name of the workflow that ran.
    pub name: String,
    /// Terminal status.
    pub status: RunStatus,
    /// Total wall-clock duration of the run.
    pub duration_seconds: f64,
    /// Number of steps attempted (equal to the log length).
    pub steps_executed: usize,
    /// Accumulated execution context: `inputs` plus one entry per attempted step.
    pub context: JsonMap<String, JsonValue>,
    /// Ordered execution log.
    pub log: Vec<LogEntry>,
}

impl RunReport {
    /// Returns the recorded output for a step, if it produced one.
    pub fn step_output(&self, step_id: &str) -> Option<&StepOutput> {
        self.context.get(step_id).and_then(JsonValue::as_object)
    }
}
