//! Execution engine: runs a workflow's steps in order over a fresh execution
//! context and log, applying the halting policy after each step.
//!
//! - Steps run strictly one after another; a step starts only after the
//!   previous step's outcome has been recorded
//! - A successful step writes its output under its identifier and appends a
//!   `success` entry; a security scan reporting unsafe content then halts the run
//! - A failing step writes `{"error": message}` under its identifier, appends an
//!   `error` entry, and fails the run; nothing is retried or skipped
//! - Cancellation is observed only between steps
//!
//! The report carries the whole context and log for every terminal status.

mod cancellation;
mod log;

use std::time::Instant;

use promptchain_types::{LogEntry, RunReport, RunStatus, StepOutput};
use serde_json::{Map as JsonMap, Value};
use tracing::{debug, error, info, warn};

pub use cancellation::CancellationToken;
pub use log::ExecutionLog;

use crate::{
    collaborator::RunEnvironment,
    model::{Step, StepKind, Workflow},
    resolve::ExecutionContext,
};

impl Workflow {
    /// Runs every step against `inputs` and returns the final report.
    ///
    /// Never fails: step errors are recorded in the report.
    pub fn run(&self, inputs: JsonMap<String, Value>, environment: &RunEnvironment) -> RunReport {
        self.run_with_cancellation(inputs, environment, &CancellationToken::new())
    }

    /// Like [`Workflow::run`], checking `cancellation` before each step.
    pub fn run_with_cancellation(
        &self,
        inputs: JsonMap<String, Value>,
        environment: &RunEnvironment,
        cancellation: &CancellationToken,
    ) -> RunReport {
        let run_started = Instant::now();
        let mut status = advance(RunStatus::Pending, RunStatus::Running);
        let mut context = ExecutionContext::with_inputs(inputs);
        let mut log = ExecutionLog::new();

        info!(workflow_id = %self.id(), name = %self.name(), steps = self.steps().len(), "running workflow");

        let mut terminal = RunStatus::Completed;
        for (index, step) in self.steps().iter().enumerate() {
            if cancellation.is_cancelled() {
                warn!(workflow_id = %self.id(), next_step = %step.id(), "workflow run cancelled");
                terminal = RunStatus::Cancelled;
                break;
            }

            if let Some(outcome) = run_step(step, index, self.steps().len(), &mut context, &mut log, environment) {
                terminal = outcome;
                break;
            }
        }

        status = advance(status, terminal);
        let duration_seconds = run_started.elapsed().as_secs_f64();
        info!(workflow_id = %self.id(), status = status.as_str(), duration_seconds, steps_executed = log.len(), "workflow finished");

        RunReport {
            workflow_id: self.id().to_string(),
            name: self.name().to_string(),
            status,
            duration_seconds,
            steps_executed: log.len(),
            context: context.into_inner(),
            log: log.into_entries(),
        }
    }
}

/// Executes one step and records its outcome. Returns the terminal status
/// when the run must stop after this step.
fn run_step(
    step: &Step,
    index: usize,
    total: usize,
    context: &mut ExecutionContext,
    log: &mut ExecutionLog,
    environment: &RunEnvironment,
) -> Option<RunStatus> {
    debug!(step_id = %step.id(), step_type = %step.kind(), position = index + 1, total, "step started");

    let started = Instant::now();
    let result = step.execute(context, environment);
    let duration_seconds = started.elapsed().as_secs_f64();

    match result {
        Ok(output) => {
            let halt = step.kind() == StepKind::SecurityScan && output.get("safe").and_then(Value::as_bool) != Some(true);
            let risk_level = output.get("risk_level").cloned().unwrap_or(Value::Null);

            context.insert_output(step.id(), output.clone());
            log.append(LogEntry::success(step.id(), step.kind().as_str(), duration_seconds, output));
            debug!(step_id = %step.id(), duration_seconds, "step succeeded");

            if halt {
                warn!(step_id = %step.id(), risk_level = %risk_level, "security halt");
                return Some(RunStatus::Halted);
            }
            None
        }
        Err(step_error) => {
            let message = step_error.to_string();
            error!(step_id = %step.id(), step_type = %step.kind(), duration_seconds, error = %message, "step failed");

            let mut failure = StepOutput::new();
            failure.insert("error".into(), Value::String(message.clone()));
            context.insert_output(step.id(), failure);
            log.append(LogEntry::error(step.id(), step.kind().as_str(), duration_seconds, message));
            Some(RunStatus::Failed)
        }
    }
}

fn advance(current: RunStatus, next: RunStatus) -> RunStatus {
    match current.transition(next) {
        Ok(status) => status,
        Err(transition_error) => {
            error!(error = %transition_error, "ignoring invalid run status transition");
            current
        }
    }
}
