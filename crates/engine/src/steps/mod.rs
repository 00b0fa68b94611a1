//! Step variant execution.
//!
//! Each variant resolves the config entries it uses against the execution
//! context, delegates to its collaborator (the conditional variant evaluates
//! locally), and returns a named output mapping. Dispatch is a `match` over
//! [`StepKind`].
//!
//! - `harvest`: content retrieval
//! - `iterate`: iterative refinement
//! - `quality`: quality scoring with a pass threshold
//! - `security`: vulnerability scanning
//! - `conditional`: single-comparison evaluation

mod conditional;
mod harvest;
mod iterate;
mod quality;
mod security;

use promptchain_types::StepOutput;
use serde_json::Value;

use crate::{
    collaborator::RunEnvironment,
    error::StepError,
    model::{Step, StepConfig, StepKind},
    resolve::{ExecutionContext, interpolate_value, render_value, resolve},
};

impl Step {
    /// Executes the step against a read-only view of the context.
    pub fn execute(&self, context: &ExecutionContext, environment: &RunEnvironment) -> Result<StepOutput, StepError> {
        match self.kind() {
            StepKind::Harvest => harvest::execute(self.config(), context, environment),
            StepKind::Iterate => iterate::execute(self.config(), context, environment),
            StepKind::QualityScore => quality::execute(self.config(), context, environment),
            StepKind::SecurityScan => security::execute(self.config(), context, environment),
            StepKind::Conditional => Ok(conditional::execute(self.config(), context)),
        }
    }
}

/// Resolved text for a required key. Non-string scalars are rendered as text.
fn required_text(config: &StepConfig, key: &'static str, context: &ExecutionContext) -> Result<String, StepError> {
    optional_text(config, key, context).ok_or(StepError::MissingConfig { key })
}

/// Resolved text for an optional key; `null` counts as absent.
fn optional_text(config: &StepConfig, key: &str, context: &ExecutionContext) -> Option<String> {
    match config.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(resolve(text, context)),
        other => Some(render_value(&interpolate_value(other, context))),
    }
}

/// Resolved number for an optional key. Strings are resolved and then parsed.
fn number_setting(config: &StepConfig, key: &'static str, context: &ExecutionContext) -> Result<Option<f64>, StepError> {
    let parsed = match config.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => resolve(text, context).trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(StepError::InvalidConfig {
            key,
            reason: format!("expected a number, got {}", config.get(key).map(render_value).unwrap_or_default()),
        }),
    }
}

/// Resolved non-negative count for an optional key.
fn count_setting(config: &StepConfig, key: &'static str, context: &ExecutionContext) -> Result<Option<u32>, StepError> {
    let Some(value) = number_setting(config, key, context)? else {
        return Ok(None);
    };
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(StepError::InvalidConfig {
            key,
            reason: format!("expected a whole non-negative count, got {value}"),
        });
    }
    Ok(Some(value as u32))
}
