//! # Workflow Model Definitions
//!
//! Core data structures for built workflows: the closed set of step kinds,
//! the step value itself, and the immutable [`Workflow`] produced by the
//! chain builder.
//!
//! ## Core Concepts
//!
//! - **StepKind**: one of the five step variants; dispatch is a plain `match`
//! - **Step**: identifier + kind + raw config; config strings may carry
//!   `{{path}}` references that are resolved at run time, never at build time
//! - **Workflow**: identity, metadata, and the ordered step list
//!
//! Workflows are only created by [`ChainBuilder`](crate::workflow::builder::ChainBuilder)
//! and are read-only afterwards. Running one never mutates it, so the same
//! workflow can be run repeatedly; each run gets a fresh context and log.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

/// Raw configuration attached to a step.
pub type StepConfig = JsonMap<String, Value>;

/// The five step variants the engine knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// Fetch and extract text from a URL.
    #[serde(rename = "harvest_web")]
    Harvest,
    /// Refine text through bounded improvement cycles.
    #[serde(rename = "dna_iterate")]
    Iterate,
    /// Score text quality against a threshold.
    #[serde(rename = "quality_score")]
    QualityScore,
    /// Scan text for prompt vulnerabilities; unsafe results halt the run.
    #[serde(rename = "security_scan")]
    SecurityScan,
    /// Evaluate a single comparison and report the selected branch label.
    #[serde(rename = "conditional")]
    Conditional,
}

impl StepKind {
    /// Every kind, in registration order.
    pub const ALL: [StepKind; 5] = [
        StepKind::Harvest,
        StepKind::Iterate,
        StepKind::QualityScore,
        StepKind::SecurityScan,
        StepKind::Conditional,
    ];

    /// Canonical type name written to exported documents and log entries.
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Harvest => "harvest_web",
            StepKind::Iterate => "dna_iterate",
            StepKind::QualityScore => "quality_score",
            StepKind::SecurityScan => "security_scan",
            StepKind::Conditional => "conditional",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single unit of work inside a workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    id: String,
    kind: StepKind,
    config: StepConfig,
}

impl Step {
    pub(crate) fn new(id: String, kind: StepKind, config: StepConfig) -> Self {
        Self { id, kind, config }
    }

    /// Identifier, unique within the owning workflow.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Unresolved configuration as authored.
    pub fn config(&self) -> &StepConfig {
        &self.config
    }
}

/// Ordered, immutable list of steps plus identity and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    id: String,
    name: String,
    description: String,
    steps: Vec<Step>,
}

impl Workflow {
    pub(crate) fn new(id: String, name: String, description: String, steps: Vec<Step>) -> Self {
        Self {
            id,
            name,
            description,
            steps,
        }
    }

    /// Generated unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Looks up a step by identifier.
    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == step_id)
    }

    /// Renders the step sequence as a vertical list for display.
    pub fn visualize(&self) -> String {
        let rule = "=".repeat(60);
        let mut rendered = format!("Workflow: {}\n{rule}\n\n", self.name);
        for (index, step) in self.steps.iter().enumerate() {
            rendered.push_str(&format!("  {}. [{}] {}\n", index + 1, step.kind, step.id));
            if index + 1 < self.steps.len() {
                rendered.push_str("      ↓\n");
            }
        }
        rendered.push('\n');
        rendered.push_str(&rule);
        rendered
    }
}
