//! Interfaces to the external capabilities steps delegate to.
//!
//! The engine does not fetch pages, call a text-generation API, or score text
//! itself. Hosts implement these traits and hand them to a run through
//! [`RunEnvironment`]. Calls are blocking from the engine's point of view and
//! the engine adds no timeout or retry of its own; whatever error a
//! collaborator returns fails the step that made the call.

use std::sync::Arc;

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

use crate::config::EngineConfig;

/// Text extracted from a web page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarvestedContent {
    /// False when the source refused or yielded nothing usable.
    pub success: bool,
    #[serde(default)]
    pub content: String,
    /// Free-form page metadata (title, word count, and so on).
    #[serde(default)]
    pub metadata: JsonMap<String, Value>,
}

/// Retrieves and extracts readable text from a URL.
pub trait ContentHarvester: Send + Sync {
    fn extract(&self, url: &str) -> Result<HarvestedContent>;
}

/// Parameters for one refinement session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinementRequest<'a> {
    pub topic: &'a str,
    pub question: &'a str,
    pub initial_prompt: &'a str,
    /// Upper bound on improvement cycles.
    pub max_iterations: u32,
}

/// Result of a refinement session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refinement {
    pub final_response: String,
    pub final_quality: f64,
    pub total_iterations: u32,
}

/// Produces a refined text through bounded improvement cycles.
pub trait IterativeRefiner: Send + Sync {
    fn iterate(&self, request: RefinementRequest<'_>) -> Result<Refinement>;
}

/// Composite quality score on a 0–10 scale with a per-dimension breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub total: f64,
    pub breakdown: IndexMap<String, f64>,
}

/// Heuristic text quality scorer.
pub trait QualityScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<QualityAssessment>;
}

/// A single finding reported by a security scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityIssue {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub severity: String,
    /// Description of the issue.
    #[serde(default)]
    pub issue: String,
    /// Text that triggered the finding.
    #[serde(default)]
    pub matched: String,
    /// Suggested remediation.
    #[serde(default)]
    pub fix: String,
}

/// Result of a security scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityReport {
    pub safe: bool,
    /// Aggregate risk on a 0–100 scale.
    pub risk_score: u8,
    pub risk_level: String,
    #[serde(default)]
    pub issues: Vec<SecurityIssue>,
}

/// Heuristic prompt vulnerability scanner.
pub trait SecurityScanner: Send + Sync {
    fn scan(&self, text: &str) -> Result<SecurityReport>;
}

/// The four collaborators a run may call.
#[derive(Clone)]
pub struct Collaborators {
    pub harvester: Arc<dyn ContentHarvester>,
    pub refiner: Arc<dyn IterativeRefiner>,
    pub scorer: Arc<dyn QualityScorer>,
    pub scanner: Arc<dyn SecurityScanner>,
}

impl Collaborators {
    pub fn new(
        harvester: Arc<dyn ContentHarvester>,
        refiner: Arc<dyn IterativeRefiner>,
        scorer: Arc<dyn QualityScorer>,
        scanner: Arc<dyn SecurityScanner>,
    ) -> Self {
        Self {
            harvester,
            refiner,
            scorer,
            scanner,
        }
    }
}

/// Everything a step needs besides the execution context.
#[derive(Clone)]
pub struct RunEnvironment {
    pub collaborators: Collaborators,
    pub config: EngineConfig,
}

impl RunEnvironment {
    /// Environment using [`EngineConfig::default`].
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}
