//! Workflow definition document shared by the chain builder and exporters.
//!
//! The document is the load/export contract for a workflow. Step order is the
//! authoring order and is preserved through every conversion. Step `type`
//! values are kept as plain strings here; mapping them onto step kinds is the
//! engine's job, so an unknown type is reported by the engine as a
//! configuration error rather than as a parse failure.

pub mod validation;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Describes a complete workflow: metadata plus its ordered steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowDefinition {
    /// Human-readable workflow name.
    pub name: String,
    /// Optional descriptive copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Document format version written by exporters (for example, `1.0`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// RFC 3339 timestamp recorded at export time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Ordered list of steps executed sequentially.
    pub steps: Vec<WorkflowStepDefinition>,
}

/// Describes a single step within a workflow document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowStepDefinition {
    /// Explicit step identifier. When absent the builder assigns `{type}_{index}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Registered step type name (for example, `harvest_web`).
    pub r#type: String,
    /// Step configuration; string values may carry `{{path}}` references.
    #[serde(default)]
    pub config: JsonMap<String, JsonValue>,
}

impl WorkflowDefinition {
    /// Creates an empty definition with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            version: None,
            created_at: None,
            steps: Vec::new(),
        }
    }
}
