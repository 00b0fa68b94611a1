//! Structural validation for workflow definition documents.
//!
//! These checks run before any step is materialized. They cover shape problems
//! the deserializer cannot express; step type names and identifier collisions
//! are checked by the builder as it replays the steps.

use super::WorkflowDefinition;

/// Validate a definition document, returning a human-readable reason on failure.
///
/// - The workflow name must contain non-whitespace text.
/// - Explicit step identifiers must not be empty.
/// - Step types must not be empty.
pub fn validate_definition(definition: &WorkflowDefinition) -> Result<(), String> {
    if definition.name.trim().is_empty() {
        return Err("workflow definition is missing the required 'name'".to_string());
    }

    for (index, step) in definition.steps.iter().enumerate() {
        if step.r#type.trim().is_empty() {
            return Err(format!("step {index} is missing the required 'type'"));
        }
        if let Some(identifier) = &step.id
            && identifier.trim().is_empty()
        {
            return Err(format!("step {index} declares an empty 'id'"));
        }
    }

    Ok(())
}
