//! Reference extraction helpers used for static validation before a run.

use serde_json::Value;

use crate::resolve::REFERENCE_PATTERN;

/// A reference found inside a config value tree.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReferenceSite {
    /// Location of the string inside the config, for example `config.headers[0]`.
    pub source_path: String,
    /// Reference path without delimiters.
    pub reference: String,
}

/// Extracts every `{{...}}` reference path from a string, in order.
///
/// Returned paths are trimmed and do not include the delimiters. Empty
/// references are skipped.
pub fn extract_variables(text: &str) -> Vec<String> {
    REFERENCE_PATTERN
        .captures_iter(text)
        .map(|captures| captures[1].trim().to_string())
        .filter(|path| !path.is_empty())
        .collect()
}

/// Returns the first segment of a reference path (the step id or `inputs`).
pub fn reference_root(reference: &str) -> &str {
    reference.split('.').next().unwrap_or(reference)
}

/// Collects references from an arbitrary JSON value tree.
pub fn collect_references_from_value(value: &Value, source_path: &str, sites: &mut Vec<ReferenceSite>) {
    match value {
        Value::String(text) => {
            for reference in extract_variables(text) {
                sites.push(ReferenceSite {
                    source_path: source_path.to_string(),
                    reference,
                });
            }
        }
        Value::Array(values) => {
            for (index, nested) in values.iter().enumerate() {
                collect_references_from_value(nested, format!("{source_path}[{index}]").as_str(), sites);
            }
        }
        Value::Object(map) => {
            for (key, nested) in map {
                collect_references_from_value(nested, format!("{source_path}.{key}").as_str(), sites);
            }
        }
        _ => {}
    }
}
