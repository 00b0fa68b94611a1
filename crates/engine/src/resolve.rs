//! # Variable Resolution
//!
//! Steps reference values produced earlier in a run with `{{path.to.value}}`
//! tokens. This module owns the run-scoped [`ExecutionContext`] those tokens
//! are resolved against and the resolver itself.
//!
//! ## Resolution rules
//!
//! - Occurrences are found left to right and never overlap.
//! - The enclosed path is trimmed and split on `.`; the walk starts at the top
//!   level of the context and requires every intermediate value to be a mapping
//!   that contains the next segment.
//! - A complete walk substitutes the textual form of the final value.
//! - An incomplete walk leaves the occurrence untouched, delimiters included.
//!   Steps whose optional inputs are not populated yet still run.
//!
//! ## Usage
//!
//! ```rust
//! use promptchain_engine::resolve::{ExecutionContext, resolve};
//! use serde_json::json;
//!
//! let inputs = json!({"url": "https://example.com"}).as_object().cloned().unwrap();
//! let context = ExecutionContext::with_inputs(inputs);
//!
//! assert_eq!(resolve("fetch {{inputs.url}}", &context), "fetch https://example.com");
//! assert_eq!(resolve("{{inputs.missing}}", &context), "{{inputs.missing}}");
//! ```

use once_cell::sync::Lazy;
use promptchain_types::StepOutput;
use regex::{Captures, Regex};
use serde_json::{Map as JsonMap, Value};

/// Reserved top-level key holding the caller-supplied run inputs.
pub const INPUTS_KEY: &str = "inputs";

/// Matches one `{{...}}` occurrence; the inner text is captured lazily so
/// adjacent references stay separate.
pub(crate) static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("valid reference pattern"));

/// Run-scoped mapping from step identifier (and `inputs`) to that entry's output.
///
/// A context is created fresh for every run and only ever grows: entries are
/// added, never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionContext {
    entries: JsonMap<String, Value>,
}

impl ExecutionContext {
    /// Creates a context seeded with `{"inputs": inputs}`.
    pub fn with_inputs(inputs: JsonMap<String, Value>) -> Self {
        let mut entries = JsonMap::new();
        entries.insert(INPUTS_KEY.to_string(), Value::Object(inputs));
        Self { entries }
    }

    /// Records the output mapping of a step under its identifier.
    pub fn insert_output(&mut self, step_id: impl Into<String>, output: StepOutput) {
        self.entries.insert(step_id.into(), Value::Object(output));
    }

    /// Returns the top-level entry for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns true when a top-level entry exists for the key.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of top-level entries, `inputs` included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walks a dotted path through nested mappings.
    ///
    /// Returns `None` as soon as a segment is missing or the current value is
    /// not a mapping while segments remain.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.entries.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Read-only view of the whole context.
    pub fn as_map(&self) -> &JsonMap<String, Value> {
        &self.entries
    }

    pub fn into_inner(self) -> JsonMap<String, Value> {
        self.entries
    }
}

impl From<JsonMap<String, Value>> for ExecutionContext {
    fn from(entries: JsonMap<String, Value>) -> Self {
        Self { entries }
    }
}

/// Replaces every resolvable `{{path}}` occurrence in `text`.
///
/// Unresolvable occurrences are kept verbatim. The function never fails and
/// is a no-op on text without references.
pub fn resolve(text: &str, context: &ExecutionContext) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }

    REFERENCE_PATTERN
        .replace_all(text, |captures: &Captures<'_>| {
            let path = captures[1].trim();
            if path.is_empty() {
                return captures[0].to_string();
            }
            match context.lookup(path) {
                Some(value) => render_value(value),
                None => captures[0].to_string(),
            }
        })
        .into_owned()
}

/// Recursively resolves every string inside a JSON value.
///
/// Arrays and objects are rebuilt with resolved members; non-string scalars
/// are returned unchanged.
pub fn interpolate_value(value: &Value, context: &ExecutionContext) -> Value {
    match value {
        Value::String(text) => Value::String(resolve(text, context)),
        Value::Array(items) => Value::Array(items.iter().map(|item| interpolate_value(item, context)).collect()),
        Value::Object(map) => {
            let mut interpolated = JsonMap::new();
            for (key, nested) in map {
                interpolated.insert(key.clone(), interpolate_value(nested, context));
            }
            Value::Object(interpolated)
        }
        _ => value.clone(),
    }
}

/// Textual form substituted for a resolved reference.
///
/// Strings are inserted without quotes; everything else uses compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> ExecutionContext {
        let mut context = ExecutionContext::with_inputs(json!({"url": "https://x", "count": 3}).as_object().cloned().unwrap());
        context.insert_output(
            "harvest_web_0",
            json!({"success": true, "content": "body text", "metadata": {"title": "Home", "words": 120}})
                .as_object()
                .cloned()
                .unwrap(),
        );
        context.insert_output("quality_score_1", json!({"total_score": 8.0}).as_object().cloned().unwrap());
        context
    }

    #[test]
    fn substitutes_each_reference_independently() {
        let resolved = resolve(
            "{{inputs.url}} | {{harvest_web_0.content}} | {{harvest_web_0.metadata.title}}",
            &context(),
        );
        assert_eq!(resolved, "https://x | body text | Home");
    }

    #[test]
    fn missing_key_is_left_verbatim() {
        let text = "a {{harvest_web_0.nope}} b {{inputs.url}}";
        assert_eq!(resolve(text, &context()), "a {{harvest_web_0.nope}} b https://x");
    }

    #[test]
    fn walking_through_a_scalar_is_left_verbatim() {
        let text = "{{harvest_web_0.content.length}}";
        assert_eq!(resolve(text, &context()), text);
    }

    #[test]
    fn unknown_root_is_left_verbatim() {
        assert_eq!(resolve("{{later_step.output}}", &context()), "{{later_step.output}}");
    }

    #[test]
    fn non_string_values_render_as_json() {
        let context = context();
        assert_eq!(resolve("{{quality_score_1.total_score}}", &context), "8.0");
        assert_eq!(resolve("{{inputs.count}}", &context), "3");
        assert_eq!(resolve("{{harvest_web_0.success}}", &context), "true");
        assert_eq!(resolve("{{harvest_web_0.metadata}}", &context), r#"{"title":"Home","words":120}"#);
    }

    #[test]
    fn whitespace_inside_delimiters_is_trimmed() {
        assert_eq!(resolve("{{ inputs.url }}", &context()), "https://x");
    }

    #[test]
    fn empty_reference_is_left_verbatim() {
        assert_eq!(resolve("x {{}} y {{  }}", &context()), "x {{}} y {{  }}");
    }

    #[test]
    fn unterminated_reference_is_left_verbatim() {
        assert_eq!(resolve("{{inputs.url", &context()), "{{inputs.url");
    }

    #[test]
    fn second_pass_is_a_no_op_once_resolved() {
        let context = context();
        let first = resolve("see {{inputs.url}} and {{harvest_web_0.content}}", &context);
        assert_eq!(resolve(&first, &context), first);
    }

    #[test]
    fn interpolate_value_reaches_nested_strings() {
        let value = json!({"headers": ["{{inputs.url}}", 4], "nested": {"title": "{{harvest_web_0.metadata.title}}"}});
        let interpolated = interpolate_value(&value, &context());
        assert_eq!(interpolated, json!({"headers": ["https://x", 4], "nested": {"title": "Home"}}));
    }

    #[test]
    fn lookup_requires_mappings_along_the_path() {
        let context = context();
        assert_eq!(context.lookup("harvest_web_0.metadata.words"), Some(&json!(120)));
        assert_eq!(context.lookup("harvest_web_0.content.x"), None);
        assert_eq!(context.lookup(""), None);
    }

    #[test]
    fn outputs_grow_the_context_beside_inputs() {
        let context = context();
        assert_eq!(context.len(), 3);
        assert!(context.contains(INPUTS_KEY));
        assert!(context.contains("quality_score_1"));
        assert!(!context.contains("security_scan_2"));
        assert_eq!(context.get(INPUTS_KEY), Some(&json!({"url": "https://x", "count": 3})));
        let keys: Vec<_> = context.as_map().keys().map(String::as_str).collect();
        assert_eq!(keys, vec![INPUTS_KEY, "harvest_web_0", "quality_score_1"]);
    }
}
