//! Static reference diagnostics for built workflows.
//!
//! A reference can only resolve at run time if its root is `inputs` or the
//! identifier of a step that runs earlier. This check is advisory: the
//! resolver leaves unresolvable references verbatim, so nothing here blocks a
//! build or a run.

use std::collections::HashSet;

use serde_json::Value;

use crate::{
    model::Workflow,
    resolve::INPUTS_KEY,
    templates::{ReferenceSite, collect_references_from_value, reference_root},
};

/// A reference that cannot resolve when the workflow runs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UnresolvedReference {
    /// Step whose config carries the reference.
    pub step_id: String,
    /// Location inside the step, for example `config.input`.
    pub config_path: String,
    /// Reference path without delimiters.
    pub reference: String,
}

impl Workflow {
    /// Lists references whose root is neither `inputs` nor an earlier step.
    ///
    /// References to the step itself or to later steps are reported too, since
    /// their outputs are not in the context yet when the step runs.
    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        let mut earlier: HashSet<&str> = HashSet::from([INPUTS_KEY]);
        let mut unresolved = Vec::new();

        for step in self.steps() {
            let mut sites = Vec::new();
            collect_references_from_value(&Value::Object(step.config().clone()), "config", &mut sites);

            for ReferenceSite { source_path, reference } in sites {
                if !earlier.contains(reference_root(&reference)) {
                    unresolved.push(UnresolvedReference {
                        step_id: step.id().to_string(),
                        config_path: source_path,
                        reference,
                    });
                }
            }

            earlier.insert(step.id());
        }

        unresolved
    }
}
