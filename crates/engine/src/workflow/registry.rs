//! Step type registry handed to the chain builder.
//!
//! Maps authored type names onto [`StepKind`]. The registry is an ordinary
//! value built once by the host and passed to [`ChainBuilder::new`]; nothing is
//! registered globally.
//!
//! [`ChainBuilder::new`]: crate::workflow::builder::ChainBuilder::new

use indexmap::IndexMap;

use crate::model::StepKind;

/// Name → step kind lookup table, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRegistry {
    kinds: IndexMap<String, StepKind>,
}

impl StepRegistry {
    /// A registry with no names at all.
    pub fn empty() -> Self {
        Self { kinds: IndexMap::new() }
    }

    /// Registers (or re-points) a name.
    pub fn register(mut self, name: impl Into<String>, kind: StepKind) -> Self {
        self.kinds.insert(name.into(), kind);
        self
    }

    /// Resolves a type name.
    pub fn lookup(&self, name: &str) -> Option<StepKind> {
        self.kinds.get(name).copied()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }
}

impl Default for StepRegistry {
    /// Canonical names for every kind, plus the short aliases `harvest` and `iterate`.
    fn default() -> Self {
        StepKind::ALL
            .into_iter()
            .fold(Self::empty(), |registry, kind| registry.register(kind.as_str(), kind))
            .register("harvest", StepKind::Harvest)
            .register("iterate", StepKind::Iterate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_knows_canonical_names_and_aliases() {
        let registry = StepRegistry::default();
        assert_eq!(registry.lookup("harvest_web"), Some(StepKind::Harvest));
        assert_eq!(registry.lookup("dna_iterate"), Some(StepKind::Iterate));
        assert_eq!(registry.lookup("iterate"), Some(StepKind::Iterate));
        assert_eq!(registry.lookup("security_scan"), Some(StepKind::SecurityScan));
        assert_eq!(registry.lookup("shell"), None);
        assert_eq!(registry.names().count(), 7);
    }

    #[test]
    fn empty_registry_can_be_extended() {
        let registry = StepRegistry::empty().register("scan", StepKind::SecurityScan);
        assert_eq!(registry.lookup("scan"), Some(StepKind::SecurityScan));
        assert_eq!(registry.lookup("security_scan"), None);
    }
}
