//! Append-only execution log.

use promptchain_types::LogEntry;

/// Ordered record of every attempted step in one run.
///
/// Only the run loop appends; callers get read-only access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionLog {
    entries: Vec<LogEntry>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Entries in the order steps were attempted.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a ExecutionLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
