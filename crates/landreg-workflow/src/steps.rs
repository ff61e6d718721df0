//! Append-only step log owned by each orchestrator instance.

use landreg_core::Timestamp;
use serde::{Deserialize, Serialize};

use crate::phase::WorkflowPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Info,
    Success,
    Error,
}

/// One log entry. Entries are never modified once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepEntry {
    pub timestamp: Timestamp,
    pub message: String,
    pub kind: StepKind,
    pub phase: WorkflowPhase,
}

/// Ordered workflow trace. Every append is mirrored to `tracing`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepLog {
    entries: Vec<StepEntry>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, phase: WorkflowPhase, message: impl Into<String>) {
        self.push(StepKind::Info, phase, message.into());
    }

    pub fn success(&mut self, phase: WorkflowPhase, message: impl Into<String>) {
        self.push(StepKind::Success, phase, message.into());
    }

    pub fn error(&mut self, phase: WorkflowPhase, message: impl Into<String>) {
        self.push(StepKind::Error, phase, message.into());
    }

    fn push(&mut self, kind: StepKind, phase: WorkflowPhase, message: String) {
        match kind {
            StepKind::Error => tracing::error!(%phase, "{message}"),
            StepKind::Info | StepKind::Success => tracing::info!(%phase, ?kind, "{message}"),
        }
        self.entries.push(StepEntry {
            timestamp: Timestamp::now(),
            message,
            kind,
            phase,
        });
    }

    pub fn entries(&self) -> &[StepEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies of the entries appended at or after position `mark`.
    pub fn since(&self, mark: usize) -> Vec<StepEntry> {
        self.entries.get(mark..).map(<[StepEntry]>::to_vec).unwrap_or_default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a StepLog {
    type Item = &'a StepEntry;
    type IntoIter = std::slice::Iter<'a, StepEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order() {
        let mut log = StepLog::new();
        log.info(WorkflowPhase::Started, "start");
        log.success(WorkflowPhase::Separating, "split");
        log.error(WorkflowPhase::PublishingMetadata, "boom");
        let kinds: Vec<_> = log.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![StepKind::Info, StepKind::Success, StepKind::Error]);
        assert_eq!(log.entries()[2].phase, WorkflowPhase::PublishingMetadata);
    }

    #[test]
    fn since_returns_tail() {
        let mut log = StepLog::new();
        log.info(WorkflowPhase::Started, "a");
        let mark = log.len();
        log.info(WorkflowPhase::Started, "b");
        let tail = log.since(mark);
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].message, "b");
        assert!(log.since(10).is_empty());
    }

    #[test]
    fn serializes_as_array_with_lowercase_kind() {
        let mut log = StepLog::new();
        log.success(WorkflowPhase::Completed, "done");
        let v = serde_json::to_value(&log).unwrap();
        assert_eq!(v[0]["kind"], "success");
        assert_eq!(v[0]["phase"], "Completed");
        assert!(v[0]["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
