//! Bounded undo/redo stacks of [`HistoryEntry`] values.
//!
//! - Recording a new entry clears the redo stack.
//! - The undo stack is capped at `max_entries`; the oldest entry is dropped first.
//! - While a batch is open, recorded entries are folded into one composite entry that is
//!   pushed by [`HistoryManager::end_batch`].
//!
//! The manager only moves entries between stacks. Writing the stored values back into the
//! registries is done by [`crate::Engine::undo`] / [`crate::Engine::redo`].

use std::collections::VecDeque;

use crate::{
    foundation::core::now_ms,
    history::entry::{EntityChange, EntityRef, HistoryEntry, Operation, coalesce},
};

#[derive(Clone, Debug)]
struct PendingBatch {
    label: String,
    subject: Option<EntityRef>,
    changes: Vec<EntityChange>,
}

/// Undo/redo history.
#[derive(Clone, Debug)]
pub struct HistoryManager {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    max_entries: usize,
    batch: Option<PendingBatch>,
}

impl HistoryManager {
    /// Create a history keeping at most `max_entries` undo steps.
    pub fn new(max_entries: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_entries: max_entries.max(1),
            batch: None,
        }
    }

    /// Record a finished step.
    ///
    /// Returns `false` when the step was folded into the open batch instead of being pushed.
    pub fn record(&mut self, entry: HistoryEntry) -> bool {
        if let Some(batch) = self.batch.as_mut() {
            tracing::debug!(label = %entry.label, "History entry folded into batch");
            if batch.subject.is_none() {
                batch.subject = entry.subject;
            }
            batch.changes.extend(entry.changes);
            return false;
        }
        self.push(entry);
        true
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.redo_stack.clear();
        tracing::debug!(
            label = %entry.label,
            changes = entry.changes.len(),
            undo_depth = self.undo_stack.len() + 1,
            "History entry pushed"
        );
        self.undo_stack.push_back(entry);
        self.trim();
    }

    fn trim(&mut self) {
        while self.undo_stack.len() > self.max_entries {
            if let Some(dropped) = self.undo_stack.pop_front() {
                tracing::debug!(label = %dropped.label, "Oldest history entry evicted");
            }
        }
    }

    /// Open a batch. Returns `false` (and keeps the current batch) if one is already open.
    pub fn begin_batch(&mut self, label: &str) -> bool {
        if self.batch.is_some() {
            tracing::warn!(label, "begin_batch called while already batching, ignoring");
            return false;
        }
        self.batch = Some(PendingBatch {
            label: label.to_string(),
            subject: None,
            changes: Vec::new(),
        });
        tracing::debug!(label, "Batch started");
        true
    }

    /// Close the open batch and push its composite entry.
    ///
    /// Returns `true` when an entry was pushed; an empty batch or no open batch pushes nothing.
    pub fn end_batch(&mut self) -> bool {
        let Some(batch) = self.batch.take() else {
            return false;
        };
        let changes = coalesce(batch.changes);
        if changes.is_empty() {
            tracing::debug!(label = %batch.label, "Batch ended without changes");
            return false;
        }
        self.push(HistoryEntry {
            op: Operation::Batch,
            label: batch.label,
            subject: batch.subject,
            changes,
            timestamp: now_ms(),
        });
        true
    }

    /// Whether a batch is open.
    pub fn is_batching(&self) -> bool {
        self.batch.is_some()
    }

    fn close_stuck_batch(&mut self) {
        if self.batch.is_some() {
            tracing::warn!("Ending stuck batch before undo/redo");
            self.end_batch();
        }
    }

    /// Move the newest undo entry to the redo stack and return it.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        self.close_stuck_batch();
        let entry = self.undo_stack.pop_back()?;
        tracing::debug!(
            label = %entry.label,
            undo_remaining = self.undo_stack.len(),
            "Undo"
        );
        self.redo_stack.push(entry);
        self.redo_stack.last()
    }

    /// Move the newest redo entry back to the undo stack and return it.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        self.close_stuck_batch();
        let entry = self.redo_stack.pop()?;
        tracing::debug!(
            label = %entry.label,
            redo_remaining = self.redo_stack.len(),
            "Redo"
        );
        self.undo_stack.push_back(entry);
        self.trim();
        self.undo_stack.back()
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label of the step [`Self::undo`] would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.label.as_str())
    }

    /// Label of the step [`Self::redo`] would replay.
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.label.as_str())
    }

    /// Number of undo entries.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo entries.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo entries, oldest first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo_stack.iter()
    }

    /// Drop both stacks and any open batch.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch = None;
        tracing::debug!("History cleared");
    }

    /// Undo depth bound.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Change the undo depth bound, evicting the oldest entries if needed.
    pub fn set_max_entries(&mut self, max: usize) {
        self.max_entries = max.max(1);
        self.trim();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/manager.rs"]
mod tests;
