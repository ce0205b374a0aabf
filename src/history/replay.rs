use crate::{
    engine::Engine,
    engine::notify::Notification,
    history::entry::{HistoryEntry, Operation},
};

impl Engine {
    /// Revert the newest undo entry. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo() else {
            return false;
        };
        entry.revert(&mut self.registry);
        self.after_replay(Operation::Undo);
        true
    }

    /// Replay the newest redo entry. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo() else {
            return false;
        };
        entry.replay(&mut self.registry);
        self.after_replay(Operation::Redo);
        true
    }

    fn after_replay(&mut self, op: Operation) {
        self.timeline.prune(&self.registry);
        self.notify(Notification::DocumentChanged { op });
        self.notify_history();
    }

    /// Whether [`Self::undo`] would do something.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether [`Self::redo`] would do something.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Label of the next undo step.
    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    /// Label of the next redo step.
    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    /// Newest undo entry.
    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.history.undo_entries().last()
    }

    /// Start grouping every following mutation into one undo step.
    ///
    /// Returns `false` if a batch is already open.
    pub fn begin_batch(&mut self, label: &str) -> bool {
        self.history.begin_batch(label)
    }

    /// Close the open batch. Returns `true` when a composite entry was pushed.
    pub fn end_batch(&mut self) -> bool {
        let pushed = self.history.end_batch();
        if pushed {
            self.notify_history();
        }
        pushed
    }

    /// Whether a batch is open.
    pub fn is_batching(&self) -> bool {
        self.history.is_batching()
    }

    /// Drop all undo/redo entries.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.notify_history();
    }

    /// Change the undo depth bound.
    pub fn set_max_history(&mut self, max: usize) {
        self.history.set_max_entries(max);
        self.opts.max_history = self.history.max_entries();
        self.notify_history();
    }
}
