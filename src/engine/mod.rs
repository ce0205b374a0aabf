//! The owner object: registries, history, clipboard, timeline state and subscribers.
//!
//! Every public mutation runs inside [`Engine::transact`]. Writes made through
//! [`Engine::put`], [`Engine::delete`] and [`Engine::set_root`] are journaled with their
//! previous value; the outermost transaction either commits the journal as one history entry
//! and notifies subscribers, or, on error, writes the previous values back so the caller sees
//! no partial mutation.

pub(crate) mod notify;

use crate::{
    edit::clipboard::Clipboard,
    foundation::config::EngineOpts,
    foundation::core::{ClipId, CompositionId, TrackId, now_ms},
    foundation::error::{CompError, CompResult},
    history::entry::{Change, EntityChange, EntityRef, HistoryEntry, Operation, coalesce},
    history::manager::HistoryManager,
    model::clip::Clip,
    model::composition::Composition,
    model::track::Track,
    store::integrity::Violation,
    store::registry::{Entity, Registry},
    timeline::state::TimelineState,
};

use self::notify::{Notification, SubscriptionId, Subscribers};

#[derive(Debug, Default)]
struct Journal {
    depth: usize,
    subject: Option<EntityRef>,
    changes: Vec<EntityChange>,
}

/// In-memory composition document engine.
///
/// Single-threaded and synchronous: every method runs to completion and notifies
/// subscribers before returning. A multi-threaded host should funnel all calls through one
/// command queue that owns the engine.
#[derive(Debug)]
pub struct Engine {
    pub(crate) registry: Registry,
    pub(crate) history: HistoryManager,
    pub(crate) clipboard: Clipboard,
    pub(crate) timeline: TimelineState,
    pub(crate) opts: EngineOpts,
    subscribers: Subscribers,
    journal: Journal,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_valid_opts(EngineOpts::default())
    }
}

impl Engine {
    /// Create an empty engine.
    pub fn new(opts: EngineOpts) -> CompResult<Self> {
        opts.validate()?;
        Ok(Self::with_valid_opts(opts))
    }

    fn with_valid_opts(opts: EngineOpts) -> Self {
        Self {
            registry: Registry::default(),
            history: HistoryManager::new(opts.max_history),
            clipboard: Clipboard::default(),
            timeline: TimelineState::new(opts.clamp_zoom(opts.default_zoom)),
            opts,
            subscribers: Subscribers::default(),
            journal: Journal::default(),
        }
    }

    /// Engine options.
    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Read access to the entity tables.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Look up a composition.
    pub fn composition(&self, id: &CompositionId) -> Option<&Composition> {
        self.registry.composition(id)
    }

    /// Look up a track.
    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.registry.track(id)
    }

    /// Look up a clip.
    pub fn clip(&self, id: &ClipId) -> Option<&Clip> {
        self.registry.clip(id)
    }

    /// The composition marked root.
    pub fn root_composition(&self) -> Option<&Composition> {
        self.registry
            .root_id()
            .and_then(|id| self.registry.composition(id))
    }

    /// Undo/redo stacks.
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Current clipboard.
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Active composition, playhead, zoom and selection.
    pub fn timeline(&self) -> &TimelineState {
        &self.timeline
    }

    /// Verify all cross-reference invariants.
    pub fn check_integrity(&self) -> Vec<Violation> {
        self.registry.check_integrity()
    }

    /// Register a callback fired after every mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&Notification) + 'static) -> SubscriptionId {
        self.subscribers.add(Box::new(callback))
    }

    /// Remove a callback. Returns `false` for an unknown handle.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Number of registered callbacks.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.subscribers.emit(&notification);
    }

    pub(crate) fn notify_history(&mut self) {
        let notification = Notification::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        };
        self.notify(notification);
    }

    pub(crate) fn require<T: Entity>(&self, id: &T::Id) -> CompResult<&T> {
        self.registry
            .get::<T>(id)
            .ok_or_else(|| CompError::not_found(T::KIND, id))
    }

    /// Run `f` as one undoable step.
    ///
    /// Nested calls join the enclosing step. On error the writes made by `f` are reverted.
    pub(crate) fn transact<T>(
        &mut self,
        op: Operation,
        label: impl Into<String>,
        f: impl FnOnce(&mut Self) -> CompResult<T>,
    ) -> CompResult<T> {
        let mark = self.journal.changes.len();
        let outermost = self.journal.depth == 0;
        self.journal.depth += 1;
        let result = f(self);
        self.journal.depth -= 1;

        match &result {
            Err(err) => {
                self.rollback_to(mark);
                if outermost {
                    self.journal.subject = None;
                    tracing::debug!(?op, %err, "Operation rejected, journal rolled back");
                }
            }
            Ok(_) if outermost => self.commit(op, label.into()),
            Ok(_) => {}
        }
        result
    }

    fn rollback_to(&mut self, mark: usize) {
        let undone: Vec<EntityChange> = self.journal.changes.drain(mark..).collect();
        for change in undone.iter().rev() {
            change.write_previous(&mut self.registry);
        }
    }

    fn commit(&mut self, op: Operation, label: String) {
        let changes = coalesce(std::mem::take(&mut self.journal.changes));
        let subject = self.journal.subject.take();
        if changes.is_empty() {
            tracing::debug!(?op, "Operation changed nothing");
            return;
        }
        let subject = subject.or_else(|| changes.iter().find_map(EntityChange::entity));
        self.history.record(HistoryEntry {
            op,
            label,
            subject,
            changes,
            timestamp: now_ms(),
        });
        self.timeline.prune(&self.registry);
        self.notify(Notification::DocumentChanged { op });
        self.notify_history();
    }

    /// Mark the entity the current step is about (first call wins).
    pub(crate) fn set_subject<T: Entity>(&mut self, id: &T::Id) {
        if self.journal.subject.is_none() {
            self.journal.subject = Some(EntityRef {
                kind: T::KIND,
                id: id.to_string(),
            });
        }
    }

    /// Store `value` and journal the write.
    pub(crate) fn put<T: Entity>(&mut self, value: T) {
        debug_assert!(self.journal.depth > 0, "put outside of a transaction");
        let id = value.id().to_string();
        let previous = self.registry.insert(value.clone());
        self.journal.changes.push(T::wrap(Change {
            id,
            previous,
            new: Some(value),
        }));
    }

    /// Remove an entity and journal the deletion.
    pub(crate) fn delete<T: Entity>(&mut self, id: &T::Id) -> Option<T> {
        debug_assert!(self.journal.depth > 0, "delete outside of a transaction");
        let previous = self.registry.remove::<T>(id)?;
        self.journal.changes.push(T::wrap(Change {
            id: id.to_string(),
            previous: Some(previous.clone()),
            new: None,
        }));
        Some(previous)
    }

    /// Move the root pointer and journal the write.
    pub(crate) fn set_root(&mut self, root: Option<CompositionId>) {
        debug_assert!(self.journal.depth > 0, "set_root outside of a transaction");
        let previous = std::mem::replace(&mut self.registry.root, root.clone());
        self.journal
            .changes
            .push(EntityChange::Root { previous, new: root });
    }
}
