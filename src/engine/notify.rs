use crate::history::entry::Operation;

/// Event delivered to subscribers after the mutation it describes has completed.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    /// Registry contents changed.
    DocumentChanged {
        /// Operation that changed them.
        op: Operation,
    },
    /// Undo/redo availability after the latest mutation.
    HistoryChanged {
        /// Whether [`crate::Engine::undo`] would do something.
        can_undo: bool,
        /// Whether [`crate::Engine::redo`] would do something.
        can_redo: bool,
    },
    /// Active composition, playhead, zoom, transport or selection changed.
    TimelineChanged,
}

/// Handle returned by [`crate::Engine::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Notification)>;

#[derive(Default)]
pub(crate) struct Subscribers {
    next: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .field("next", &self.next)
            .finish()
    }
}

impl Subscribers {
    pub(crate) fn add(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Call every subscriber in subscription order.
    pub(crate) fn emit(&mut self, notification: &Notification) {
        tracing::trace!(?notification, subscribers = self.entries.len(), "notify");
        for (_, callback) in &mut self.entries {
            callback(notification);
        }
    }
}
