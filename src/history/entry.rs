use std::collections::HashMap;

use crate::{
    foundation::core::{CompositionId, EntityKind},
    model::clip::Clip,
    model::composition::Composition,
    model::track::Track,
    store::registry::{Entity, Registry},
};

/// Kind of mutating operation that produced a history entry or notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Operation {
    /// `create_composition`.
    CreateComposition,
    /// `update_composition`.
    UpdateComposition,
    /// `delete_composition`.
    DeleteComposition,
    /// `create_track`.
    CreateTrack,
    /// `update_track`.
    UpdateTrack,
    /// `delete_track`.
    DeleteTrack,
    /// `reorder_track`.
    ReorderTrack,
    /// `add_clip`.
    AddClip,
    /// `move_clip`.
    MoveClip,
    /// `resize_clip`.
    ResizeClip,
    /// `update_clip`.
    UpdateClip,
    /// `delete_clip`.
    DeleteClip,
    /// `split_clip`.
    SplitClip,
    /// `duplicate_clip`.
    DuplicateClip,
    /// `add_nested_composition`.
    Nest,
    /// `remove_nested_composition`.
    Unnest,
    /// `paste_clips`.
    Paste,
    /// `cut_clips`.
    Cut,
    /// `import_composition`.
    Import,
    /// Composite entry closed by `end_batch`.
    Batch,
    /// Replay of an entry's previous values.
    Undo,
    /// Replay of an entry's new values.
    Redo,
}

/// Before/after values of one entity. `previous == None` is a creation, `new == None` a deletion.
#[derive(Clone, Debug, PartialEq)]
pub struct Change<T> {
    /// Entity id.
    pub id: String,
    /// Value before the operation.
    pub previous: Option<T>,
    /// Value after the operation.
    pub new: Option<T>,
}

/// One journaled write.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityChange {
    /// Composition write.
    Composition(Change<Composition>),
    /// Track write.
    Track(Change<Track>),
    /// Clip write.
    Clip(Change<Clip>),
    /// Root-pointer write.
    Root {
        /// Root before.
        previous: Option<CompositionId>,
        /// Root after.
        new: Option<CompositionId>,
    },
}

/// Kind and id of an entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// Entity kind.
    pub kind: EntityKind,
    /// Entity id.
    pub id: String,
}

impl EntityChange {
    /// Entity touched by this change; `None` for root-pointer writes.
    pub fn entity(&self) -> Option<EntityRef> {
        let (kind, id) = match self {
            Self::Composition(c) => (EntityKind::Composition, &c.id),
            Self::Track(c) => (EntityKind::Track, &c.id),
            Self::Clip(c) => (EntityKind::Clip, &c.id),
            Self::Root { .. } => return None,
        };
        Some(EntityRef {
            kind,
            id: id.clone(),
        })
    }

    /// `true` when this change created the entity.
    pub fn is_creation(&self) -> bool {
        match self {
            Self::Composition(c) => c.previous.is_none(),
            Self::Track(c) => c.previous.is_none(),
            Self::Clip(c) => c.previous.is_none(),
            Self::Root { .. } => false,
        }
    }

    /// `true` when this change deleted the entity.
    pub fn is_deletion(&self) -> bool {
        match self {
            Self::Composition(c) => c.new.is_none(),
            Self::Track(c) => c.new.is_none(),
            Self::Clip(c) => c.new.is_none(),
            Self::Root { .. } => false,
        }
    }

    fn key(&self) -> (Option<EntityKind>, String) {
        match self.entity() {
            Some(e) => (Some(e.kind), e.id),
            None => (None, String::new()),
        }
    }

    fn is_noop(&self) -> bool {
        match self {
            Self::Composition(c) => c.previous == c.new,
            Self::Track(c) => c.previous == c.new,
            Self::Clip(c) => c.previous == c.new,
            Self::Root { previous, new } => previous == new,
        }
    }

    /// Keep this change's `previous` and take `later`'s `new`.
    fn absorb(&mut self, later: Self) {
        match (self, later) {
            (Self::Composition(a), Self::Composition(b)) => a.new = b.new,
            (Self::Track(a), Self::Track(b)) => a.new = b.new,
            (Self::Clip(a), Self::Clip(b)) => a.new = b.new,
            (Self::Root { new, .. }, Self::Root { new: later_new, .. }) => *new = later_new,
            _ => {}
        }
    }

    pub(crate) fn write_previous(&self, registry: &mut Registry) {
        match self {
            Self::Composition(c) => write_side(registry, c, c.previous.as_ref()),
            Self::Track(c) => write_side(registry, c, c.previous.as_ref()),
            Self::Clip(c) => write_side(registry, c, c.previous.as_ref()),
            Self::Root { previous, .. } => registry.root = previous.clone(),
        }
    }

    pub(crate) fn write_new(&self, registry: &mut Registry) {
        match self {
            Self::Composition(c) => write_side(registry, c, c.new.as_ref()),
            Self::Track(c) => write_side(registry, c, c.new.as_ref()),
            Self::Clip(c) => write_side(registry, c, c.new.as_ref()),
            Self::Root { new, .. } => registry.root = new.clone(),
        }
    }
}

fn write_side<T: Entity>(registry: &mut Registry, change: &Change<T>, value: Option<&T>) {
    match value {
        Some(v) => registry.write(v.id(), Some(v)),
        None => {
            // The removed value is on the other side of the change and carries the typed id.
            if let Some(other) = change.previous.as_ref().or(change.new.as_ref()) {
                registry.write::<T>(other.id(), None);
            }
        }
    }
}

/// Merge repeated writes to the same entity (first `previous`, last `new`) and drop writes
/// that end where they started. First-touch order is preserved.
pub(crate) fn coalesce(changes: Vec<EntityChange>) -> Vec<EntityChange> {
    let mut out: Vec<EntityChange> = Vec::with_capacity(changes.len());
    let mut index: HashMap<(Option<EntityKind>, String), usize> = HashMap::new();
    for change in changes {
        let key = change.key();
        match index.get(&key) {
            Some(&i) => out[i].absorb(change),
            None => {
                index.insert(key, out.len());
                out.push(change);
            }
        }
    }
    out.retain(|c| !c.is_noop());
    out
}

/// An immutable record of one undoable step.
///
/// A step may touch several entities (a clip and the track listing it, a whole deleted
/// subtree, every clip of a paste); all of them are reverted and replayed together.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    /// Operation that produced the entry.
    pub op: Operation,
    /// Human-readable label, e.g. `"Move clip 'Intro'"`.
    pub label: String,
    /// Entity the operation was about.
    pub subject: Option<EntityRef>,
    /// Every write of the step, first-touch order.
    pub changes: Vec<EntityChange>,
    /// Record time, ms since the Unix epoch.
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Kind of the entity the operation was about.
    pub fn entity_kind(&self) -> Option<EntityKind> {
        self.subject.as_ref().map(|s| s.kind)
    }

    /// Id of the entity the operation was about.
    pub fn entity_id(&self) -> Option<&str> {
        self.subject.as_ref().map(|s| s.id.as_str())
    }

    /// Write every `previous` value back (undo).
    ///
    /// The playhead position (`current_time`) of a composition that is still live is kept.
    pub(crate) fn revert(&self, registry: &mut Registry) {
        let cursors = self.live_cursors(registry);
        for change in self.changes.iter().rev() {
            change.write_previous(registry);
        }
        restore_cursors(registry, cursors);
    }

    /// Write every `new` value again (redo). Live `current_time` values are kept as in
    /// [`Self::revert`].
    pub(crate) fn replay(&self, registry: &mut Registry) {
        let cursors = self.live_cursors(registry);
        for change in &self.changes {
            change.write_new(registry);
        }
        restore_cursors(registry, cursors);
    }

    fn live_cursors(&self, registry: &Registry) -> Vec<(CompositionId, f64)> {
        self.changes
            .iter()
            .filter_map(|change| match change {
                EntityChange::Composition(c) => {
                    let id = &c.previous.as_ref().or(c.new.as_ref())?.id;
                    let live = registry.composition(id)?;
                    Some((id.clone(), live.current_time))
                }
                _ => None,
            })
            .collect()
    }
}

fn restore_cursors(registry: &mut Registry, cursors: Vec<(CompositionId, f64)>) {
    for (id, time) in cursors {
        if let Some(comp) = registry.compositions.get_mut(&id) {
            comp.current_time = time;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/entry.rs"]
mod tests;
