use std::collections::BTreeMap;

use crate::{
    foundation::core::{ClipId, CompositionId, EntityKind, TrackId},
    history::entry::{Change, EntityChange},
    model::clip::Clip,
    model::composition::Composition,
    model::track::Track,
};

/// Canonical entity state: one id-keyed table per entity kind plus the root pointer.
///
/// The registry itself enforces no cross-reference invariant; every write goes through the
/// [`crate::Engine`], which keeps the tables consistent and journals each change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    pub(crate) compositions: BTreeMap<CompositionId, Composition>,
    pub(crate) tracks: BTreeMap<TrackId, Track>,
    pub(crate) clips: BTreeMap<ClipId, Clip>,
    pub(crate) root: Option<CompositionId>,
}

/// Access to the table an entity type lives in.
pub(crate) trait Entity: Clone + PartialEq + std::fmt::Debug {
    type Id: Clone + Ord + std::fmt::Display + std::fmt::Debug;

    const KIND: EntityKind;

    fn id(&self) -> &Self::Id;
    fn table(registry: &Registry) -> &BTreeMap<Self::Id, Self>;
    fn table_mut(registry: &mut Registry) -> &mut BTreeMap<Self::Id, Self>;
    fn wrap(change: Change<Self>) -> EntityChange;
}

impl Entity for Composition {
    type Id = CompositionId;

    const KIND: EntityKind = EntityKind::Composition;

    fn id(&self) -> &CompositionId {
        &self.id
    }

    fn table(registry: &Registry) -> &BTreeMap<CompositionId, Self> {
        &registry.compositions
    }

    fn table_mut(registry: &mut Registry) -> &mut BTreeMap<CompositionId, Self> {
        &mut registry.compositions
    }

    fn wrap(change: Change<Self>) -> EntityChange {
        EntityChange::Composition(change)
    }
}

impl Entity for Track {
    type Id = TrackId;

    const KIND: EntityKind = EntityKind::Track;

    fn id(&self) -> &TrackId {
        &self.id
    }

    fn table(registry: &Registry) -> &BTreeMap<TrackId, Self> {
        &registry.tracks
    }

    fn table_mut(registry: &mut Registry) -> &mut BTreeMap<TrackId, Self> {
        &mut registry.tracks
    }

    fn wrap(change: Change<Self>) -> EntityChange {
        EntityChange::Track(change)
    }
}

impl Entity for Clip {
    type Id = ClipId;

    const KIND: EntityKind = EntityKind::Clip;

    fn id(&self) -> &ClipId {
        &self.id
    }

    fn table(registry: &Registry) -> &BTreeMap<ClipId, Self> {
        &registry.clips
    }

    fn table_mut(registry: &mut Registry) -> &mut BTreeMap<ClipId, Self> {
        &mut registry.clips
    }

    fn wrap(change: Change<Self>) -> EntityChange {
        EntityChange::Clip(change)
    }
}

impl Registry {
    /// Look up a composition.
    pub fn composition(&self, id: &CompositionId) -> Option<&Composition> {
        self.compositions.get(id)
    }

    /// Look up a track.
    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.get(id)
    }

    /// Look up a clip.
    pub fn clip(&self, id: &ClipId) -> Option<&Clip> {
        self.clips.get(id)
    }

    /// All compositions, ordered by id.
    pub fn compositions(&self) -> impl Iterator<Item = &Composition> {
        self.compositions.values()
    }

    /// All tracks, ordered by id.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// All clips, ordered by id.
    pub fn clips(&self) -> impl Iterator<Item = &Clip> {
        self.clips.values()
    }

    /// The root composition id, if one is marked.
    pub fn root_id(&self) -> Option<&CompositionId> {
        self.root.as_ref()
    }

    /// Whether `id` is the root composition.
    pub fn is_root(&self, id: &CompositionId) -> bool {
        self.root.as_ref() == Some(id)
    }

    /// Number of compositions.
    pub fn composition_count(&self) -> usize {
        self.compositions.len()
    }

    /// Number of tracks.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Number of clips.
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    /// `true` when no entity is stored.
    pub fn is_empty(&self) -> bool {
        self.compositions.is_empty() && self.tracks.is_empty() && self.clips.is_empty()
    }

    pub(crate) fn get<T: Entity>(&self, id: &T::Id) -> Option<&T> {
        T::table(self).get(id)
    }

    pub(crate) fn contains<T: Entity>(&self, id: &T::Id) -> bool {
        T::table(self).contains_key(id)
    }

    /// Store `value`, returning what it replaced.
    pub(crate) fn insert<T: Entity>(&mut self, value: T) -> Option<T> {
        T::table_mut(self).insert(value.id().clone(), value)
    }

    pub(crate) fn remove<T: Entity>(&mut self, id: &T::Id) -> Option<T> {
        T::table_mut(self).remove(id)
    }

    /// Write `value` for `id`: store it when `Some`, delete the entity when `None`.
    pub(crate) fn write<T: Entity>(&mut self, id: &T::Id, value: Option<&T>) {
        match value {
            Some(v) => {
                self.insert(v.clone());
            }
            None => {
                self.remove::<T>(id);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/registry.rs"]
mod tests;
