//! Composition, track and clip selection.

use crate::{
    foundation::core::{ClipId, CompositionId, TrackId},
    model::clip::Clip,
    model::composition::Composition,
    model::track::Track,
    store::registry::Registry,
};

/// Three independent selection lists plus the multi-select flag.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SelectionState {
    compositions: Vec<CompositionId>,
    tracks: Vec<TrackId>,
    clips: Vec<ClipId>,
    /// Whether the last selection extended the previous one (Shift/Ctrl held).
    multi_select: bool,
}

fn select_in<T: PartialEq + Clone>(list: &mut Vec<T>, id: &T, multi: bool) {
    if !multi {
        list.clear();
    }
    if !list.contains(id) {
        list.push(id.clone());
    }
}

fn toggle_in<T: PartialEq + Clone>(list: &mut Vec<T>, id: &T) -> bool {
    if let Some(pos) = list.iter().position(|x| x == id) {
        list.remove(pos);
        false
    } else {
        list.push(id.clone());
        true
    }
}

impl SelectionState {
    /// Select a composition. Without `multi` the previous composition selection is replaced.
    pub fn select_composition(&mut self, id: &CompositionId, multi: bool) {
        select_in(&mut self.compositions, id, multi);
        self.multi_select = multi;
    }

    /// Select a track. Without `multi` the previous track selection is replaced.
    pub fn select_track(&mut self, id: &TrackId, multi: bool) {
        select_in(&mut self.tracks, id, multi);
        self.multi_select = multi;
    }

    /// Select a clip. Without `multi` the previous clip selection is replaced.
    pub fn select_clip(&mut self, id: &ClipId, multi: bool) {
        select_in(&mut self.clips, id, multi);
        self.multi_select = multi;
    }

    /// Flip a clip's selection; returns whether it is now selected.
    pub fn toggle_clip(&mut self, id: &ClipId) -> bool {
        self.multi_select = true;
        toggle_in(&mut self.clips, id)
    }

    /// Deselect one composition.
    pub fn deselect_composition(&mut self, id: &CompositionId) {
        self.compositions.retain(|x| x != id);
    }

    /// Deselect one track.
    pub fn deselect_track(&mut self, id: &TrackId) {
        self.tracks.retain(|x| x != id);
    }

    /// Deselect one clip.
    pub fn deselect_clip(&mut self, id: &ClipId) {
        self.clips.retain(|x| x != id);
    }

    /// Replace the clip selection.
    pub fn set_clips(&mut self, ids: Vec<ClipId>) {
        self.multi_select = ids.len() > 1;
        self.clips = ids;
    }

    /// Clear all three lists.
    pub fn clear(&mut self) {
        self.compositions.clear();
        self.tracks.clear();
        self.clips.clear();
        self.multi_select = false;
    }

    /// Selected compositions, in selection order.
    pub fn compositions(&self) -> &[CompositionId] {
        &self.compositions
    }

    /// Selected tracks, in selection order.
    pub fn tracks(&self) -> &[TrackId] {
        &self.tracks
    }

    /// Selected clips, in selection order.
    pub fn clips(&self) -> &[ClipId] {
        &self.clips
    }

    /// Check if a clip is selected.
    pub fn is_clip_selected(&self, id: &ClipId) -> bool {
        self.clips.contains(id)
    }

    /// Check if a track is selected.
    pub fn is_track_selected(&self, id: &TrackId) -> bool {
        self.tracks.contains(id)
    }

    /// Check if a composition is selected.
    pub fn is_composition_selected(&self, id: &CompositionId) -> bool {
        self.compositions.contains(id)
    }

    /// Whether multi-select mode is active.
    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.compositions.is_empty() && self.tracks.is_empty() && self.clips.is_empty()
    }

    /// Drop ids that no longer resolve. Returns `true` if anything was removed.
    pub(crate) fn prune(&mut self, registry: &Registry) -> bool {
        let before = self.compositions.len() + self.tracks.len() + self.clips.len();
        self.compositions
            .retain(|id| registry.contains::<Composition>(id));
        self.tracks.retain(|id| registry.contains::<Track>(id));
        self.clips.retain(|id| registry.contains::<Clip>(id));
        before != self.compositions.len() + self.tracks.len() + self.clips.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/selection.rs"]
mod tests;
