use crate::{
    engine::Engine,
    engine::notify::Notification,
    foundation::core::{ClipId, CompositionId, TrackId},
    foundation::error::CompResult,
    model::clip::Clip,
    model::composition::Composition,
    model::track::Track,
};

impl Engine {
    fn timeline_changed(&mut self) {
        self.notify(Notification::TimelineChanged);
    }

    /// Open a composition in the timeline, or close it with `None`.
    ///
    /// The playhead is seeded from the composition's stored `current_time` and playback
    /// stops.
    pub fn set_active_composition(&mut self, id: Option<&CompositionId>) -> CompResult<()> {
        let playhead = match id {
            Some(id) => self.require::<Composition>(id)?.current_time,
            None => 0.0,
        };
        self.timeline.active_composition = id.cloned();
        self.timeline.playhead = playhead;
        self.timeline.is_playing = false;
        self.timeline_changed();
        Ok(())
    }

    /// Move the playhead. Negative and NaN times clamp to 0.
    ///
    /// The position is also stored on the active composition's `current_time`; that write is
    /// not an undo step.
    pub fn set_playhead(&mut self, time: f64) -> f64 {
        let time = if time.is_nan() { 0.0 } else { time.max(0.0) };
        self.timeline.playhead = time;
        if let Some(active) = &self.timeline.active_composition {
            if let Some(comp) = self.registry.compositions.get_mut(active) {
                comp.current_time = time;
            }
        }
        self.timeline_changed();
        time
    }

    /// Set the zoom factor, clamped to the configured range. Returns the applied value.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        let zoom = self.opts.clamp_zoom(zoom);
        self.timeline.zoom = zoom;
        self.timeline_changed();
        zoom
    }

    /// Double the zoom factor.
    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.timeline.zoom * 2.0)
    }

    /// Halve the zoom factor.
    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.timeline.zoom / 2.0)
    }

    /// Start playback.
    pub fn play(&mut self) {
        self.timeline.is_playing = true;
        self.timeline_changed();
    }

    /// Stop playback.
    pub fn pause(&mut self) {
        self.timeline.is_playing = false;
        self.timeline_changed();
    }

    /// Flip playback; returns the new state.
    pub fn toggle_playback(&mut self) -> bool {
        self.timeline.is_playing = !self.timeline.is_playing;
        self.timeline_changed();
        self.timeline.is_playing
    }

    /// Select a composition, extending the selection when `multi` is set.
    pub fn select_composition(&mut self, id: &CompositionId, multi: bool) -> CompResult<()> {
        self.require::<Composition>(id)?;
        self.timeline.selection.select_composition(id, multi);
        self.timeline_changed();
        Ok(())
    }

    /// Select a track, extending the selection when `multi` is set.
    pub fn select_track(&mut self, id: &TrackId, multi: bool) -> CompResult<()> {
        self.require::<Track>(id)?;
        self.timeline.selection.select_track(id, multi);
        self.timeline_changed();
        Ok(())
    }

    /// Select a clip, extending the selection when `multi` is set.
    pub fn select_clip(&mut self, id: &ClipId, multi: bool) -> CompResult<()> {
        self.require::<Clip>(id)?;
        self.timeline.selection.select_clip(id, multi);
        self.timeline_changed();
        Ok(())
    }

    /// Flip a clip's selection; returns whether it is now selected.
    pub fn toggle_clip_selection(&mut self, id: &ClipId) -> CompResult<bool> {
        self.require::<Clip>(id)?;
        let selected = self.timeline.selection.toggle_clip(id);
        self.timeline_changed();
        Ok(selected)
    }

    /// Deselect one composition.
    pub fn deselect_composition(&mut self, id: &CompositionId) {
        self.timeline.selection.deselect_composition(id);
        self.timeline_changed();
    }

    /// Deselect one track.
    pub fn deselect_track(&mut self, id: &TrackId) {
        self.timeline.selection.deselect_track(id);
        self.timeline_changed();
    }

    /// Deselect one clip.
    pub fn deselect_clip(&mut self, id: &ClipId) {
        self.timeline.selection.deselect_clip(id);
        self.timeline_changed();
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.timeline.selection.clear();
        self.timeline_changed();
    }

    /// Replace the clip selection with every clip of a track. Returns how many were selected.
    pub fn select_all_clips_in_track(&mut self, track_id: &TrackId) -> CompResult<usize> {
        let ids: Vec<ClipId> = self
            .require::<Track>(track_id)?
            .clip_ids
            .iter()
            .filter(|id| self.registry.clip(id).is_some())
            .cloned()
            .collect();
        let count = ids.len();
        self.timeline.selection.set_clips(ids);
        self.timeline_changed();
        Ok(count)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/controls.rs"]
mod tests;
