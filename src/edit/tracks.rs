use crate::{
    engine::Engine,
    foundation::core::{CompositionId, TrackId, now_ms},
    foundation::error::{CompError, CompResult},
    history::entry::Operation,
    model::clip::Clip,
    model::composition::Composition,
    model::track::{Track, TrackKind, TrackPatch},
    store::registry::Registry,
};

impl Registry {
    /// Tracks of a composition ordered by `sort_order`. Empty for an unknown id.
    pub fn tracks_of(&self, composition_id: &CompositionId) -> Vec<&Track> {
        let Some(comp) = self.composition(composition_id) else {
            return Vec::new();
        };
        let mut tracks: Vec<&Track> = comp
            .track_ids
            .iter()
            .filter_map(|id| self.track(id))
            .collect();
        tracks.sort_by_key(|t| t.sort_order);
        tracks
    }

    /// Clips of a track in track order. Empty for an unknown id.
    pub fn clips_of_track(&self, track_id: &TrackId) -> Vec<&Clip> {
        self.track(track_id)
            .map(|t| t.clip_ids.iter().filter_map(|id| self.clip(id)).collect())
            .unwrap_or_default()
    }

    /// Clips of every track of a composition, lane by lane. Nested compositions are not
    /// descended into.
    pub fn clips_of_composition(&self, composition_id: &CompositionId) -> Vec<&Clip> {
        self.tracks_of(composition_id)
            .into_iter()
            .flat_map(|t| self.clips_of_track(&t.id))
            .collect()
    }

    /// Clips of a track intersecting `[from, to)`.
    pub fn clips_in_range(&self, track_id: &TrackId, from: f64, to: f64) -> Vec<&Clip> {
        self.clips_of_track(track_id)
            .into_iter()
            .filter(|c| c.overlaps(from, to))
            .collect()
    }
}

impl Engine {
    /// Add a track at the bottom of a composition.
    pub fn create_track(
        &mut self,
        composition_id: &CompositionId,
        name: &str,
        kind: TrackKind,
    ) -> CompResult<TrackId> {
        let label = format!("Create track '{name}'");
        self.transact(Operation::CreateTrack, label, |eng| {
            eng.insert_track(composition_id, name, kind)
        })
    }

    pub(crate) fn insert_track(
        &mut self,
        composition_id: &CompositionId,
        name: &str,
        kind: TrackKind,
    ) -> CompResult<TrackId> {
        let mut comp = self.require::<Composition>(composition_id)?.clone();
        let sort_order = self
            .registry
            .tracks_of(composition_id)
            .last()
            .map_or(0, |t| t.sort_order + 1);
        let height = match kind {
            TrackKind::Audio => self.opts.track_height_audio,
            _ => self.opts.track_height_video,
        };
        let track = Track::new(composition_id.clone(), name, kind, height, sort_order);
        let id = track.id.clone();

        comp.track_ids.push(id.clone());
        comp.updated_at = now_ms();
        self.set_subject::<Track>(&id);
        self.put(track);
        self.put(comp);
        Ok(id)
    }

    /// Apply a partial update to a track.
    pub fn update_track(&mut self, id: &TrackId, patch: &TrackPatch) -> CompResult<()> {
        self.transact(Operation::UpdateTrack, "Update track", |eng| {
            let before = eng.require::<Track>(id)?;
            let mut track = before.clone();
            patch.apply(&mut track);
            if &track == before {
                return Ok(());
            }
            if !(track.height.is_finite() && track.height > 0.0) {
                return Err(CompError::validation(format!(
                    "track height must be > 0, got {}",
                    track.height
                )));
            }
            eng.set_subject::<Track>(id);
            eng.put(track);
            Ok(())
        })
    }

    /// Delete a track and every clip on it.
    pub fn delete_track(&mut self, id: &TrackId) -> CompResult<()> {
        self.transact(Operation::DeleteTrack, "Delete track", |eng| {
            let owner = eng.require::<Track>(id)?.composition_id.clone();
            eng.set_subject::<Track>(id);
            if let Some(comp) = eng.registry.composition(&owner) {
                let mut comp = comp.clone();
                comp.track_ids.retain(|t| t != id);
                comp.updated_at = now_ms();
                eng.put(comp);
            }
            eng.purge_track(id);
            Ok(())
        })
    }

    /// Move a track to `new_index` among its siblings (clamped to the last slot) and
    /// renumber `sort_order` of the whole composition.
    pub fn reorder_track(&mut self, id: &TrackId, new_index: usize) -> CompResult<()> {
        self.transact(Operation::ReorderTrack, "Reorder track", |eng| {
            let owner = eng.require::<Track>(id)?.composition_id.clone();
            let mut order: Vec<TrackId> = eng
                .registry
                .tracks_of(&owner)
                .into_iter()
                .map(|t| t.id.clone())
                .collect();
            order.retain(|t| t != id);
            order.insert(new_index.min(order.len()), id.clone());
            eng.set_subject::<Track>(id);

            for (index, track_id) in order.iter().enumerate() {
                let Some(track) = eng.registry.track(track_id) else {
                    continue;
                };
                let index = index as u32;
                if track.sort_order != index {
                    let mut track = track.clone();
                    track.sort_order = index;
                    eng.put(track);
                }
            }
            if let Some(comp) = eng.registry.composition(&owner) {
                if comp.track_ids != order {
                    let mut comp = comp.clone();
                    comp.track_ids = order;
                    comp.updated_at = now_ms();
                    eng.put(comp);
                }
            }
            Ok(())
        })
    }

    /// See [`Registry::tracks_of`].
    pub fn tracks_of(&self, composition_id: &CompositionId) -> Vec<&Track> {
        self.registry.tracks_of(composition_id)
    }

    /// See [`Registry::clips_of_track`].
    pub fn clips_of_track(&self, track_id: &TrackId) -> Vec<&Clip> {
        self.registry.clips_of_track(track_id)
    }

    /// See [`Registry::clips_of_composition`].
    pub fn clips_of_composition(&self, composition_id: &CompositionId) -> Vec<&Clip> {
        self.registry.clips_of_composition(composition_id)
    }

    /// See [`Registry::clips_in_range`].
    pub fn clips_in_range(&self, track_id: &TrackId, from: f64, to: f64) -> Vec<&Clip> {
        self.registry.clips_in_range(track_id, from, to)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/tracks.rs"]
mod tests;
