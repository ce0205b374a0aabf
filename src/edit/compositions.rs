use crate::{
    engine::Engine,
    foundation::core::{CompositionId, TrackId, now_ms},
    foundation::error::CompResult,
    history::entry::Operation,
    model::clip::Clip,
    model::composition::{Composition, CompositionPatch, NewComposition},
    model::track::{Track, TrackKind},
};

impl Engine {
    /// Create a composition with one video and one audio track.
    ///
    /// The first parentless composition becomes root. With `request.parent` set, the new
    /// composition is nested under that parent in the same undo step.
    pub fn create_composition(&mut self, request: NewComposition) -> CompResult<CompositionId> {
        let label = format!("Create composition '{}'", request.name);
        self.transact(Operation::CreateComposition, label, move |eng| {
            if let Some(parent) = &request.parent {
                eng.require::<Composition>(parent)?;
            }
            let defaults = eng.opts.composition.clone();
            let now = now_ms();
            let comp = Composition {
                id: CompositionId::generate(),
                name: request.name,
                width: request.width.unwrap_or(defaults.width),
                height: request.height.unwrap_or(defaults.height),
                duration: request.duration.unwrap_or(defaults.duration),
                frame_rate: request.frame_rate.unwrap_or(defaults.frame_rate),
                track_ids: Vec::new(),
                parent_id: None,
                nested_ids: Vec::new(),
                current_time: 0.0,
                metadata: Default::default(),
                created_at: now,
                updated_at: now,
            };
            comp.validate()?;

            let id = comp.id.clone();
            eng.set_subject::<Composition>(&id);
            eng.put(comp);
            eng.insert_track(&id, &defaults.video_track_name, TrackKind::Video)?;
            eng.insert_track(&id, &defaults.audio_track_name, TrackKind::Audio)?;

            match &request.parent {
                Some(parent) => eng.link_nested(parent, &id)?,
                None if eng.registry.root.is_none() => eng.set_root(Some(id.clone())),
                None => {}
            }
            tracing::debug!(composition = %id, "Created composition");
            Ok(id)
        })
    }

    /// Apply a partial update and refresh `updated_at`.
    pub fn update_composition(
        &mut self,
        id: &CompositionId,
        patch: &CompositionPatch,
    ) -> CompResult<()> {
        self.transact(Operation::UpdateComposition, "Update composition", |eng| {
            let before = eng.require::<Composition>(id)?;
            let mut comp = before.clone();
            patch.apply(&mut comp);
            if &comp == before {
                return Ok(());
            }
            comp.validate()?;
            comp.updated_at = now_ms();
            eng.set_subject::<Composition>(id);
            eng.put(comp);
            Ok(())
        })
    }

    /// Delete a composition together with everything below it.
    ///
    /// Nested compositions go first (depth-first), then the owned tracks and their clips;
    /// finally the composition is unlinked from its parent and the root pointer is cleared
    /// if it pointed here.
    pub fn delete_composition(&mut self, id: &CompositionId) -> CompResult<()> {
        self.transact(Operation::DeleteComposition, "Delete composition", |eng| {
            eng.require::<Composition>(id)?;
            eng.set_subject::<Composition>(id);
            eng.remove_composition_tree(id);
            Ok(())
        })
    }

    #[tracing::instrument(skip(self))]
    fn remove_composition_tree(&mut self, id: &CompositionId) {
        let Some(comp) = self.registry.composition(id).cloned() else {
            tracing::warn!("Skipping dangling nested composition");
            return;
        };
        for child in &comp.nested_ids {
            self.remove_composition_tree(child);
        }
        for track in &comp.track_ids {
            self.purge_track(track);
        }
        if let Some(parent_id) = &comp.parent_id {
            if let Some(parent) = self.registry.composition(parent_id) {
                let mut parent = parent.clone();
                parent.nested_ids.retain(|n| n != id);
                parent.updated_at = now_ms();
                self.put(parent);
            }
        }
        if self.registry.is_root(id) {
            self.set_root(None);
        }
        self.delete::<Composition>(id);
    }

    /// Delete a track's clips and the track itself. The owner's `track_ids` is left to the
    /// caller.
    pub(crate) fn purge_track(&mut self, id: &TrackId) {
        let Some(track) = self.registry.track(id).cloned() else {
            return;
        };
        for clip in &track.clip_ids {
            self.delete::<Clip>(clip);
        }
        self.delete::<Track>(id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/compositions.rs"]
mod tests;
