use std::collections::{BTreeMap, BTreeSet};

use crate::{
    engine::Engine,
    foundation::core::{ClipId, CompositionId, TrackId, now_ms},
    foundation::error::{CompError, CompResult},
    history::entry::Operation,
    model::clip::validate_timing,
    model::composition::Composition,
    serial::export::ExportedComposition,
};

#[derive(Default)]
struct SeenIds<'a> {
    compositions: BTreeSet<&'a str>,
    tracks: BTreeSet<&'a str>,
    clips: BTreeSet<&'a str>,
}

/// Check a whole tree before anything is written.
fn validate_tree<'a>(data: &'a ExportedComposition, seen: &mut SeenIds<'a>) -> CompResult<()> {
    let comp = &data.composition;
    if !seen.compositions.insert(comp.id.as_str()) {
        return Err(CompError::import(format!(
            "composition '{}' appears twice",
            comp.id
        )));
    }
    comp.validate()
        .map_err(|err| CompError::import(err.to_string()))?;

    let mut own_tracks = BTreeSet::new();
    for track in &data.tracks {
        if track.composition_id != comp.id {
            return Err(CompError::import(format!(
                "track '{}' belongs to '{}', not to exported composition '{}'",
                track.id, track.composition_id, comp.id
            )));
        }
        if !seen.tracks.insert(track.id.as_str()) {
            return Err(CompError::import(format!("track '{}' appears twice", track.id)));
        }
        own_tracks.insert(&track.id);
    }
    for clip in &data.clips {
        if !own_tracks.contains(&clip.track_id) {
            return Err(CompError::import(format!(
                "clip '{}' sits on track '{}' which is not part of '{}'",
                clip.id, clip.track_id, comp.id
            )));
        }
        if !seen.clips.insert(clip.id.as_str()) {
            return Err(CompError::import(format!("clip '{}' appears twice", clip.id)));
        }
        validate_timing(clip.start_time, clip.end_time)
            .map_err(|err| CompError::import(format!("clip '{}': {err}", clip.id)))?;
    }
    for child in &data.nested {
        validate_tree(child, seen)?;
    }
    Ok(())
}

impl Engine {
    /// Import an exported tree with fresh ids for every composition, track and clip.
    ///
    /// The new composition is nested under `parent` when given, otherwise it becomes root if
    /// no root exists. The whole import is one undo step. Malformed input is logged and
    /// yields `None` with the registries untouched.
    pub fn import_composition(
        &mut self,
        data: &ExportedComposition,
        parent: Option<&CompositionId>,
    ) -> Option<CompositionId> {
        match self.try_import_composition(data, parent) {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(%err, "Import failed");
                None
            }
        }
    }

    /// Like [`Self::import_composition`], but reports why an import was rejected.
    #[tracing::instrument(skip(self, data), fields(source = %data.composition.id))]
    pub fn try_import_composition(
        &mut self,
        data: &ExportedComposition,
        parent: Option<&CompositionId>,
    ) -> CompResult<CompositionId> {
        validate_tree(data, &mut SeenIds::default())?;
        if let Some(parent) = parent {
            self.require::<Composition>(parent)
                .map_err(|err| CompError::import(err.to_string()))?;
        }

        let label = format!("Import '{}'", data.composition.name);
        self.transact(Operation::Import, label, |eng| {
            let id = eng.import_tree(data, None)?;
            eng.set_subject::<Composition>(&id);
            match parent {
                Some(parent) => eng.link_nested(parent, &id)?,
                None if eng.registry.root.is_none() => eng.set_root(Some(id.clone())),
                None => {}
            }
            tracing::debug!(
                composition = %id,
                compositions = data.composition_count(),
                tracks = data.track_count(),
                clips = data.clip_count(),
                "Imported composition tree"
            );
            Ok(id)
        })
    }

    fn import_tree(
        &mut self,
        data: &ExportedComposition,
        parent: Option<&CompositionId>,
    ) -> CompResult<CompositionId> {
        let comp_id = CompositionId::generate();
        let track_map: BTreeMap<&TrackId, TrackId> = data
            .tracks
            .iter()
            .map(|t| (&t.id, TrackId::generate()))
            .collect();
        let clip_map: BTreeMap<&ClipId, ClipId> = data
            .clips
            .iter()
            .map(|c| (&c.id, ClipId::generate()))
            .collect();

        let mut nested_ids = Vec::with_capacity(data.nested.len());
        for child in &data.nested {
            nested_ids.push(self.import_tree(child, Some(&comp_id))?);
        }

        for track in &data.tracks {
            let mut new_track = track.clone();
            new_track.id = track_map[&track.id].clone();
            new_track.composition_id = comp_id.clone();
            // Listed order first, then clips the list missed.
            let listed = track
                .clip_ids
                .iter()
                .filter(|id| data.clips.iter().any(|c| &c.id == *id && c.track_id == track.id));
            let unlisted = data
                .clips
                .iter()
                .filter(|c| c.track_id == track.id && !track.clip_ids.contains(&c.id))
                .map(|c| &c.id);
            let mut clip_ids: Vec<ClipId> = Vec::new();
            for old in listed.chain(unlisted) {
                let new = clip_map[old].clone();
                if !clip_ids.contains(&new) {
                    clip_ids.push(new);
                }
            }
            new_track.clip_ids = clip_ids;
            self.put(new_track);
        }

        for clip in &data.clips {
            let mut new_clip = clip.clone();
            new_clip.id = clip_map[&clip.id].clone();
            new_clip.track_id = track_map[&clip.track_id].clone();
            new_clip.composition_id = comp_id.clone();
            new_clip.selected = false;
            self.put(new_clip);
        }

        let now = now_ms();
        let mut comp = data.composition.clone();
        comp.id = comp_id.clone();
        comp.parent_id = parent.cloned();
        comp.nested_ids = nested_ids;
        let listed = data
            .composition
            .track_ids
            .iter()
            .filter_map(|t| track_map.get(t).cloned());
        let mut track_ids: Vec<TrackId> = Vec::new();
        for id in listed.chain(data.tracks.iter().map(|t| track_map[&t.id].clone())) {
            if !track_ids.contains(&id) {
                track_ids.push(id);
            }
        }
        comp.track_ids = track_ids;
        comp.created_at = now;
        comp.updated_at = now;
        self.put(comp);
        Ok(comp_id)
    }

    /// Parse and import an exported tree. See [`Self::import_composition`].
    pub fn import_json(
        &mut self,
        json: &str,
        parent: Option<&CompositionId>,
    ) -> Option<CompositionId> {
        match ExportedComposition::from_json(json) {
            Ok(data) => self.import_composition(&data, parent),
            Err(err) => {
                tracing::warn!(%err, "Import failed: unreadable JSON");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/serial/import.rs"]
mod tests;
