use crate::{
    engine::Engine,
    foundation::core::{AssetId, ClipId, TrackId},
    foundation::error::{CompError, CompResult},
    history::entry::Operation,
    model::clip::{Clip, ClipKind, ClipPatch, validate_timing},
    model::track::Track,
};

impl Engine {
    /// Place a new clip on a track at `[start_time, start_time + duration)`.
    pub fn add_clip(
        &mut self,
        track_id: &TrackId,
        name: &str,
        start_time: f64,
        duration: f64,
        kind: ClipKind,
        asset_id: Option<AssetId>,
    ) -> CompResult<ClipId> {
        let label = format!("Add clip '{name}'");
        self.transact(Operation::AddClip, label, |eng| {
            let owner = eng.require::<Track>(track_id)?.composition_id.clone();
            let mut clip = Clip::new(track_id.clone(), owner, name, start_time, duration, kind);
            clip.asset_id = asset_id;
            eng.attach_clip(clip, None)
        })
    }

    /// Store `clip` and list it on its track, right after `after` when given and present,
    /// otherwise at the end. The clip's composition is taken from the track.
    pub(crate) fn attach_clip(
        &mut self,
        mut clip: Clip,
        after: Option<&ClipId>,
    ) -> CompResult<ClipId> {
        validate_timing(clip.start_time, clip.end_time)?;
        let mut track = self.require::<Track>(&clip.track_id)?.clone();
        clip.composition_id = track.composition_id.clone();
        let id = clip.id.clone();

        let slot = after
            .and_then(|a| track.clip_ids.iter().position(|c| c == a))
            .map_or(track.clip_ids.len(), |i| i + 1);
        track.clip_ids.insert(slot, id.clone());

        self.set_subject::<Clip>(&id);
        self.put(clip);
        self.put(track);
        Ok(id)
    }

    /// Move a clip to `new_track_id` starting at `new_start`, keeping its duration.
    ///
    /// A missing destination track fails with [`CompError::InvalidTarget`] and leaves the
    /// clip on its source track.
    pub fn move_clip(
        &mut self,
        clip_id: &ClipId,
        new_track_id: &TrackId,
        new_start: f64,
    ) -> CompResult<()> {
        self.transact(Operation::MoveClip, "Move clip", |eng| {
            let mut clip = eng.require::<Clip>(clip_id)?.clone();
            let duration = clip.duration();
            validate_timing(new_start, new_start + duration)?;
            eng.set_subject::<Clip>(clip_id);

            let same_track = &clip.track_id == new_track_id;
            if !same_track {
                if let Some(source) = eng.registry.track(&clip.track_id) {
                    let mut source = source.clone();
                    source.clip_ids.retain(|c| c != clip_id);
                    eng.put(source);
                }
            }
            let Some(dest) = eng.registry.track(new_track_id) else {
                return Err(CompError::invalid_target(format!(
                    "destination track '{new_track_id}' does not exist"
                )));
            };
            let dest = dest.clone();

            clip.composition_id = dest.composition_id.clone();
            clip.track_id = new_track_id.clone();
            clip.start_time = new_start;
            clip.end_time = new_start + duration;
            if !same_track {
                let mut dest = dest;
                dest.clip_ids.push(clip_id.clone());
                eng.put(dest);
            }
            eng.put(clip);
            Ok(())
        })
    }

    /// Set new timeline bounds; the source out-point follows the new duration.
    pub fn resize_clip(
        &mut self,
        clip_id: &ClipId,
        new_start: f64,
        new_end: f64,
    ) -> CompResult<()> {
        self.transact(Operation::ResizeClip, "Resize clip", |eng| {
            validate_timing(new_start, new_end)?;
            let mut clip = eng.require::<Clip>(clip_id)?.clone();
            clip.start_time = new_start;
            clip.end_time = new_end;
            clip.trim_end = clip.trim_start + (new_end - new_start);
            eng.set_subject::<Clip>(clip_id);
            eng.put(clip);
            Ok(())
        })
    }

    /// Apply a partial update to a clip.
    pub fn update_clip(&mut self, clip_id: &ClipId, patch: &ClipPatch) -> CompResult<()> {
        self.transact(Operation::UpdateClip, "Update clip", |eng| {
            let mut clip = eng.require::<Clip>(clip_id)?.clone();
            patch.apply(&mut clip);
            validate_timing(clip.start_time, clip.end_time)?;
            eng.set_subject::<Clip>(clip_id);
            eng.put(clip);
            Ok(())
        })
    }

    /// Remove a clip from its track and the registry.
    pub fn delete_clip(&mut self, clip_id: &ClipId) -> CompResult<()> {
        self.transact(Operation::DeleteClip, "Delete clip", |eng| {
            eng.detach_clip(clip_id)
        })
    }

    pub(crate) fn detach_clip(&mut self, clip_id: &ClipId) -> CompResult<()> {
        let track_id = self.require::<Clip>(clip_id)?.track_id.clone();
        self.set_subject::<Clip>(clip_id);
        if let Some(track) = self.registry.track(&track_id) {
            let mut track = track.clone();
            track.clip_ids.retain(|c| c != clip_id);
            self.put(track);
        }
        self.delete::<Clip>(clip_id);
        Ok(())
    }

    /// Cut a clip in two at timeline time `at`. Returns the id of the right-hand part.
    ///
    /// The right part keeps the source offset, so it plays the same media it covered before
    /// the cut. Keyframes are copied to both parts and re-based on the right one.
    pub fn split_clip(&mut self, clip_id: &ClipId, at: f64) -> CompResult<ClipId> {
        self.transact(Operation::SplitClip, "Split clip", |eng| {
            let mut left = eng.require::<Clip>(clip_id)?.clone();
            if !left.contains(at) || at == left.start_time {
                return Err(CompError::validation(format!(
                    "split point {at} is outside ({}, {})",
                    left.start_time, left.end_time
                )));
            }
            let offset = at - left.start_time;

            let mut right = left.clone();
            right.id = ClipId::generate();
            right.start_time = at;
            right.trim_start = left.trim_start + offset;
            right.selected = false;
            for key in &mut right.keyframes {
                key.time -= offset;
            }

            left.end_time = at;
            left.trim_end = left.trim_start + offset;
            eng.set_subject::<Clip>(clip_id);
            eng.put(left);
            eng.attach_clip(right, Some(clip_id))
        })
    }

    /// Copy a clip and place the copy right after it on the same track.
    pub fn duplicate_clip(&mut self, clip_id: &ClipId) -> CompResult<ClipId> {
        self.transact(Operation::DuplicateClip, "Duplicate clip", |eng| {
            let source = eng.require::<Clip>(clip_id)?;
            let mut copy = source.clone();
            copy.id = ClipId::generate();
            copy.name = format!("{}{}", source.name, eng.opts.paste_suffix);
            copy.start_time = source.end_time;
            copy.end_time = source.end_time + source.duration();
            copy.selected = false;
            eng.attach_clip(copy, Some(clip_id))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/clips.rs"]
mod tests;
