use crate::{
    engine::Engine,
    foundation::core::{ClipId, TrackId, now_ms},
    foundation::error::CompResult,
    history::entry::Operation,
    model::clip::Clip,
    model::track::Track,
};

/// One copied clip.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipboardItem {
    /// Clip the snapshot was taken from.
    pub source_id: ClipId,
    /// Owned snapshot; later edits to the source do not reach it.
    pub clip: Clip,
    /// Copy time, ms since the Unix epoch.
    pub copied_at: u64,
}

/// Clip snapshots waiting to be pasted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Clipboard {
    items: Vec<ClipboardItem>,
}

impl Clipboard {
    /// Whether anything can be pasted.
    pub fn has_content(&self) -> bool {
        !self.items.is_empty()
    }

    /// Copied clips, in copy order.
    pub fn items(&self) -> &[ClipboardItem] {
        &self.items
    }

    /// Number of copied clips.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Same as `!has_content()`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Engine {
    /// Replace the clipboard with one clip.
    pub fn copy_clip(&mut self, id: &ClipId) -> CompResult<()> {
        let clip = self.require::<Clip>(id)?.clone();
        self.clipboard.items = vec![ClipboardItem {
            source_id: id.clone(),
            clip,
            copied_at: now_ms(),
        }];
        Ok(())
    }

    /// Replace the clipboard with the clips found among `ids`; unknown ids are skipped.
    ///
    /// Returns how many clips were copied. When none were, the clipboard keeps its content.
    pub fn copy_clips(&mut self, ids: &[ClipId]) -> usize {
        let now = now_ms();
        let items: Vec<ClipboardItem> = ids
            .iter()
            .filter_map(|id| {
                self.registry.clip(id).map(|clip| ClipboardItem {
                    source_id: id.clone(),
                    clip: clip.clone(),
                    copied_at: now,
                })
            })
            .collect();
        if items.len() < ids.len() {
            tracing::debug!(
                requested = ids.len(),
                copied = items.len(),
                "Skipped unknown clips on copy"
            );
        }
        let copied = items.len();
        if copied > 0 {
            self.clipboard.items = items;
        }
        copied
    }

    /// Copy the selected clips.
    pub fn copy_selection(&mut self) -> usize {
        let ids = self.timeline.selection.clips().to_vec();
        self.copy_clips(&ids)
    }

    /// Insert every clipboard clip on `track_id` at `insert_time`.
    ///
    /// Each pasted clip gets a fresh id and the configured name suffix and keeps the snapshot's
    /// duration, kind, asset, trims, properties, effects and keyframes. The whole paste is
    /// one undo step. An empty clipboard pastes nothing.
    pub fn paste_clips(
        &mut self,
        track_id: &TrackId,
        insert_time: f64,
    ) -> CompResult<Vec<ClipId>> {
        let items = self.clipboard.items.clone();
        let label = format!("Paste {} clip(s)", items.len());
        self.transact(Operation::Paste, label, |eng| {
            eng.require::<Track>(track_id)?;
            let mut pasted = Vec::with_capacity(items.len());
            for item in items {
                let mut clip = item.clip;
                let duration = clip.duration();
                clip.id = ClipId::generate();
                clip.name = format!("{}{}", clip.name, eng.opts.paste_suffix);
                clip.track_id = track_id.clone();
                clip.start_time = insert_time;
                clip.end_time = insert_time + duration;
                clip.selected = false;
                pasted.push(eng.attach_clip(clip, None)?);
            }
            Ok(pasted)
        })
    }

    /// Copy the clips found among `ids` and delete them, as one undo step.
    ///
    /// Returns how many clips were cut.
    pub fn cut_clips(&mut self, ids: &[ClipId]) -> CompResult<usize> {
        let copied = self.copy_clips(ids);
        if copied == 0 {
            return Ok(0);
        }
        let sources: Vec<ClipId> = self
            .clipboard
            .items
            .iter()
            .map(|item| item.source_id.clone())
            .collect();
        self.transact(Operation::Cut, format!("Cut {copied} clip(s)"), |eng| {
            for id in &sources {
                if eng.registry.clip(id).is_some() {
                    eng.detach_clip(id)?;
                }
            }
            Ok(copied)
        })
    }

    /// Empty the clipboard.
    pub fn clear_clipboard(&mut self) {
        self.clipboard.items.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/clipboard.rs"]
mod tests;
