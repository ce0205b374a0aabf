use std::collections::BTreeSet;

use crate::{
    engine::Engine,
    foundation::core::{CompositionId, EntityKind},
    foundation::error::{CompError, CompResult},
    model::clip::Clip,
    model::composition::Composition,
    model::track::Track,
};

/// Self-contained copy of a composition subtree: the composition, its tracks, the clips on
/// those tracks and, recursively, every nested composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExportedComposition {
    /// The composition's own fields.
    pub composition: Composition,
    /// Its tracks, in lane order.
    #[serde(default)]
    pub tracks: Vec<Track>,
    /// Clips on those tracks.
    #[serde(default)]
    pub clips: Vec<Clip>,
    /// Nested subtrees.
    #[serde(default)]
    pub nested: Vec<ExportedComposition>,
}

impl ExportedComposition {
    /// Compositions in the tree, this one included.
    pub fn composition_count(&self) -> usize {
        1 + self
            .nested
            .iter()
            .map(Self::composition_count)
            .sum::<usize>()
    }

    /// Tracks in the tree.
    pub fn track_count(&self) -> usize {
        self.tracks.len() + self.nested.iter().map(Self::track_count).sum::<usize>()
    }

    /// Clips in the tree.
    pub fn clip_count(&self) -> usize {
        self.clips.len() + self.nested.iter().map(Self::clip_count).sum::<usize>()
    }

    /// Deepest nesting level below this composition; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.nested
            .iter()
            .map(|n| n.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Pretty JSON.
    pub fn to_json(&self) -> CompResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse JSON produced by [`Self::to_json`].
    pub fn from_json(s: &str) -> CompResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl Engine {
    /// Export a composition subtree. `None` for an unknown id.
    #[tracing::instrument(skip(self))]
    pub fn export_composition(&self, id: &CompositionId) -> Option<ExportedComposition> {
        let mut seen = BTreeSet::new();
        self.export_tree(id, &mut seen)
    }

    fn export_tree(
        &self,
        id: &CompositionId,
        seen: &mut BTreeSet<CompositionId>,
    ) -> Option<ExportedComposition> {
        let comp = self.registry.composition(id)?;
        if !seen.insert(id.clone()) {
            tracing::warn!(composition = %id, "Composition reached twice while exporting");
            return None;
        }
        let tracks: Vec<Track> = self
            .registry
            .tracks_of(id)
            .into_iter()
            .cloned()
            .collect();
        let clips: Vec<Clip> = self
            .registry
            .clips_of_composition(id)
            .into_iter()
            .cloned()
            .collect();
        let nested = comp
            .nested_ids
            .iter()
            .filter_map(|child| self.export_tree(child, seen))
            .collect();
        Some(ExportedComposition {
            composition: comp.clone(),
            tracks,
            clips,
            nested,
        })
    }

    /// Export a composition subtree as pretty JSON.
    pub fn export_json(&self, id: &CompositionId) -> CompResult<String> {
        self.export_composition(id)
            .ok_or_else(|| CompError::not_found(EntityKind::Composition, id))?
            .to_json()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/serial/export.rs"]
mod tests;
