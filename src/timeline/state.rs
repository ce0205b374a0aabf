use crate::{
    foundation::core::CompositionId, store::registry::Registry,
    timeline::selection::SelectionState,
};

/// Cursor state of the editor: which composition is open, where the playhead is, zoom,
/// transport and selection.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineState {
    pub(crate) active_composition: Option<CompositionId>,
    pub(crate) playhead: f64,
    pub(crate) zoom: f64,
    pub(crate) is_playing: bool,
    pub(crate) selection: SelectionState,
}

impl TimelineState {
    pub(crate) fn new(zoom: f64) -> Self {
        Self {
            active_composition: None,
            playhead: 0.0,
            zoom,
            is_playing: false,
            selection: SelectionState::default(),
        }
    }

    /// Composition shown in the timeline.
    pub fn active_composition(&self) -> Option<&CompositionId> {
        self.active_composition.as_ref()
    }

    /// Playhead in milliseconds, local to the active composition.
    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    /// Horizontal zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Transport state.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Drop references to entities that no longer exist.
    pub(crate) fn prune(&mut self, registry: &Registry) {
        if let Some(active) = &self.active_composition {
            if registry.composition(active).is_none() {
                tracing::debug!(composition = %active, "Active composition is gone");
                self.active_composition = None;
                self.playhead = 0.0;
                self.is_playing = false;
            }
        }
        self.selection.prune(registry);
    }
}
