use crate::foundation::core::{ClipId, CompositionId, TrackId};

/// Lane kind.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum TrackKind {
    /// Picture lane.
    #[default]
    Video,
    /// Sound lane.
    Audio,
    /// Titles and captions.
    Text,
    /// Adjustment/effect lane.
    Effect,
}

/// An ordered lane of clips inside exactly one composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    /// Identity.
    pub id: TrackId,
    /// Display name.
    pub name: String,
    /// Owning composition.
    pub composition_id: CompositionId,
    /// Clips on this lane, in insertion order.
    #[serde(default)]
    pub clip_ids: Vec<ClipId>,
    /// Lane kind.
    #[serde(default)]
    pub kind: TrackKind,
    /// Shown in the viewer.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Edits to clips on this lane are expected to be blocked by the UI.
    #[serde(default)]
    pub locked: bool,
    /// Lane height in pixels.
    #[serde(default = "default_height")]
    pub height: f64,
    /// Position among sibling tracks.
    #[serde(default)]
    pub sort_order: u32,
    /// Linear gain.
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Audio mute.
    #[serde(default)]
    pub muted: bool,
}

fn default_true() -> bool {
    true
}

fn default_height() -> f64 {
    60.0
}

fn default_volume() -> f64 {
    1.0
}

impl Track {
    pub(crate) fn new(
        composition_id: CompositionId,
        name: &str,
        kind: TrackKind,
        height: f64,
        sort_order: u32,
    ) -> Self {
        Self {
            id: TrackId::generate(),
            name: name.to_string(),
            composition_id,
            clip_ids: Vec::new(),
            kind,
            visible: true,
            locked: false,
            height,
            sort_order,
            volume: 1.0,
            muted: false,
        }
    }
}

/// Partial update of a [`Track`]. Ownership and clip membership are not patchable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackPatch {
    /// New display name.
    pub name: Option<String>,
    /// New lane kind.
    pub kind: Option<TrackKind>,
    /// New visibility.
    pub visible: Option<bool>,
    /// New lock state.
    pub locked: Option<bool>,
    /// New lane height.
    pub height: Option<f64>,
    /// New gain.
    pub volume: Option<f64>,
    /// New mute state.
    pub muted: Option<bool>,
}

impl TrackPatch {
    pub(crate) fn apply(&self, track: &mut Track) {
        if let Some(name) = &self.name {
            track.name = name.clone();
        }
        if let Some(kind) = self.kind {
            track.kind = kind;
        }
        if let Some(visible) = self.visible {
            track.visible = visible;
        }
        if let Some(locked) = self.locked {
            track.locked = locked;
        }
        if let Some(height) = self.height {
            track.height = height;
        }
        if let Some(volume) = self.volume {
            track.volume = volume;
        }
        if let Some(muted) = self.muted {
            track.muted = muted;
        }
    }
}
