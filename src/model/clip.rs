use crate::{
    foundation::core::{AssetId, ClipId, CompositionId, TrackId, Vec2},
    foundation::error::{CompError, CompResult},
    model::keyframe::{Keyframe, sample_keyframes},
};

/// What a clip places on the timeline.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ClipKind {
    /// Video file.
    #[default]
    Video,
    /// Audio file.
    Audio,
    /// Still image.
    Image,
    /// Text/title.
    Text,
    /// Vector shape.
    Shape,
    /// Reference to a nested composition.
    Composition,
}

/// Picture properties.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualProps {
    /// `[0, 1]`.
    pub opacity: f64,
    /// Per-axis scale factor.
    pub scale: Vec2,
    /// Degrees, clockwise.
    pub rotation: f64,
    /// Offset from frame center in pixels.
    pub position: Vec2,
}

impl Default for VisualProps {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            position: Vec2::ZERO,
        }
    }
}

/// Sound properties.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioProps {
    /// Linear gain.
    pub volume: f64,
    /// `-1` (left) to `1` (right).
    pub pan: f64,
    /// Fade-in length in ms.
    pub fade_in: f64,
    /// Fade-out length in ms.
    pub fade_out: f64,
}

impl Default for AudioProps {
    fn default() -> Self {
        Self {
            volume: 1.0,
            pan: 0.0,
            fade_in: 0.0,
            fade_out: 0.0,
        }
    }
}

/// Effect applied to a clip; `kind` names an effect known to the host.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectRef {
    /// Effect instance identity (stable within the clip).
    pub id: String,
    /// Effect kind, e.g. `"blur"`.
    pub kind: String,
    /// Bypass flag.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Raw effect parameters.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

fn default_enabled() -> bool {
    true
}

/// A timed placement of a media/edit unit on a track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    /// Identity.
    pub id: ClipId,
    /// Display name.
    pub name: String,
    /// Owning track.
    pub track_id: TrackId,
    /// Composition of `track_id`, kept in sync on move.
    pub composition_id: CompositionId,
    /// Timeline start (ms).
    pub start_time: f64,
    /// Timeline end (ms).
    pub end_time: f64,
    /// Source in-point (ms).
    #[serde(default)]
    pub trim_start: f64,
    /// Source out-point (ms).
    #[serde(default)]
    pub trim_end: f64,
    /// Clip kind.
    #[serde(default)]
    pub kind: ClipKind,
    /// Host asset, if the clip plays media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<AssetId>,
    /// Picture properties.
    #[serde(default)]
    pub visual: VisualProps,
    /// Sound properties.
    #[serde(default)]
    pub audio: AudioProps,
    /// Effect stack.
    #[serde(default)]
    pub effects: Vec<EffectRef>,
    /// Animation keys, clip-local times.
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    /// Selection flag mirrored by the host UI.
    #[serde(default)]
    pub selected: bool,
    /// Lock flag.
    #[serde(default)]
    pub locked: bool,
}

impl Clip {
    pub(crate) fn new(
        track_id: TrackId,
        composition_id: CompositionId,
        name: &str,
        start_time: f64,
        duration: f64,
        kind: ClipKind,
    ) -> Self {
        Self {
            id: ClipId::generate(),
            name: name.to_string(),
            track_id,
            composition_id,
            start_time,
            end_time: start_time + duration,
            trim_start: 0.0,
            trim_end: duration,
            kind,
            asset_id: None,
            visual: VisualProps::default(),
            audio: AudioProps::default(),
            effects: Vec::new(),
            keyframes: Vec::new(),
            selected: false,
            locked: false,
        }
    }

    /// `end_time - start_time`.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether `time` falls inside `[start_time, end_time)`.
    pub fn contains(&self, time: f64) -> bool {
        self.start_time <= time && time < self.end_time
    }

    /// Whether the clip intersects `[from, to)`.
    pub fn overlaps(&self, from: f64, to: f64) -> bool {
        self.start_time < to && from < self.end_time
    }

    /// Sample a keyframed property at clip-local `time` (ms).
    pub fn sample(&self, property: &str, time: f64) -> Option<f64> {
        sample_keyframes(&self.keyframes, property, time)
    }

    /// Sample a keyframed property at timeline `time` (ms).
    pub fn sample_at_timeline(&self, property: &str, time: f64) -> Option<f64> {
        self.sample(property, time - self.start_time)
    }
}

/// Reject timings the engine does not store.
pub(crate) fn validate_timing(start: f64, end: f64) -> CompResult<()> {
    if !start.is_finite() || !end.is_finite() {
        return Err(CompError::validation("clip times must be finite"));
    }
    if start < 0.0 {
        return Err(CompError::validation("clip start must be >= 0"));
    }
    if end <= start {
        return Err(CompError::validation(format!(
            "clip end ({end}) must be after start ({start})"
        )));
    }
    Ok(())
}

/// Partial update of a [`Clip`]. Track/composition membership changes go through
/// [`crate::Engine::move_clip`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipPatch {
    /// New display name.
    pub name: Option<String>,
    /// New timeline start.
    pub start_time: Option<f64>,
    /// New timeline end.
    pub end_time: Option<f64>,
    /// New source in-point.
    pub trim_start: Option<f64>,
    /// New source out-point.
    pub trim_end: Option<f64>,
    /// New kind.
    pub kind: Option<ClipKind>,
    /// `Some(None)` clears the asset.
    pub asset_id: Option<Option<AssetId>>,
    /// New picture properties.
    pub visual: Option<VisualProps>,
    /// New sound properties.
    pub audio: Option<AudioProps>,
    /// Replacement effect stack.
    pub effects: Option<Vec<EffectRef>>,
    /// Replacement keyframes.
    pub keyframes: Option<Vec<Keyframe>>,
    /// New selection flag.
    pub selected: Option<bool>,
    /// New lock flag.
    pub locked: Option<bool>,
}

impl ClipPatch {
    pub(crate) fn apply(&self, clip: &mut Clip) {
        if let Some(name) = &self.name {
            clip.name = name.clone();
        }
        if let Some(t) = self.start_time {
            clip.start_time = t;
        }
        if let Some(t) = self.end_time {
            clip.end_time = t;
        }
        if let Some(t) = self.trim_start {
            clip.trim_start = t;
        }
        if let Some(t) = self.trim_end {
            clip.trim_end = t;
        }
        if let Some(kind) = self.kind {
            clip.kind = kind;
        }
        if let Some(asset) = &self.asset_id {
            clip.asset_id = asset.clone();
        }
        if let Some(visual) = self.visual {
            clip.visual = visual;
        }
        if let Some(audio) = self.audio {
            clip.audio = audio;
        }
        if let Some(effects) = &self.effects {
            clip.effects = effects.clone();
        }
        if let Some(keyframes) = &self.keyframes {
            clip.keyframes = keyframes.clone();
        }
        if let Some(selected) = self.selected {
            clip.selected = selected;
        }
        if let Some(locked) = self.locked {
            clip.locked = locked;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/clip.rs"]
mod tests;
