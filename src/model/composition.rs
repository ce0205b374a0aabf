use std::collections::BTreeMap;

use crate::{
    foundation::core::{CompositionId, TrackId},
    foundation::error::{CompError, CompResult},
};

/// One editable timeline, possibly nested inside another composition.
///
/// Cross references (`track_ids`, `parent_id`, `nested_ids`) are ids resolved through the
/// registries, never live references.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Composition {
    /// Identity.
    pub id: CompositionId,
    /// Display name.
    pub name: String,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Total duration in milliseconds.
    pub duration: f64,
    /// Frames per second.
    pub frame_rate: f64,
    /// Owned tracks, in lane order.
    pub track_ids: Vec<TrackId>,
    /// Enclosing composition, `None` for the root and for detached compositions.
    #[serde(default)]
    pub parent_id: Option<CompositionId>,
    /// Directly nested child compositions.
    #[serde(default)]
    pub nested_ids: Vec<CompositionId>,
    /// Playhead position local to this composition, in milliseconds.
    #[serde(default)]
    pub current_time: f64,
    /// Free-form host metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
    /// Creation time, ms since the Unix epoch.
    #[serde(default)]
    pub created_at: u64,
    /// Last update time, ms since the Unix epoch.
    #[serde(default)]
    pub updated_at: u64,
}

/// Arguments of [`crate::Engine::create_composition`].
///
/// Unset fields fall back to [`crate::CompositionDefaults`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewComposition {
    /// Display name.
    pub name: String,
    /// Width override.
    pub width: Option<u32>,
    /// Height override.
    pub height: Option<u32>,
    /// Duration override in milliseconds.
    pub duration: Option<f64>,
    /// Frame-rate override.
    pub frame_rate: Option<f64>,
    /// Nest the new composition under this parent right away.
    pub parent: Option<CompositionId>,
}

impl NewComposition {
    /// Composition named `name` with every other setting defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Override the frame size.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Override the duration (ms).
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Override the frame rate.
    pub fn frame_rate(mut self, fps: f64) -> Self {
        self.frame_rate = Some(fps);
        self
    }

    /// Nest under `parent`.
    pub fn parent(mut self, parent: CompositionId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Partial update of a [`Composition`]. Structural links are not patchable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompositionPatch {
    /// New display name.
    pub name: Option<String>,
    /// New width.
    pub width: Option<u32>,
    /// New height.
    pub height: Option<u32>,
    /// New duration (ms).
    pub duration: Option<f64>,
    /// New frame rate.
    pub frame_rate: Option<f64>,
    /// New local playhead (ms).
    pub current_time: Option<f64>,
    /// Metadata keys to insert; `Value::Null` removes the key.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl CompositionPatch {
    pub(crate) fn apply(&self, comp: &mut Composition) {
        if let Some(name) = &self.name {
            comp.name = name.clone();
        }
        if let Some(width) = self.width {
            comp.width = width;
        }
        if let Some(height) = self.height {
            comp.height = height;
        }
        if let Some(duration) = self.duration {
            comp.duration = duration;
        }
        if let Some(fps) = self.frame_rate {
            comp.frame_rate = fps;
        }
        if let Some(t) = self.current_time {
            comp.current_time = t.max(0.0);
        }
        for (key, value) in &self.metadata {
            if value.is_null() {
                comp.metadata.remove(key);
            } else {
                comp.metadata.insert(key.clone(), value.clone());
            }
        }
    }
}

impl Composition {
    pub(crate) fn validate(&self) -> CompResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CompError::validation(format!(
                "composition '{}' has an empty frame ({}x{})",
                self.name, self.width, self.height
            )));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(CompError::validation(format!(
                "composition '{}' duration must be > 0, got {}",
                self.name, self.duration
            )));
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(CompError::validation(format!(
                "composition '{}' frame rate must be > 0, got {}",
                self.name, self.frame_rate
            )));
        }
        Ok(())
    }

    /// Frame count covered by `duration`, rounded up.
    pub fn frame_count(&self) -> u64 {
        let frames = (self.duration / 1000.0 * self.frame_rate).ceil();
        if frames.is_finite() && frames > 0.0 {
            frames as u64
        } else {
            0
        }
    }

    /// Whether the composition sits directly under another one.
    pub fn is_nested(&self) -> bool {
        self.parent_id.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/composition.rs"]
mod tests;
