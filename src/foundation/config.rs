use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{CompError, CompResult};

/// Engine-wide options.
///
/// Every field has a default, so a config file only needs the keys it overrides:
///
/// ```json
/// { "max_history": 200, "composition": { "width": 1280, "height": 720 } }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Maximum number of undo entries kept; the oldest is dropped first.
    pub max_history: usize,
    /// Lower zoom bound.
    pub zoom_min: f64,
    /// Upper zoom bound.
    pub zoom_max: f64,
    /// Zoom factor of a fresh timeline.
    pub default_zoom: f64,
    /// Settings applied to newly created compositions.
    pub composition: CompositionDefaults,
    /// Lane height of new video tracks.
    pub track_height_video: f64,
    /// Lane height of new audio tracks and every other lane kind.
    pub track_height_audio: f64,
    /// Appended to the source clip name on paste and duplicate.
    pub paste_suffix: String,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            max_history: 100,
            zoom_min: 0.1,
            zoom_max: 10.0,
            default_zoom: 1.0,
            composition: CompositionDefaults::default(),
            track_height_video: 60.0,
            track_height_audio: 40.0,
            paste_suffix: " (Copy)".to_string(),
        }
    }
}

/// Defaults for [`crate::NewComposition`] fields left unset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositionDefaults {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Duration in milliseconds.
    pub duration: f64,
    /// Frames per second.
    pub frame_rate: f64,
    /// Name of the video track created with every composition.
    pub video_track_name: String,
    /// Name of the audio track created with every composition.
    pub audio_track_name: String,
}

impl Default for CompositionDefaults {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            duration: 60_000.0,
            frame_rate: 30.0,
            video_track_name: "Video 1".to_string(),
            audio_track_name: "Audio 1".to_string(),
        }
    }
}

impl EngineOpts {
    /// Parse options from JSON; absent keys keep their defaults.
    pub fn from_json_str(s: &str) -> CompResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read and parse an options file.
    pub fn from_path(path: &Path) -> CompResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read engine options '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Reject option sets the engine cannot honour.
    pub fn validate(&self) -> CompResult<()> {
        if self.max_history == 0 {
            return Err(CompError::validation("max_history must be > 0"));
        }
        if !(self.zoom_min.is_finite() && self.zoom_min > 0.0) || !self.zoom_max.is_finite() {
            return Err(CompError::validation(
                "zoom_min must be > 0 and zoom_max finite",
            ));
        }
        if self.zoom_min > self.zoom_max {
            return Err(CompError::validation("zoom_min must be <= zoom_max"));
        }
        let c = &self.composition;
        if c.width == 0 || c.height == 0 {
            return Err(CompError::validation(
                "composition width/height must be > 0",
            ));
        }
        if !(c.frame_rate.is_finite() && c.frame_rate > 0.0) {
            return Err(CompError::validation("composition frame_rate must be > 0"));
        }
        if !(c.duration.is_finite() && c.duration > 0.0) {
            return Err(CompError::validation("composition duration must be > 0"));
        }
        Ok(())
    }

    /// Clamp `zoom` into the configured range.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.default_zoom.clamp(self.zoom_min, self.zoom_max);
        }
        zoom.clamp(self.zoom_min, self.zoom_max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
