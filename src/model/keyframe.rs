/// Easing curve applied from a keyframe toward the next one.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Ease {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out.
    InOutCubic,
    /// Keep the key's value until the next key.
    Hold,
}

impl Ease {
    /// Map normalized progress `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Hold => 0.0,
        }
    }
}

/// One animated value of a clip property.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Animated property name, e.g. `"opacity"` or `"position.x"`.
    pub property: String,
    /// Clip-local time in milliseconds.
    pub time: f64,
    /// Property value at `time`.
    pub value: f64,
    /// Curve used toward the next key of the same property.
    #[serde(default)]
    pub ease: Ease,
}

impl Keyframe {
    /// Linear keyframe.
    pub fn new(property: impl Into<String>, time: f64, value: f64) -> Self {
        Self {
            property: property.into(),
            time,
            value,
            ease: Ease::Linear,
        }
    }

    /// Same keyframe with a different curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Sample `property` at clip-local `time`.
///
/// Values hold before the first and after the last key. `None` when the property has no keys.
pub(crate) fn sample_keyframes(keys: &[Keyframe], property: &str, time: f64) -> Option<f64> {
    let mut track: Vec<&Keyframe> = keys.iter().filter(|k| k.property == property).collect();
    if track.is_empty() {
        return None;
    }
    track.sort_by(|a, b| a.time.total_cmp(&b.time));

    let idx = track.partition_point(|k| k.time <= time);
    if idx == 0 {
        return Some(track[0].value);
    }
    if idx >= track.len() {
        return Some(track[track.len() - 1].value);
    }

    let a = track[idx - 1];
    let b = track[idx];
    let span = b.time - a.time;
    if span <= 0.0 {
        return Some(a.value);
    }

    let t = a.ease.apply((time - a.time) / span);
    Some(a.value + (b.value - a.value) * t)
}

#[cfg(test)]
#[path = "../../tests/unit/model/keyframe.rs"]
mod tests;
