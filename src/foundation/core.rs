use crate::foundation::error::{BeatfadeError, BeatfadeResult};

/// Position of a frame in the output sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Rational frame rate (`num / den` frames per second).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> BeatfadeResult<Self> {
        if den == 0 {
            return Err(BeatfadeError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(BeatfadeError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole frames per second.
    pub fn integer(num: u32) -> BeatfadeResult<Self> {
        Self::new(num, 1)
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of a single frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Seconds covered by `frames` frames.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// `floor(secs * fps)`, saturating negative and NaN inputs to 0.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 24, den: 1 }
    }
}

impl std::fmt::Display for Fps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

/// Target output resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// 1280x720, the default slideshow resolution.
    pub const HD: Canvas = Canvas {
        width: 1280,
        height: 720,
    };

    /// Reject zero-sized canvases.
    pub fn validate(self) -> BeatfadeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BeatfadeError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        Ok(())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::HD
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
