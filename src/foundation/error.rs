use crate::frame::buffer::Geometry;

/// Convenience result type used across beatfade.
pub type BeatfadeResult<T> = Result<T, BeatfadeError>;

/// Pipeline stage an error originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Configuration or argument validation.
    Config,
    /// Image loading and decoding.
    Load,
    /// Pairwise blending of transition frames.
    Blend,
    /// Audio decoding and beat detection.
    Beats,
    /// Beat-to-frame mapping and slice selection.
    Sync,
    /// Encoding and muxing the final video.
    Encode,
    /// Lower-level IO outside a specific stage.
    Io,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Config => "config",
            Stage::Load => "load",
            Stage::Blend => "blend",
            Stage::Beats => "beats",
            Stage::Sync => "sync",
            Stage::Encode => "encode",
            Stage::Io => "io",
        };
        f.write_str(s)
    }
}

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum BeatfadeError {
    /// Two buffers handed to the blender do not share the same geometry.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Geometry of the first buffer of the pair.
        left: Geometry,
        /// Geometry of the second buffer of the pair.
        right: Geometry,
    },

    /// Beat mapping was asked to index into an empty transition sequence.
    #[error("empty frame source: there are no transition frames to map beats onto")]
    EmptyFrameSource,

    /// Synchronization produced no usable output.
    #[error("degenerate sync: {0}")]
    DegenerateSync(String),

    /// Invalid user-provided configuration or buffer data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while reading or decoding source images.
    #[error("load error: {0}")]
    Load(String),

    /// Errors while decoding audio or detecting beats.
    #[error("audio error: {0}")]
    Audio(String),

    /// Errors raised by a frame sink while encoding.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BeatfadeError {
    /// Build a [`BeatfadeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BeatfadeError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`BeatfadeError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`BeatfadeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BeatfadeError::DegenerateSync`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateSync(msg.into())
    }

    /// Stage of the pipeline this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::DimensionMismatch { .. } => Stage::Blend,
            Self::EmptyFrameSource | Self::DegenerateSync(_) => Stage::Sync,
            Self::Validation(_) => Stage::Config,
            Self::Load(_) => Stage::Load,
            Self::Audio(_) => Stage::Beats,
            Self::Encode(_) => Stage::Encode,
            Self::Other(_) => Stage::Io,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
