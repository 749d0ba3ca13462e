//! Output sinks.
//!
//! Sinks consume the synchronized frame sequence in output order.

/// `ffmpeg`-based video encoding with audio muxing.
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
