/// Pairwise crossfade of two equally sized buffers.
pub mod blend;
/// Parallel crossfades across a whole image sequence.
pub mod pipeline;
