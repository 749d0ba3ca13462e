/// Beat timestamps to frame boundaries.
pub mod mapper;
/// Boundary-delimited slice selection.
pub mod synchronizer;
