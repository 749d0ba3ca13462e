/// Fixed-layout raster type shared by every pipeline stage.
pub mod buffer;
