/// End-to-end render orchestration.
pub mod render;
