/// Directory image loading.
pub mod loader;
