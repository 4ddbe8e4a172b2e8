//! Configuration module
//!
//! This module contains the generation manifest and its loader.

mod loader;
mod model;

pub use loader::{load_manifest, load_manifest_for_testing, parse_manifest, read_manifest};
pub use model::{FileEntry, GenerationManifest};
