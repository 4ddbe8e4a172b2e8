//! Manifest loading functionality
//!
//! This module contains functions for loading and validating the generation
//! manifest.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use log::{debug, info};
use serde_yaml::from_str;

use super::model::GenerationManifest;

/// Loads a manifest from a file
///
/// # Arguments
/// * `file` - Path to the manifest file
///
/// # Returns
/// * `Result<GenerationManifest>` - The loaded manifest or an error
///
/// # Errors
/// Returns an error if the file cannot be read or if the manifest is invalid
pub fn load_manifest(file: &Path) -> Result<GenerationManifest> {
    let manifest = read_manifest(file)?;
    manifest.validate(true)?;
    info!("Loaded generation manifest {}", file.display());
    Ok(manifest)
}

/// Loads a manifest from a file without checking path existence
///
/// This is primarily used for testing.
pub fn load_manifest_for_testing(file: &Path) -> Result<GenerationManifest> {
    let manifest = read_manifest(file)?;
    manifest.validate(false)?;
    Ok(manifest)
}

/// Reads and parses a manifest without validating it
///
/// Callers that adjust the manifest afterwards (e.g. with command-line
/// overrides) validate the final result themselves.
pub fn read_manifest(file: &Path) -> Result<GenerationManifest> {
    let file_content = fs::read(file).map_err(|e| {
        anyhow!(
            "Failed to read manifest file {}: {}",
            file.display(),
            e
        )
    })?;

    let content_str = String::from_utf8(file_content).map_err(|e| {
        anyhow!(
            "Manifest file {} contains invalid UTF-8 characters: {}",
            file.display(),
            e
        )
    })?;

    let manifest = parse_manifest(&content_str).map_err(|e| {
        anyhow!(
            "Failed to parse manifest file {}: {}\nPlease check the YAML syntax.",
            file.display(),
            e
        )
    })?;

    debug!(
        "Manifest {} lists {} files",
        file.display(),
        manifest
            .files
            .as_ref()
            .map_or_else(|| "all template".to_string(), |files| files.len().to_string())
    );

    Ok(manifest)
}

/// Parses a manifest from YAML text
///
/// An empty document is an empty manifest.
pub fn parse_manifest(content: &str) -> std::result::Result<GenerationManifest, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(GenerationManifest::default());
    }
    from_str(content)
}
