//! Generation manifest data structures

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value as YamlValue;

use crate::constants::FILE_NAME_KEY;
use crate::errors::Result as GenResult;
use crate::template::TemplateContext;
use crate::utils::{destination_for_template, expand_path, normalize_destination};

/// Describes one generation run
///
/// Every field is optional in the file. The templates and output
/// directories can be given on the command line instead.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GenerationManifest {
    /// Directory holding the templates
    #[serde(default, deserialize_with = "deserialize_optional_expanded_path")]
    pub templates: Option<PathBuf>,
    /// Root directory the generated files are written to
    #[serde(default, deserialize_with = "deserialize_optional_expanded_path")]
    pub output: Option<PathBuf>,
    /// Values passed to every template
    #[serde(default)]
    pub context: BTreeMap<String, YamlValue>,
    /// Explicit list of files to generate; every template is rendered when absent
    #[serde(default)]
    pub files: Option<Vec<FileEntry>>,
}

/// A single template to render
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    /// Template name relative to the templates directory
    pub template: String,
    /// Destination relative to the output directory
    #[serde(default)]
    pub destination: Option<PathBuf>,
    /// Values for this file only, overriding the global context
    #[serde(default)]
    pub context: BTreeMap<String, YamlValue>,
}

impl FileEntry {
    /// Creates an entry that renders `template` to its default destination
    pub fn for_template(template: &str) -> Self {
        FileEntry {
            template: template.to_string(),
            destination: None,
            context: BTreeMap::new(),
        }
    }

    /// Destination relative to the output directory
    pub fn destination_path(&self) -> PathBuf {
        self.destination
            .clone()
            .unwrap_or_else(|| destination_for_template(&self.template))
    }

    /// Destination with `.` components removed
    ///
    /// # Errors
    /// Returns `Error::InvalidDestination` if the destination would leave the
    /// output directory
    pub fn checked_destination(&self) -> GenResult<PathBuf> {
        normalize_destination(&self.destination_path())
    }

    pub fn template_context(&self) -> TemplateContext {
        TemplateContext::from_serializable(&self.context)
    }
}

impl GenerationManifest {
    /// Values shared by every template of the run
    pub fn global_context(&self) -> TemplateContext {
        TemplateContext::from_serializable(&self.context)
    }

    /// Replaces the directories with the ones given on the command line
    pub fn with_overrides(mut self, templates: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if templates.is_some() {
            self.templates = templates;
        }
        if output.is_some() {
            self.output = output;
        }
        self
    }

    /// Validates the manifest
    ///
    /// Checks performed:
    /// - the templates directory exists and is a directory (only if `check_paths` is true)
    /// - an explicit file list is not empty and names a template in every entry
    /// - no context sets the reserved `file_name` key
    /// - every destination stays inside the output directory
    /// - no two entries write the same destination
    ///
    /// # Errors
    /// Returns an error with a detailed message if validation fails
    pub fn validate(&self, check_paths: bool) -> Result<()> {
        if check_paths && let Some(templates) = &self.templates {
            if !templates.exists() {
                return Err(anyhow!(
                    "Templates directory does not exist: {}\n{}",
                    templates.display(),
                    "Please check the path and ensure it exists."
                ));
            }

            if !templates.is_dir() {
                return Err(anyhow!(
                    "Templates path is not a directory: {}\n{}",
                    templates.display(),
                    "Please specify a valid directory path."
                ));
            }
        }

        if self.context.contains_key(FILE_NAME_KEY) {
            return Err(anyhow!(
                "The global context sets '{FILE_NAME_KEY}', which is reserved and filled in for every file."
            ));
        }

        let Some(files) = &self.files else {
            return Ok(());
        };

        if files.is_empty() {
            return Err(anyhow!(
                "The 'files' list is empty. Remove it to render every template, or list at least one file."
            ));
        }

        let mut destinations = HashSet::new();
        for (index, entry) in files.iter().enumerate() {
            if entry.template.trim().is_empty() {
                return Err(anyhow!(
                    "File entry at index {} has an empty template name. Each entry must name a template.",
                    index
                ));
            }

            if entry.context.contains_key(FILE_NAME_KEY) {
                return Err(anyhow!(
                    "File entry '{}' sets '{FILE_NAME_KEY}', which is reserved and filled in for every file.",
                    entry.template
                ));
            }

            let destination = entry.checked_destination().map_err(|e| {
                anyhow!("File entry '{}' has an invalid destination. {e}", entry.template)
            })?;
            if !destinations.insert(destination.clone()) {
                return Err(anyhow!(
                    "File entry '{}' writes to {}, which another entry already writes to.",
                    entry.template,
                    destination.display()
                ));
            }
        }

        Ok(())
    }
}

/// Reads an optional path and expands a leading `~`
fn deserialize_optional_expanded_path<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|path| expand_path(&path)))
}
